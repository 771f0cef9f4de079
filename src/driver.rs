//! Fixed-step driver
//!
//! Turns variable frame deltas from an external loop into whole simulation
//! ticks, carrying the remainder between frames.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::settings::Settings;
use crate::sim::{GameState, tick};

#[derive(Debug, Clone)]
pub struct FixedStepDriver {
    sim_dt: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl Default for FixedStepDriver {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedStepDriver {
    pub fn new(sim_dt: f32, max_substeps: u32) -> Self {
        let sim_dt = if sim_dt.is_finite() && sim_dt > 0.0 {
            sim_dt
        } else {
            log::warn!("Invalid timestep {sim_dt}, using {SIM_DT}");
            SIM_DT
        };
        Self {
            sim_dt,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.sim_dt(), settings.max_substeps)
    }

    pub fn sim_dt(&self) -> f32 {
        self.sim_dt
    }

    /// Run as many ticks as `frame_dt` covers. Returns the number run.
    pub fn advance(&mut self, state: &mut GameState, frame_dt: f32) -> u32 {
        // A bad frame time counts as no time at all
        let frame_dt = if frame_dt.is_finite() { frame_dt } else { 0.0 };
        // Clamp to what one frame may consume to prevent spiral of death
        let max_frame = self.sim_dt * self.max_substeps as f32;
        self.accumulator += frame_dt.clamp(0.0, max_frame);

        let mut substeps = 0;
        while self.accumulator >= self.sim_dt && substeps < self.max_substeps {
            if !state.is_running() {
                self.accumulator = 0.0;
                break;
            }
            tick(state, self.sim_dt);
            self.accumulator -= self.sim_dt;
            substeps += 1;
        }
        substeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameConfig;

    #[test]
    fn test_whole_ticks_and_remainder() {
        let mut state = GameState::new(GameConfig::default()).unwrap();
        let mut driver = FixedStepDriver::new(0.25, 4);

        assert_eq!(driver.advance(&mut state, 0.5), 2);
        assert_eq!(driver.advance(&mut state, 0.2), 0);
        // 0.2 carried over
        assert_eq!(driver.advance(&mut state, 0.1), 1);
        assert_eq!(state.time_ticks, 3);
    }

    #[test]
    fn test_substep_cap() {
        let mut state = GameState::new(GameConfig::default()).unwrap();
        let mut driver = FixedStepDriver::new(0.25, 4);
        assert_eq!(driver.advance(&mut state, 10.0), 4);
        assert_eq!(state.time_ticks, 4);
    }

    #[test]
    fn test_stopped_session_runs_nothing() {
        let mut state = GameState::new(GameConfig::default()).unwrap();
        state.quit();
        let mut driver = FixedStepDriver::default();
        assert_eq!(driver.advance(&mut state, 0.1), 0);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_non_finite_frame_ignored() {
        let mut state = GameState::new(GameConfig::default()).unwrap();
        let mut driver = FixedStepDriver::new(0.25, 4);
        assert_eq!(driver.advance(&mut state, f32::NAN), 0);
        assert_eq!(driver.advance(&mut state, f32::INFINITY), 0);
        assert_eq!(driver.advance(&mut state, 0.5), 2);
        assert_eq!(state.time_ticks, 2);
    }

    #[test]
    fn test_bad_timestep_falls_back() {
        assert_eq!(FixedStepDriver::new(-1.0, 4).sim_dt(), SIM_DT);
        assert_eq!(FixedStepDriver::new(f32::NAN, 4).sim_dt(), SIM_DT);
        let mut state = GameState::new(GameConfig::default()).unwrap();
        let mut driver = FixedStepDriver::new(0.0, 2);
        assert_eq!(driver.advance(&mut state, 1.0), 2);
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings::default();
        let driver = FixedStepDriver::from_settings(&settings);
        assert!((driver.sim_dt() - SIM_DT).abs() < 1e-6);
    }
}
