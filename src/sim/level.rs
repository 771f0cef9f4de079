//! Deterministic brick grid generation
//!
//! Bricks fill a band in the arena's upper half. The grid is laid out
//! column by column, bottom row first, so iteration order is stable.

use serde::{Deserialize, Serialize};

use super::body::Brick;
use super::rect::Rect;
use crate::consts::{BRICK_COLORS, CELL_PADDING, GRID_PADDING, LEVEL_HEIGHT, LEVEL_WIDTH};
use crate::error::{SimError, SimResult};

/// Grid dimensions and spacing for a level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelLayout {
    /// Bricks per row
    pub width: u32,
    /// Rows of bricks
    pub height: u32,
    /// Outer padding around the whole grid
    pub grid_padding: f32,
    /// Padding inside each cell around its brick
    pub cell_padding: f32,
}

impl Default for LevelLayout {
    fn default() -> Self {
        Self {
            width: LEVEL_WIDTH,
            height: LEVEL_HEIGHT,
            grid_padding: GRID_PADDING,
            cell_padding: CELL_PADDING,
        }
    }
}

impl LevelLayout {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SimError::InvalidLevel {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn brick_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Build the brick grid for `arena`
pub fn generate_level(arena: &Rect, layout: &LevelLayout) -> SimResult<Vec<Brick>> {
    layout.validate()?;

    let grid = layout.grid_padding;
    let cell = layout.cell_padding;
    let cell_width = (arena.width - grid * 2.0) / layout.width as f32;
    // Grid occupies a quarter of the arena height, starting at its middle
    let cell_height = (arena.height - grid * 2.0) / 4.0 / layout.height as f32;
    let brick_width = cell_width - cell * 2.0;
    let brick_height = cell_height - cell * 2.0;

    let mut bricks = Vec::with_capacity(layout.brick_count());
    for col in 0..layout.width {
        for row in 0..layout.height {
            let x = arena.x + cell_width * col as f32 + cell + grid;
            let y = arena.y + cell_height * row as f32 + cell + grid + arena.height / 2.0;
            bricks.push(Brick::new(
                Rect::new(x, y, brick_width, brick_height),
                row + 1,
                (row % BRICK_COLORS) as u8,
            ));
        }
    }

    log::debug!(
        "Generated {}x{} level ({} bricks, {:.1}x{:.1} each)",
        layout.width,
        layout.height,
        bricks.len(),
        brick_width,
        brick_height
    );

    Ok(bricks)
}
