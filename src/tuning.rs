//! Data-driven gameplay parameters
//!
//! Grid shape and ball radius are fixed in `consts`; these are the knobs that
//! can change without breaking grid geometry.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{GameError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub arena_width: f32,
    pub arena_height: f32,
    /// Shooter distance above the arena bottom
    pub shooter_height: f32,
    /// Projectile displacement per tick
    pub shot_speed: f32,
    /// Remove a projectile that leaves through the bottom edge.
    /// Off by default: stray shots fly forever until reset.
    pub despawn_below_floor: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            shooter_height: SHOOTER_HEIGHT,
            shot_speed: SHOT_SPEED,
            despawn_below_floor: false,
        }
    }
}

impl Tuning {
    /// Fixed shooter position
    pub fn shooter_origin(&self) -> Vec2 {
        Vec2::new(self.arena_width / 2.0, self.arena_height - self.shooter_height)
    }

    pub fn validate(&self) -> Result<()> {
        let grid_width = GRID_COLS as f32 * BALL_RADIUS * 2.0;
        let grid_height = GRID_ROWS as f32 * BALL_RADIUS * 2.0;

        if !self.shot_speed.is_finite() || self.shot_speed <= 0.0 {
            return Err(GameError::Settings(format!(
                "shot_speed must be positive, got {}",
                self.shot_speed
            )));
        }
        // Faster shots can step over a ball without ever being within reach
        if self.shot_speed >= BALL_RADIUS * 2.0 {
            return Err(GameError::Settings(format!(
                "shot_speed {} must be below the grid pitch {}",
                self.shot_speed,
                BALL_RADIUS * 2.0
            )));
        }
        if !self.arena_width.is_finite() || self.arena_width < grid_width {
            return Err(GameError::Settings(format!(
                "arena_width {} is narrower than the grid ({})",
                self.arena_width, grid_width
            )));
        }
        if !self.arena_height.is_finite() || !self.shooter_height.is_finite() {
            return Err(GameError::Settings("arena height must be finite".into()));
        }
        if self.shooter_origin().y <= grid_height {
            return Err(GameError::Settings(format!(
                "shooter at y={} sits inside the grid (bottom at {})",
                self.shooter_origin().y,
                grid_height
            )));
        }
        Ok(())
    }
}
