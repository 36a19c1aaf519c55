//! Bubble Pop - A bubble shooter arcade game engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, projectile physics, collision, cluster matching)
//! - `highscores`: Best-effort high score persistence boundary
//! - `settings`: Player/app preferences
//! - `tuning`: Data-driven gameplay parameters

pub mod error;
pub mod highscores;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{GameError, PlacementError, Result};
pub use highscores::{MemoryScoreStore, ScoreReporter, ScoreStore};
#[cfg(not(target_arch = "wasm32"))]
pub use highscores::JsonFileScoreStore;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Ball radius (grid pitch is twice this)
    pub const BALL_RADIUS: f32 = 20.0;

    /// Grid dimensions
    pub const GRID_ROWS: usize = 8;
    pub const GRID_COLS: usize = 10;
    /// Rows populated at the start of a game
    pub const PREFILLED_ROWS: usize = 4;

    /// Smallest cluster that gets removed
    pub const MATCH_THRESHOLD: usize = 3;
    /// Score per removed ball
    pub const POINTS_PER_BALL: u64 = 10;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 600.0;
    pub const ARENA_HEIGHT: f32 = 800.0;
    /// Shooter distance above the arena bottom
    pub const SHOOTER_HEIGHT: f32 = 60.0;

    /// Projectile displacement per tick
    pub const SHOT_SPEED: f32 = 10.0;
}

/// Angle (radians) of the ray from `from` to `to`, screen coordinates (y down)
#[inline]
pub fn angle_toward(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Unit direction for an angle
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Round half toward positive infinity (-0.5 rounds to 0, 0.5 rounds to 1)
#[inline]
pub fn round_half_up(v: f32) -> f32 {
    (v + 0.5).floor()
}
