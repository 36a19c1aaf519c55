//! Game session state
//!
//! Everything a running game owns lives in `GameState`; it is passed
//! explicitly into `tick`, never held in a global.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::cluster::MatchResult;
use super::grid::{BallColor, Cell, Grid, GridPos};
use super::projectile::{Bounce, Projectile};
use crate::angle_toward;
use crate::error::{GameError, PlacementError, Result};
use crate::tuning::Tuning;

/// Flight state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a fire trigger
    Idle,
    /// A projectile is in the air
    Flying,
}

/// Something that happened during a tick, in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Grid refilled and score zeroed
    Reset,
    ShotFired { color: BallColor, angle: f32 },
    /// Fire trigger ignored because a projectile is in flight
    ShotRejected,
    WallBounce(Bounce),
    /// Touching a ball but the snap cell was unusable
    ContactRejected {
        contact: GridPos,
        reason: PlacementError,
    },
    Settled { pos: GridPos, cell: Cell },
    /// Cluster removed; `total` is the session score afterwards
    Matched { result: MatchResult, total: u64 },
    /// Projectile dropped below the arena (opt-in)
    Despawned,
}

/// The pivoting launcher
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shooter {
    pub pos: Vec2,
    /// Aim angle (radians, screen coordinates; -π/2 is straight up)
    pub aim: f32,
    /// Color of the next shot
    pub loaded: BallColor,
}

impl Shooter {
    pub fn new(pos: Vec2, loaded: BallColor) -> Self {
        Self {
            pos,
            aim: -std::f32::consts::FRAC_PI_2,
            loaded,
        }
    }

    /// Aim at a point (pointer position)
    pub fn aim_at(&mut self, target: Vec2) {
        self.aim = angle_toward(self.pos, target);
    }
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub grid: Grid,
    /// At most one ball in flight
    pub projectile: Option<Projectile>,
    pub shooter: Shooter,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    rng: Pcg32,
}

impl GameState {
    /// New session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let grid = Grid::filled(&mut rng);
        let shooter = Shooter::new(tuning.shooter_origin(), rng.random());
        log::info!("New game (seed {})", seed);
        Self {
            seed,
            tuning,
            grid,
            projectile: None,
            shooter,
            score: 0,
            time_ticks: 0,
            rng,
        }
    }

    pub fn phase(&self) -> GamePhase {
        if self.projectile.is_some() {
            GamePhase::Flying
        } else {
            GamePhase::Idle
        }
    }

    /// Launch the loaded ball along the current aim and load a fresh random color
    pub fn shoot(&mut self) -> Result<Projectile> {
        if self.projectile.is_some() {
            return Err(GameError::DuplicateShot);
        }
        let projectile = Projectile::launch(
            self.shooter.pos,
            self.shooter.aim,
            self.shooter.loaded,
            self.tuning.shot_speed,
        );
        self.projectile = Some(projectile);
        self.shooter.loaded = self.rng.random();
        Ok(projectile)
    }

    /// Back to the opening layout with a zero score. The RNG keeps running,
    /// so a reset deals a fresh board rather than replaying the first one.
    pub fn reset(&mut self) {
        self.grid.reset(&mut self.rng);
        self.projectile = None;
        self.shooter.loaded = self.rng.random();
        self.score = 0;
        log::info!("Game reset");
    }

    /// Credit a removed cluster; returns the new total
    pub(crate) fn add_points(&mut self, points: u64) -> u64 {
        self.score = self.score.saturating_add(points);
        self.score
    }
}
