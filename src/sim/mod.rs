//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One physics step per tick, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (row-major)
//! - No rendering or platform dependencies

pub mod cluster;
pub mod collision;
pub mod grid;
pub mod projectile;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use cluster::{MatchResult, find_cluster, resolve_match};
pub use collision::{CollisionOutcome, find_contact, resolve_collision, snap_cell};
pub use grid::{BallColor, Cell, Grid, GridPos, canonical_position};
pub use projectile::{Bounce, Projectile};
pub use snapshot::{BallView, RenderSnapshot};
pub use state::{GameEvent, GamePhase, GameState, Shooter};
pub use tick::{Aim, TickInput, tick};
