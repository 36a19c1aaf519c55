//! Projectile vs settled-ball collision and snap-to-cell placement
//!
//! Settled balls are scanned row-major with no spatial index, so ties between
//! several touching balls go to the lowest row, then the lowest column.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::cluster::{MatchResult, resolve_match};
use super::grid::{Cell, Grid, GridPos};
use super::projectile::Projectile;
use crate::consts::BALL_RADIUS;
use crate::error::PlacementError;
use crate::round_half_up;

/// What happened to the projectile this tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CollisionOutcome {
    /// Not touching any settled ball
    Miss,
    /// Touching `contact`, but the snap cell was unusable; keeps flying
    Rejected {
        contact: GridPos,
        reason: PlacementError,
    },
    /// Merged into the grid, possibly clearing a cluster
    Settled {
        pos: GridPos,
        cell: Cell,
        matched: Option<MatchResult>,
    },
}

/// First settled ball (row-major) whose center is closer than two radii
pub fn find_contact(grid: &Grid, point: Vec2) -> Option<GridPos> {
    let reach = BALL_RADIUS * 2.0;
    grid.occupied()
        .find(|(_, cell)| cell.pos.distance(point) < reach)
        .map(|(pos, _)| pos)
}

/// Grid slot nearest to `point`, possibly out of range
pub fn snap_cell(point: Vec2) -> (i32, i32) {
    let pitch = BALL_RADIUS * 2.0;
    let row = round_half_up((point.y - BALL_RADIUS) / pitch) as i32;
    let col = round_half_up((point.x - BALL_RADIUS) / pitch) as i32;
    (row, col)
}

/// Test the projectile against the grid and commit a placement on contact.
///
/// The snap cell depends only on the projectile position, so once the first
/// contact is rejected every other contact in the scan would be too.
pub fn resolve_collision(grid: &mut Grid, projectile: &Projectile) -> CollisionOutcome {
    let Some(contact) = find_contact(grid, projectile.pos) else {
        return CollisionOutcome::Miss;
    };

    let (row, col) = snap_cell(projectile.pos);
    match grid.place(row, col, projectile.color) {
        Ok(cell) => {
            // place() succeeded, so (row, col) is in range
            let pos = GridPos {
                row: row as usize,
                col: col as usize,
            };
            let matched = resolve_match(grid, pos);
            CollisionOutcome::Settled { pos, cell, matched }
        }
        Err(reason) => CollisionOutcome::Rejected { contact, reason },
    }
}
