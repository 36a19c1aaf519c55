//! Read-only view of a session for render sinks

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::{BallColor, GridPos};
use super::projectile::Projectile;
use super::state::{GameEvent, GamePhase, GameState, Shooter};

/// A settled ball as the renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub row: usize,
    pub col: usize,
    pub pos: Vec2,
    pub color: BallColor,
    /// CSS fill for `color`
    pub hex: String,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub tick: u64,
    pub phase: GamePhase,
    /// Occupied cells, row-major
    pub balls: Vec<BallView>,
    pub shooter: Shooter,
    pub projectile: Option<Projectile>,
    pub score: u64,
    /// Events produced by the tick that built this snapshot
    pub events: Vec<GameEvent>,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState, events: Vec<GameEvent>) -> Self {
        let balls = state
            .grid
            .occupied()
            .map(|(GridPos { row, col }, cell)| BallView {
                row,
                col,
                pos: cell.pos,
                color: cell.color,
                hex: cell.color.hex().to_string(),
            })
            .collect();
        Self {
            tick: state.time_ticks,
            phase: state.phase(),
            balls,
            shooter: state.shooter,
            projectile: state.projectile,
            score: state.score,
            events,
        }
    }

    /// Cluster removals in this frame
    pub fn matches(&self) -> impl Iterator<Item = &GameEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e, GameEvent::Matched { .. }))
    }
}
