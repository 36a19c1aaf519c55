//! Error types
//!
//! Nothing in the engine is fatal. Placement errors mean "no state change",
//! the rest surface from configuration and persistence boundaries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Rejected grid write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementError {
    /// Row or column outside the grid
    OutOfBounds { row: i32, col: i32 },
    /// Slot already holds a ball
    Occupied { row: usize, col: usize },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::OutOfBounds { row, col } => {
                write!(f, "cell ({}, {}) is outside the grid", row, col)
            }
            PlacementError::Occupied { row, col } => {
                write!(f, "cell ({}, {}) is already occupied", row, col)
            }
        }
    }
}

impl std::error::Error for PlacementError {}

/// Crate-level error
#[derive(Debug)]
pub enum GameError {
    /// Fire trigger while a projectile is still flying
    DuplicateShot,
    /// Score store failed (storage, network)
    Persistence(String),
    /// Settings/tuning failed validation
    Settings(String),
    Json(serde_json::Error),
    Io(std::io::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::DuplicateShot => write!(f, "a projectile is already in flight"),
            GameError::Persistence(msg) => write!(f, "score persistence failed: {}", msg),
            GameError::Settings(msg) => write!(f, "invalid settings: {}", msg),
            GameError::Json(e) => write!(f, "json error: {}", e),
            GameError::Io(e) => write!(f, "io error: {}", e),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Json(e) => Some(e),
            GameError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::Json(e)
    }
}

impl From<std::io::Error> for GameError {
    fn from(e: std::io::Error) -> Self {
        GameError::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
