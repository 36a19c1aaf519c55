//! Same-color cluster search and removal
//!
//! Four-way connectivity only (no diagonals). The search starts from the
//! ball that just settled; clusters elsewhere on the grid are never touched.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::grid::{BallColor, Grid, GridPos};
use crate::consts::{GRID_COLS, GRID_ROWS, MATCH_THRESHOLD, POINTS_PER_BALL};

/// A removed cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub color: BallColor,
    /// Removed cells in row-major order
    pub cells: Vec<GridPos>,
    /// Score delta
    pub points: u64,
}

/// Maximal 4-connected set of cells sharing the color at `origin`.
/// Empty when `origin` itself is empty.
pub fn find_cluster(grid: &Grid, origin: GridPos) -> BTreeSet<GridPos> {
    let mut visited = BTreeSet::new();
    let Some(color) = grid.get(origin).map(|c| c.color) else {
        return visited;
    };

    let mut stack = Vec::with_capacity(GRID_ROWS * GRID_COLS);
    stack.push(origin);
    while let Some(pos) = stack.pop() {
        if visited.contains(&pos) {
            continue;
        }
        match grid.get(pos) {
            Some(cell) if cell.color == color => {}
            _ => continue,
        }
        visited.insert(pos);
        stack.extend(pos.neighbors().filter(|n| !visited.contains(n)));
    }
    visited
}

/// Clear the cluster at `origin` if it is big enough.
/// Smaller clusters leave the grid untouched and return `None`.
pub fn resolve_match(grid: &mut Grid, origin: GridPos) -> Option<MatchResult> {
    let color = grid.get(origin)?.color;
    let cluster = find_cluster(grid, origin);
    if cluster.len() < MATCH_THRESHOLD {
        return None;
    }

    for pos in &cluster {
        grid.remove_at(*pos);
    }
    let points = cluster.len() as u64 * POINTS_PER_BALL;
    Some(MatchResult {
        color,
        cells: cluster.into_iter().collect(),
        points,
    })
}
