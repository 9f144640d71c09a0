//! World-state snapshot as pushed by the feed.
//! Every push replaces the previous snapshot wholesale.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::state::camera::Point;

/// A discrete grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[cfg(test)]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Centre of the cell in world units.
    pub fn to_point(self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }
}

/// Provenance of a golden apple; display-only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoldenAppleSpawn {
    pub tx_id: String,
    pub amount: f64,
    /// Unix seconds.
    pub time: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub tx_id: String,
    pub amount: f64,
    /// Unix seconds.
    pub time: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnakeState {
    /// Head first; consecutive cells are expected (not verified) to be 4-connected.
    pub snake: Vec<Position>,
    pub apple: Position,
    pub direction: Position,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub is_golden_apple: bool,
    #[serde(default)]
    pub apple_spawned_by: Option<GoldenAppleSpawn>,
    #[serde(default)]
    pub processed_txs: BTreeMap<String, Transaction>,
}

impl SnakeState {
    /// Spawn info for the notification card, only while the current apple is golden.
    pub fn golden_spawn(&self) -> Option<&GoldenAppleSpawn> {
        if self.is_golden_apple {
            self.apple_spawned_by.as_ref()
        } else {
            None
        }
    }

    /// Processed transactions, newest first.
    pub fn recent_transactions(&self) -> Vec<Transaction> {
        let mut txs: Vec<Transaction> = self.processed_txs.values().cloned().collect();
        txs.sort_by(|a, b| b.time.cmp(&a.time));
        txs
    }
}

/// Arithmetic mean of the cells, or None for an empty slice.
pub fn mean_position(cells: &[Position]) -> Option<Point> {
    if cells.is_empty() {
        return None;
    }
    let n = cells.len() as f64;
    let (sx, sy) = cells
        .iter()
        .fold((0.0, 0.0), |(sx, sy), c| (sx + c.x as f64, sy + c.y as f64));
    Some(Point::new(sx / n, sy / n))
}
