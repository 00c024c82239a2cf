// SPDX-License-Identifier: MIT OR Apache-2.0
//! Bounded historical series of p99 values
//!
//! One [`HistoryPoint`] per benchmark run: a timestamp label plus each
//! implementation's p99, keyed by implementation name. The series is
//! append-only with FIFO eviction once it reaches its bound. Where the
//! series is persisted is the surrounding application's concern; only the
//! retention invariant lives here.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// Hard ceiling on the retention bound.
pub const MAX_POINTS_LIMIT: usize = 100;
/// Retention bound used when none is configured.
pub const DEFAULT_MAX_POINTS: usize = 25;

/// One row of the time series.
///
/// Serializes flat, `{"time": "12:30:01", "tagged": 1.9, "columnar": 0.2}`,
/// so persisted rows stay keyed by implementation name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// Human-readable timestamp label for this run.
    pub time: String,
    /// p99 per implementation name.
    #[serde(flatten)]
    pub p99: BTreeMap<String, f64>,
}

/// Ordered, bounded series of [`HistoryPoint`]s.
#[derive(Debug, Clone)]
pub struct History {
    points: VecDeque<HistoryPoint>,
    max_points: usize,
}

impl History {
    /// Empty series bounded to `max_points`, clamped to
    /// `[1, MAX_POINTS_LIMIT]`.
    #[must_use]
    pub fn new(max_points: usize) -> Self {
        Self {
            points: VecDeque::new(),
            max_points: max_points.clamp(1, MAX_POINTS_LIMIT),
        }
    }

    /// Rebuild a series from persisted points, keeping only the newest
    /// `max_points` of them.
    #[must_use]
    pub fn from_points(points: Vec<HistoryPoint>, max_points: usize) -> Self {
        let mut history = Self::new(max_points);
        for point in points {
            history.push(point);
        }
        history
    }

    /// Append a point, evicting the oldest while over the bound.
    pub fn push(&mut self, point: HistoryPoint) {
        self.points.push_back(point);
        while self.points.len() > self.max_points {
            self.points.pop_front();
        }
    }

    /// Points in insertion order, oldest first.
    pub fn points(&self) -> impl Iterator<Item = &HistoryPoint> {
        self.points.iter()
    }

    /// Owned copy of the series for the persistence boundary.
    #[must_use]
    pub fn snapshot(&self) -> Vec<HistoryPoint> {
        self.points.iter().cloned().collect()
    }

    /// Number of retained points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The retention bound.
    #[must_use]
    pub const fn max_points(&self) -> usize {
        self.max_points
    }
}
