// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timestamp labels for historical points
//!
//! Small seam so runner tests can pin labels instead of depending on the
//! wall clock.

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of timestamp labels for [`crate::history::HistoryPoint`]s.
pub trait Clock {
    /// A human-readable label for "now".
    fn timestamp_label(&self) -> String;
}

/// Wall-clock labels, `HH:MM:SS` in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn timestamp_label(&self) -> String {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());
        format_label(secs)
    }
}

fn format_label(epoch_secs: u64) -> String {
    let h = (epoch_secs / 3600) % 24;
    let m = (epoch_secs / 60) % 60;
    let s = epoch_secs % 60;
    format!("{h:02}:{m:02}:{s:02}")
}
