// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Schedule provider trait for the persona's situational context.

use chrono::{DateTime, Utc};

/// Yields the persona's current activity label as a pure function of
/// wall-clock time. Never fails and never blocks.
pub trait ScheduleProvider: Send + Sync {
    fn current_activity(&self, now: DateTime<Utc>) -> String;
}
