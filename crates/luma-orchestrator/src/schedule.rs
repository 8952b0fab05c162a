// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Weekly schedule provider.
//!
//! The persona's day is a table of time blocks per weekday; the current
//! activity is a pure lookup against the wall clock in the persona's
//! timezone. Gaps between blocks fall back to a configurable label.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, FixedOffset, NaiveTime, Utc, Weekday};

use luma_core::{LumaError, ScheduleProvider};

#[derive(Debug, Clone)]
struct TimeBlock {
    start: NaiveTime,
    end: NaiveTime,
    activity: String,
}

/// [`ScheduleProvider`] over a weekday/time-block table.
#[derive(Debug, Clone)]
pub struct WeekSchedule {
    blocks: HashMap<Weekday, Vec<TimeBlock>>,
    timezone: FixedOffset,
    fallback: String,
}

impl WeekSchedule {
    /// An empty schedule; every lookup returns the fallback label.
    pub fn new(timezone: FixedOffset, fallback: impl Into<String>) -> Self {
        Self {
            blocks: HashMap::new(),
            timezone,
            fallback: fallback.into(),
        }
    }

    /// Adds a `[start, end)` block. Times are `HH:MM` in the schedule's
    /// timezone.
    pub fn with_block(
        mut self,
        day: Weekday,
        start: &str,
        end: &str,
        activity: &str,
    ) -> Result<Self, LumaError> {
        let start = parse_time(start)?;
        let end = parse_time(end)?;
        if start >= end {
            return Err(LumaError::Config(format!(
                "schedule block must start before it ends, got {start}..{end}"
            )));
        }
        self.blocks.entry(day).or_default().push(TimeBlock {
            start,
            end,
            activity: activity.to_string(),
        });
        Ok(self)
    }
}

fn parse_time(value: &str) -> Result<NaiveTime, LumaError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|e| LumaError::Config(format!("invalid schedule time {value:?}: {e}")))
}

impl ScheduleProvider for WeekSchedule {
    fn current_activity(&self, now: DateTime<Utc>) -> String {
        let local = now.with_timezone(&self.timezone);
        let time = local.time();
        self.blocks
            .get(&local.weekday())
            .and_then(|day| {
                day.iter()
                    .find(|block| block.start <= time && time < block.end)
            })
            .map(|block| block.activity.clone())
            .unwrap_or_else(|| self.fallback.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> WeekSchedule {
        WeekSchedule::new(FixedOffset::east_opt(0).unwrap(), "Tiempo libre.")
            .with_block(Weekday::Mon, "09:00", "10:00", "Sesión virtual del curso.")
            .unwrap()
            .with_block(Weekday::Mon, "10:00", "12:00", "Seguimiento de mensajes.")
            .unwrap()
            .with_block(Weekday::Tue, "11:00", "12:00", "Sesión del grupo de España.")
            .unwrap()
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn looks_up_the_block_containing_now() {
        let schedule = sample();
        // 2026-08-24 is a Monday.
        assert_eq!(
            schedule.current_activity(utc(2026, 8, 24, 9, 30)),
            "Sesión virtual del curso."
        );
        assert_eq!(
            schedule.current_activity(utc(2026, 8, 24, 11, 59)),
            "Seguimiento de mensajes."
        );
    }

    #[test]
    fn block_bounds_are_inclusive_exclusive() {
        let schedule = sample();
        assert_eq!(
            schedule.current_activity(utc(2026, 8, 24, 9, 0)),
            "Sesión virtual del curso."
        );
        // End of the last block is outside it.
        assert_eq!(
            schedule.current_activity(utc(2026, 8, 24, 12, 0)),
            "Tiempo libre."
        );
    }

    #[test]
    fn outside_any_block_falls_back() {
        let schedule = sample();
        assert_eq!(
            schedule.current_activity(utc(2026, 8, 24, 20, 0)),
            "Tiempo libre."
        );
        // Wednesday has no blocks at all.
        assert_eq!(
            schedule.current_activity(utc(2026, 8, 26, 10, 0)),
            "Tiempo libre."
        );
    }

    #[test]
    fn lookup_respects_the_timezone() {
        let schedule = WeekSchedule::new(
            FixedOffset::west_opt(6 * 3600).unwrap(),
            "Tiempo libre.",
        )
        .with_block(Weekday::Mon, "09:00", "10:00", "Sesión.")
        .unwrap();

        // 15:30 UTC on Monday is 09:30 local at UTC-6.
        assert_eq!(schedule.current_activity(utc(2026, 8, 24, 15, 30)), "Sesión.");
        assert_eq!(
            schedule.current_activity(utc(2026, 8, 24, 9, 30)),
            "Tiempo libre."
        );
    }

    #[test]
    fn invalid_times_are_config_errors() {
        let base = WeekSchedule::new(FixedOffset::east_opt(0).unwrap(), "libre");
        assert!(base
            .clone()
            .with_block(Weekday::Mon, "25:00", "26:00", "x")
            .is_err());
        assert!(base
            .with_block(Weekday::Mon, "10:00", "09:00", "x")
            .is_err());
    }
}
