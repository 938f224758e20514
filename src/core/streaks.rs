//! Streak and completion-rate engine.
//!
//! Pure functions over per-day completion records. Every function takes the
//! as-of date explicitly instead of reading the clock, which makes the whole
//! module deterministic and directly testable. Empty or absent input always
//! produces a zero/default result, never an error.

use crate::entities::{completion, ritual_completion};
use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

/// Default heatmap window shown on habit cards.
pub const HEATMAP_WINDOW_DAYS: u32 = 30;

/// One calendar day's completion state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayRecord {
    /// The calendar date
    pub date: NaiveDate,
    /// Whether the tracked item was done that day
    pub completed: bool,
}

impl From<&completion::Model> for DayRecord {
    fn from(model: &completion::Model) -> Self {
        Self {
            date: model.date,
            completed: model.completed,
        }
    }
}

impl From<&ritual_completion::Model> for DayRecord {
    fn from(model: &ritual_completion::Model) -> Self {
        Self {
            date: model.date,
            completed: model.completed,
        }
    }
}

/// Set of days with a `completed: true` record.
fn completed_days(records: &[DayRecord]) -> Vec<NaiveDate> {
    let mut days: Vec<NaiveDate> = records
        .iter()
        .filter(|r| r.completed)
        .map(|r| r.date)
        .collect();
    days.sort_unstable();
    days.dedup();
    days
}

/// Count of consecutive completed days ending at `today`.
///
/// Yesterday is an allowed anchor: a user who has not yet acted today keeps
/// their streak. A most recent completion older than yesterday means the
/// streak is broken and the count is 0.
#[must_use]
pub fn current_streak(records: &[DayRecord], today: NaiveDate) -> u32 {
    let days = completed_days(records);
    let Some(&most_recent) = days.last() else {
        return 0;
    };

    let yesterday = today - Days::new(1);
    if most_recent != today && most_recent != yesterday {
        return 0;
    }

    let mut streak = 0;
    let mut cursor = most_recent;
    for &day in days.iter().rev() {
        if day == cursor {
            streak += 1;
            cursor = cursor - Days::new(1);
        } else {
            break;
        }
    }

    streak
}

/// Longest run of consecutive completed days anywhere in history.
///
/// Returns 0 for no completed records, otherwise at least 1.
#[must_use]
pub fn longest_streak(records: &[DayRecord]) -> u32 {
    let days = completed_days(records);
    if days.is_empty() {
        return 0;
    }

    let mut longest = 1;
    let mut run = 1;
    for pair in days.windows(2) {
        if (pair[1] - pair[0]).num_days() == 1 {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 1;
        }
    }

    longest
}

/// Fraction of days completed since `created_on`, in `[0, 1]`.
///
/// The denominator is the count of calendar days from `created_on` through
/// `today` inclusive. Clamped to 1.0 so duplicate or erroneous rows can never
/// report more than full completion. `None` for `created_on` yields 0.
#[must_use]
pub fn completion_rate(
    records: &[DayRecord],
    created_on: Option<NaiveDate>,
    today: NaiveDate,
) -> f64 {
    let Some(created) = created_on else {
        return 0.0;
    };

    let elapsed_days = (today - created).num_days() + 1;
    if elapsed_days <= 0 {
        return 0.0;
    }

    let done = records.iter().filter(|r| r.completed).count();

    // Counts are far below f64's integer precision limit
    #[allow(clippy::cast_precision_loss)]
    let rate = done as f64 / elapsed_days as f64;
    rate.min(1.0)
}

/// Completion state for each of the most recent `window_days` calendar days,
/// oldest first, last entry dated `today`. Days without a record come back
/// `completed: false`.
#[must_use]
pub fn heatmap_series(records: &[DayRecord], window_days: u32, today: NaiveDate) -> Vec<DayRecord> {
    let mut by_date: HashMap<NaiveDate, bool> = HashMap::with_capacity(records.len());
    for record in records {
        // First record for a date wins, matching lookup order upstream
        by_date.entry(record.date).or_insert(record.completed);
    }

    (0..window_days)
        .rev()
        .map(|back| {
            let date = today - Days::new(u64::from(back));
            DayRecord {
                date,
                completed: by_date.get(&date).copied().unwrap_or(false),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn done(y: i32, m: u32, d: u32) -> DayRecord {
        DayRecord {
            date: date(y, m, d),
            completed: true,
        }
    }

    fn skipped(y: i32, m: u32, d: u32) -> DayRecord {
        DayRecord {
            date: date(y, m, d),
            completed: false,
        }
    }

    #[test]
    fn test_current_streak_empty() {
        assert_eq!(current_streak(&[], date(2024, 1, 5)), 0);
    }

    #[test]
    fn test_current_streak_only_skipped_records() {
        let records = [skipped(2024, 1, 4), skipped(2024, 1, 5)];
        assert_eq!(current_streak(&records, date(2024, 1, 5)), 0);
    }

    #[test]
    fn test_current_streak_five_consecutive_days() {
        let records = [
            done(2024, 1, 1),
            done(2024, 1, 2),
            done(2024, 1, 3),
            done(2024, 1, 4),
            done(2024, 1, 5),
        ];
        assert_eq!(current_streak(&records, date(2024, 1, 5)), 5);
    }

    #[test]
    fn test_current_streak_gap_resets_to_trailing_run() {
        // Missing Jan 3: streak on Jan 5 covers only Jan 4-5
        let records = [
            done(2024, 1, 1),
            done(2024, 1, 2),
            done(2024, 1, 4),
            done(2024, 1, 5),
        ];
        assert_eq!(current_streak(&records, date(2024, 1, 5)), 2);
        assert_eq!(longest_streak(&records), 2);
    }

    #[test]
    fn test_current_streak_yesterday_anchor_keeps_streak() {
        let records = [done(2024, 1, 3), done(2024, 1, 4)];
        assert_eq!(current_streak(&records, date(2024, 1, 5)), 2);
    }

    #[test]
    fn test_current_streak_broken_when_older_than_yesterday() {
        let records = [done(2024, 1, 1), done(2024, 1, 2), done(2024, 1, 3)];
        assert_eq!(current_streak(&records, date(2024, 1, 5)), 0);
    }

    #[test]
    fn test_current_streak_monotone_in_trailing_days() {
        let mut records = vec![done(2024, 1, 10)];
        let mut previous = current_streak(&records, date(2024, 1, 10));
        for d in 11..=20 {
            records.push(done(2024, 1, d));
            let next = current_streak(&records, date(2024, 1, d));
            assert!(next >= previous);
            previous = next;
        }
        assert_eq!(previous, 11);
    }

    #[test]
    fn test_current_streak_at_least_one_when_today_completed() {
        let records = [done(2024, 6, 15)];
        assert!(current_streak(&records, date(2024, 6, 15)) >= 1);
    }

    #[test]
    fn test_longest_streak_empty_and_single() {
        assert_eq!(longest_streak(&[]), 0);
        assert_eq!(longest_streak(&[done(2024, 1, 1)]), 1);
    }

    #[test]
    fn test_longest_streak_picks_maximum_run() {
        let records = [
            done(2024, 1, 1),
            done(2024, 1, 2),
            done(2024, 1, 3),
            done(2024, 1, 7),
            done(2024, 1, 8),
        ];
        assert_eq!(longest_streak(&records), 3);
    }

    #[test]
    fn test_longest_streak_never_below_current() {
        let records = [
            done(2024, 1, 1),
            done(2024, 1, 2),
            done(2024, 1, 4),
            done(2024, 1, 5),
            done(2024, 1, 6),
        ];
        let today = date(2024, 1, 6);
        assert!(longest_streak(&records) >= current_streak(&records, today));
    }

    #[test]
    fn test_completion_rate_full() {
        let records = [
            done(2024, 1, 1),
            done(2024, 1, 2),
            done(2024, 1, 3),
            done(2024, 1, 4),
            done(2024, 1, 5),
        ];
        let rate = completion_rate(&records, Some(date(2024, 1, 1)), date(2024, 1, 5));
        assert_eq!(rate, 1.0);
    }

    #[test]
    fn test_completion_rate_partial() {
        // 4 completed days over a 5-day window
        let records = [
            done(2024, 1, 1),
            done(2024, 1, 2),
            done(2024, 1, 4),
            done(2024, 1, 5),
        ];
        let rate = completion_rate(&records, Some(date(2024, 1, 1)), date(2024, 1, 5));
        assert_eq!(rate, 0.8);
    }

    #[test]
    fn test_completion_rate_clamped_to_one() {
        // Duplicate rows exceed elapsed days; still clamps
        let records = [done(2024, 1, 1), done(2024, 1, 1), done(2024, 1, 1)];
        let rate = completion_rate(&records, Some(date(2024, 1, 1)), date(2024, 1, 1));
        assert_eq!(rate, 1.0);
    }

    #[test]
    fn test_completion_rate_without_creation_date() {
        assert_eq!(completion_rate(&[done(2024, 1, 1)], None, date(2024, 1, 5)), 0.0);
    }

    #[test]
    fn test_completion_rate_created_in_future() {
        let rate = completion_rate(&[], Some(date(2024, 1, 10)), date(2024, 1, 5));
        assert_eq!(rate, 0.0);
    }

    #[test]
    fn test_heatmap_series_shape() {
        let today = date(2024, 3, 15);
        let series = heatmap_series(&[], 30, today);
        assert_eq!(series.len(), 30);
        assert_eq!(series.last().unwrap().date, today);
        assert_eq!(series.first().unwrap().date, date(2024, 2, 15));
        assert!(series.iter().all(|r| !r.completed));
    }

    #[test]
    fn test_heatmap_series_marks_completed_days() {
        let today = date(2024, 1, 10);
        let records = [done(2024, 1, 8), skipped(2024, 1, 9), done(2024, 1, 10)];
        let series = heatmap_series(&records, 5, today);
        assert_eq!(series.len(), 5);
        let by_date: Vec<(NaiveDate, bool)> = series.iter().map(|r| (r.date, r.completed)).collect();
        assert!(by_date.contains(&(date(2024, 1, 8), true)));
        assert!(by_date.contains(&(date(2024, 1, 9), false)));
        assert!(by_date.contains(&(date(2024, 1, 10), true)));
        // Days before any record default to not completed
        assert!(by_date.contains(&(date(2024, 1, 6), false)));
    }
}
