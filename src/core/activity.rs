//! Activity aggregation for the dashboard heatmap grid.
//!
//! Every record created anywhere in the system contributes exactly one count
//! to the local calendar date it was created on. The grid is rectangular:
//! whole weeks from the Sunday on or before the journey start through the
//! week containing today, with days past today flagged as future rather than
//! rendered as zero-activity.

use crate::core::dates;
use crate::entities::{
    Completion, DailyPlan, Habit, Milestone, RemarkableAspect, Ritual, Value, WeeklyPlan,
    completion, daily_plan, habit, milestone, remarkable_aspect, ritual, value, weekly_plan,
};
use crate::errors::Result;
use chrono::{DateTime, Days, NaiveDate, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Per-day activity counts keyed by local calendar date.
pub type ActivityTallies = BTreeMap<NaiveDate, u32>;

/// One cell of the week-by-week activity grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCell {
    /// The calendar date of this cell
    pub date: NaiveDate,
    /// Number of records created on that day
    pub count: u32,
    /// Whether the cell is past today (rendered distinctly, not as zero)
    pub in_future: bool,
}

/// Buckets creation instants into per-local-day counts.
///
/// Each instant contributes exactly 1; callers chain the instants from
/// however many collections they track. Tolerant of empty input.
pub fn tally_activity<I>(instants: I) -> ActivityTallies
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    let mut tallies = ActivityTallies::new();
    for instant in instants {
        *tallies.entry(dates::local_date_of(instant)).or_insert(0) += 1;
    }
    tallies
}

/// Builds the rectangular week grid from the journey start through today.
///
/// Weeks start on Sunday. With no journey start the grid covers just the
/// current week. Future days inside the final week keep their date but are
/// flagged `in_future`.
#[must_use]
pub fn activity_grid(
    tallies: &ActivityTallies,
    journey_start: Option<NaiveDate>,
    today: NaiveDate,
) -> Vec<Vec<DayCell>> {
    let start = dates::sunday_on_or_before(journey_start.unwrap_or(today).min(today));

    let mut weeks = Vec::new();
    let mut day = start;
    while day <= today {
        let week = (0..7)
            .map(|offset| {
                let date = day + Days::new(offset);
                DayCell {
                    date,
                    count: tallies.get(&date).copied().unwrap_or(0),
                    in_future: date > today,
                }
            })
            .collect();
        weeks.push(week);
        day = day + Days::new(7);
    }

    weeks
}

/// Loads the per-day activity tallies for one user.
///
/// Unions creation instants across all eight tracked tables with parallel
/// reads, then buckets them by local date.
pub async fn load_activity(db: &DatabaseConnection, user_id: &str) -> Result<ActivityTallies> {
    let (completions, habits, values, rituals, weekly_plans, daily_plans, aspects, milestones) =
        tokio::try_join!(
            Completion::find()
                .filter(completion::Column::UserId.eq(user_id))
                .select_only()
                .column(completion::Column::CreatedAt)
                .into_tuple::<DateTime<Utc>>()
                .all(db),
            Habit::find()
                .filter(habit::Column::UserId.eq(user_id))
                .select_only()
                .column(habit::Column::CreatedAt)
                .into_tuple::<DateTime<Utc>>()
                .all(db),
            Value::find()
                .filter(value::Column::UserId.eq(user_id))
                .select_only()
                .column(value::Column::CreatedAt)
                .into_tuple::<DateTime<Utc>>()
                .all(db),
            Ritual::find()
                .filter(ritual::Column::UserId.eq(user_id))
                .select_only()
                .column(ritual::Column::CreatedAt)
                .into_tuple::<DateTime<Utc>>()
                .all(db),
            WeeklyPlan::find()
                .filter(weekly_plan::Column::UserId.eq(user_id))
                .select_only()
                .column(weekly_plan::Column::CreatedAt)
                .into_tuple::<DateTime<Utc>>()
                .all(db),
            DailyPlan::find()
                .filter(daily_plan::Column::UserId.eq(user_id))
                .select_only()
                .column(daily_plan::Column::CreatedAt)
                .into_tuple::<DateTime<Utc>>()
                .all(db),
            RemarkableAspect::find()
                .filter(remarkable_aspect::Column::UserId.eq(user_id))
                .select_only()
                .column(remarkable_aspect::Column::CreatedAt)
                .into_tuple::<DateTime<Utc>>()
                .all(db),
            Milestone::find()
                .filter(milestone::Column::UserId.eq(user_id))
                .select_only()
                .column(milestone::Column::CreatedAt)
                .into_tuple::<DateTime<Utc>>()
                .all(db),
        )?;

    let tallies = tally_activity(
        completions
            .into_iter()
            .chain(habits)
            .chain(values)
            .chain(rituals)
            .chain(weekly_plans)
            .chain(daily_plans)
            .chain(aspects)
            .chain(milestones),
    );

    debug!(user_id, active_days = tallies.len(), "loaded activity tallies");

    Ok(tallies)
}
