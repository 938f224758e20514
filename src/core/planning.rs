//! Planning business logic - the Control layer's weekly, daily, and
//! quarterly plans plus the evening shutdown ritual.
//!
//! Each plan kind is a singleton per period and user: writes are upserts
//! keyed on the normalized period start (Monday for weeks, the date itself
//! for days, the first day of the quarter for quarters). Re-saving a plan
//! updates it in place; `created_at` keeps the first save's instant.

use crate::core::dates;
use crate::entities::{
    DailyPlan, QuarterlyPlan, WeeklyPlan, daily_plan,
    daily_plan::{CheckMap, TimeBlocks},
    quarterly_plan, weekly_plan,
};
use crate::errors::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

/// Maximum number of big rocks on a weekly plan.
pub const MAX_BIG_ROCKS: usize = 5;
/// Maximum number of top priorities on a daily plan.
pub const MAX_TOP_PRIORITIES: usize = 3;
/// Allowed range of objectives on a quarterly plan.
pub const QUARTERLY_OBJECTIVES: std::ops::RangeInclusive<usize> = 3..=5;

/// The fixed evening shutdown checklist, in display order.
pub const SHUTDOWN_CHECK_IDS: [&str; 4] = ["inbox", "calendar", "tomorrow", "open_loops"];

/// Editable content of a daily plan, separate from shutdown state.
///
/// Shutdown fields are deliberately absent: re-saving the plan body never
/// clobbers checklist progress recorded earlier the same day.
#[derive(Debug, Clone, Default)]
pub struct DailyPlanDraft {
    /// Top priorities for the day, at most [`MAX_TOP_PRIORITIES`]
    pub top_priorities: Vec<String>,
    /// Ordered time blocks
    pub time_blocks: Vec<daily_plan::TimeBlock>,
    /// Free-text task capture
    pub tasks_notes: Option<String>,
    /// Free-text idea capture
    pub ideas_notes: Option<String>,
    /// Evening reflection
    pub reflection: Option<String>,
}

/// Writes the weekly plan for the week containing `date`.
///
/// Any day of the week addresses the same plan; the stored key is always the
/// week's Monday.
pub async fn upsert_weekly_plan(
    db: &DatabaseConnection,
    user_id: &str,
    date: NaiveDate,
    theme: Option<String>,
    big_rocks: Vec<String>,
) -> Result<weekly_plan::Model> {
    if big_rocks.len() > MAX_BIG_ROCKS {
        return Err(Error::Config {
            message: format!("A weekly plan holds at most {MAX_BIG_ROCKS} big rocks"),
        });
    }

    let week_start = dates::monday_of(date);
    let now = Utc::now();
    let model = weekly_plan::ActiveModel {
        user_id: Set(user_id.to_string()),
        week_start: Set(week_start),
        theme: Set(theme),
        big_rocks: Set(big_rocks.into()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let saved = WeeklyPlan::insert(model)
        .on_conflict(
            OnConflict::columns([weekly_plan::Column::UserId, weekly_plan::Column::WeekStart])
                .update_columns([
                    weekly_plan::Column::Theme,
                    weekly_plan::Column::BigRocks,
                    weekly_plan::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(db)
        .await?;

    info!(user_id, week_start = %week_start, "saved weekly plan");
    Ok(saved)
}

/// Fetches the weekly plan for the week containing `date`, if one exists.
pub async fn get_weekly_plan(
    db: &DatabaseConnection,
    user_id: &str,
    date: NaiveDate,
) -> Result<Option<weekly_plan::Model>> {
    WeeklyPlan::find()
        .filter(weekly_plan::Column::UserId.eq(user_id))
        .filter(weekly_plan::Column::WeekStart.eq(dates::monday_of(date)))
        .one(db)
        .await
        .map_err(Into::into)
}

/// All of a user's weekly plans, most recent week first.
pub async fn list_weekly_plans(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<weekly_plan::Model>> {
    WeeklyPlan::find()
        .filter(weekly_plan::Column::UserId.eq(user_id))
        .order_by_desc(weekly_plan::Column::WeekStart)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Writes the daily plan body for `date`.
///
/// Shutdown state on an existing plan is untouched.
pub async fn upsert_daily_plan(
    db: &DatabaseConnection,
    user_id: &str,
    date: NaiveDate,
    draft: DailyPlanDraft,
) -> Result<daily_plan::Model> {
    if draft.top_priorities.len() > MAX_TOP_PRIORITIES {
        return Err(Error::Config {
            message: format!("A daily plan holds at most {MAX_TOP_PRIORITIES} top priorities"),
        });
    }

    let now = Utc::now();
    let model = daily_plan::ActiveModel {
        user_id: Set(user_id.to_string()),
        date: Set(date),
        top_priorities: Set(draft.top_priorities.into()),
        reflection: Set(draft.reflection),
        tasks_notes: Set(draft.tasks_notes),
        ideas_notes: Set(draft.ideas_notes),
        time_blocks: Set(TimeBlocks(draft.time_blocks)),
        shutdown_complete: Set(None),
        shutdown_checks: Set(CheckMap::default()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    DailyPlan::insert(model)
        .on_conflict(
            OnConflict::columns([daily_plan::Column::UserId, daily_plan::Column::Date])
                .update_columns([
                    daily_plan::Column::TopPriorities,
                    daily_plan::Column::Reflection,
                    daily_plan::Column::TasksNotes,
                    daily_plan::Column::IdeasNotes,
                    daily_plan::Column::TimeBlocks,
                    daily_plan::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(db)
        .await
        .map_err(Into::into)
}

/// Fetches the daily plan for `date`, if one exists.
pub async fn get_daily_plan(
    db: &DatabaseConnection,
    user_id: &str,
    date: NaiveDate,
) -> Result<Option<daily_plan::Model>> {
    DailyPlan::find()
        .filter(daily_plan::Column::UserId.eq(user_id))
        .filter(daily_plan::Column::Date.eq(date))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Fetches the plan for `date`, creating an empty one when the shutdown
/// ritual runs before any plan body was written.
async fn ensure_daily_plan(
    db: &DatabaseConnection,
    user_id: &str,
    date: NaiveDate,
) -> Result<daily_plan::Model> {
    if let Some(existing) = get_daily_plan(db, user_id, date).await? {
        return Ok(existing);
    }
    upsert_daily_plan(db, user_id, date, DailyPlanDraft::default()).await
}

/// Records one shutdown checklist item's state on the plan for `date`.
pub async fn set_shutdown_check(
    db: &DatabaseConnection,
    user_id: &str,
    date: NaiveDate,
    check_id: &str,
    checked: bool,
) -> Result<daily_plan::Model> {
    if !SHUTDOWN_CHECK_IDS.contains(&check_id) {
        return Err(Error::Config {
            message: format!("Unknown shutdown check '{check_id}'"),
        });
    }

    let plan = ensure_daily_plan(db, user_id, date).await?;
    let mut checks = plan.shutdown_checks.clone();
    checks.0.insert(check_id.to_string(), checked);

    let mut model: daily_plan::ActiveModel = plan.into();
    model.shutdown_checks = Set(checks);
    model.updated_at = Set(Utc::now());
    model.update(db).await.map_err(Into::into)
}

/// Marks the shutdown ritual complete for `date` at the given instant.
pub async fn complete_shutdown(
    db: &DatabaseConnection,
    user_id: &str,
    date: NaiveDate,
    at: DateTime<Utc>,
) -> Result<daily_plan::Model> {
    let plan = ensure_daily_plan(db, user_id, date).await?;

    let mut model: daily_plan::ActiveModel = plan.into();
    model.shutdown_complete = Set(Some(at));
    model.updated_at = Set(Utc::now());
    let saved = model.update(db).await?;

    info!(user_id, date = %date, "shutdown complete");
    Ok(saved)
}

/// Writes the plan for the given calendar quarter.
pub async fn upsert_quarterly_plan(
    db: &DatabaseConnection,
    user_id: &str,
    quarter: u32,
    year: i32,
    objectives: Vec<String>,
    reflection: Option<String>,
) -> Result<quarterly_plan::Model> {
    let quarter_start = dates::quarter_start(quarter, year).ok_or_else(|| Error::Config {
        message: format!("Invalid quarter {quarter} of {year}"),
    })?;
    if !QUARTERLY_OBJECTIVES.contains(&objectives.len()) {
        return Err(Error::Config {
            message: format!(
                "A quarterly plan holds {} to {} objectives",
                QUARTERLY_OBJECTIVES.start(),
                QUARTERLY_OBJECTIVES.end()
            ),
        });
    }

    let now = Utc::now();
    let model = quarterly_plan::ActiveModel {
        user_id: Set(user_id.to_string()),
        quarter_start: Set(quarter_start),
        objectives: Set(objectives.into()),
        reflection: Set(reflection),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    QuarterlyPlan::insert(model)
        .on_conflict(
            OnConflict::columns([
                quarterly_plan::Column::UserId,
                quarterly_plan::Column::QuarterStart,
            ])
            .update_columns([
                quarterly_plan::Column::Objectives,
                quarterly_plan::Column::Reflection,
                quarterly_plan::Column::UpdatedAt,
            ])
            .to_owned(),
        )
        .exec_with_returning(db)
        .await
        .map_err(Into::into)
}

/// Fetches the plan for the given calendar quarter, if one exists.
pub async fn get_quarterly_plan(
    db: &DatabaseConnection,
    user_id: &str,
    quarter: u32,
    year: i32,
) -> Result<Option<quarterly_plan::Model>> {
    let quarter_start = dates::quarter_start(quarter, year).ok_or_else(|| Error::Config {
        message: format!("Invalid quarter {quarter} of {year}"),
    })?;
    QuarterlyPlan::find()
        .filter(quarterly_plan::Column::UserId.eq(user_id))
        .filter(quarterly_plan::Column::QuarterStart.eq(quarter_start))
        .one(db)
        .await
        .map_err(Into::into)
}
