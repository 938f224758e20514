//! Habit business logic - Discipline layer operations.
//!
//! Provides functions for creating, retrieving, and deleting habits, for
//! recording per-day completions with upsert semantics, and for deriving the
//! per-habit statistics shown on habit cards.

use crate::core::dates;
use crate::core::streaks::{self, DayRecord, HEATMAP_WINDOW_DAYS};
use crate::entities::{Completion, Habit, completion, habit, habit::HabitCategory};
use crate::errors::{Error, Result};
use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;

/// Derived statistics for one habit, as of a given date.
#[derive(Debug, Clone)]
pub struct HabitStats {
    /// Consecutive completed days ending today or yesterday
    pub current_streak: u32,
    /// Longest completed run anywhere in history
    pub longest_streak: u32,
    /// Fraction of days completed since creation, in `[0, 1]`
    pub completion_rate: f64,
    /// Last [`HEATMAP_WINDOW_DAYS`] days of completion state, oldest first
    pub heatmap: Vec<DayRecord>,
}

/// Creates a new habit for a user, validating the name.
pub async fn create_habit(
    db: &DatabaseConnection,
    user_id: &str,
    name: &str,
    description: Option<String>,
    color: &str,
    category: HabitCategory,
    sort_order: i32,
) -> Result<habit::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Habit name cannot be empty".to_string(),
        });
    }

    let model = habit::ActiveModel {
        user_id: Set(user_id.to_string()),
        name: Set(name.trim().to_string()),
        description: Set(description),
        color: Set(color.to_string()),
        category: Set(category),
        sort_order: Set(sort_order),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(user_id, habit_id = model.id, name = %model.name, "created habit");
    Ok(model)
}

/// Retrieves all habits for a user, ordered by their list position.
pub async fn get_habits(db: &DatabaseConnection, user_id: &str) -> Result<Vec<habit::Model>> {
    Habit::find()
        .filter(habit::Column::UserId.eq(user_id))
        .order_by_asc(habit::Column::SortOrder)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds one of the user's habits by id, returning `None` when it does not
/// exist or belongs to another user.
pub async fn get_habit(
    db: &DatabaseConnection,
    user_id: &str,
    habit_id: i64,
) -> Result<Option<habit::Model>> {
    Habit::find_by_id(habit_id)
        .filter(habit::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Resolves a habit the caller expects to exist.
async fn require_habit(
    db: &DatabaseConnection,
    user_id: &str,
    habit_id: i64,
) -> Result<habit::Model> {
    get_habit(db, user_id, habit_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "habit",
            id: habit_id.to_string(),
        })
}

/// Updates a habit's editable fields.
pub async fn update_habit(
    db: &DatabaseConnection,
    user_id: &str,
    habit_id: i64,
    name: &str,
    description: Option<String>,
    color: &str,
    category: HabitCategory,
) -> Result<habit::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Habit name cannot be empty".to_string(),
        });
    }

    let existing = require_habit(db, user_id, habit_id).await?;

    let mut model: habit::ActiveModel = existing.into();
    model.name = Set(name.trim().to_string());
    model.description = Set(description);
    model.color = Set(color.to_string());
    model.category = Set(category);
    model.update(db).await.map_err(Into::into)
}

/// Deletes a habit and all of its completions.
///
/// Runs in a transaction so a failure cannot orphan completion rows.
pub async fn delete_habit(db: &DatabaseConnection, user_id: &str, habit_id: i64) -> Result<()> {
    let existing = require_habit(db, user_id, habit_id).await?;

    let txn = db.begin().await?;
    Completion::delete_many()
        .filter(completion::Column::HabitId.eq(existing.id))
        .exec(&txn)
        .await?;
    Habit::delete_by_id(existing.id).exec(&txn).await?;
    txn.commit().await?;

    info!(user_id, habit_id, "deleted habit and its completions");
    Ok(())
}

/// Records a completion state for one habit on one calendar date.
///
/// Upserts on `(habit_id, date)`: marking the same day twice updates the
/// existing row instead of inserting a duplicate.
pub async fn set_completion(
    db: &DatabaseConnection,
    user_id: &str,
    habit_id: i64,
    date: NaiveDate,
    completed: bool,
) -> Result<completion::Model> {
    require_habit(db, user_id, habit_id).await?;

    let model = completion::ActiveModel {
        habit_id: Set(habit_id),
        user_id: Set(user_id.to_string()),
        date: Set(date),
        completed: Set(completed),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    Completion::insert(model)
        .on_conflict(
            OnConflict::columns([completion::Column::HabitId, completion::Column::Date])
                .update_columns([completion::Column::Completed])
                .to_owned(),
        )
        .exec_with_returning(db)
        .await
        .map_err(Into::into)
}

/// Flips the completion state for one habit on one date.
///
/// An unmarked day becomes completed; a marked day flips its flag.
pub async fn toggle_completion(
    db: &DatabaseConnection,
    user_id: &str,
    habit_id: i64,
    date: NaiveDate,
) -> Result<completion::Model> {
    let existing = Completion::find()
        .filter(completion::Column::HabitId.eq(habit_id))
        .filter(completion::Column::Date.eq(date))
        .one(db)
        .await?;

    let next = existing.is_none_or(|c| !c.completed);
    set_completion(db, user_id, habit_id, date, next).await
}

/// All completion rows for one habit, oldest first.
pub async fn get_completions(
    db: &DatabaseConnection,
    user_id: &str,
    habit_id: i64,
) -> Result<Vec<completion::Model>> {
    Completion::find()
        .filter(completion::Column::UserId.eq(user_id))
        .filter(completion::Column::HabitId.eq(habit_id))
        .order_by_asc(completion::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Whether the habit has a `completed: true` record for `date`.
pub async fn completed_on(
    db: &DatabaseConnection,
    user_id: &str,
    habit_id: i64,
    date: NaiveDate,
) -> Result<bool> {
    let row = Completion::find()
        .filter(completion::Column::UserId.eq(user_id))
        .filter(completion::Column::HabitId.eq(habit_id))
        .filter(completion::Column::Date.eq(date))
        .one(db)
        .await?;

    Ok(row.is_some_and(|c| c.completed))
}

/// Derives the card statistics for one habit as of `today`.
pub async fn habit_stats(
    db: &DatabaseConnection,
    user_id: &str,
    habit_id: i64,
    today: NaiveDate,
) -> Result<HabitStats> {
    let habit = require_habit(db, user_id, habit_id).await?;
    let completions = get_completions(db, user_id, habit_id).await?;
    let records: Vec<DayRecord> = completions.iter().map(DayRecord::from).collect();

    let created_on = Some(dates::local_date_of(habit.created_at));

    Ok(HabitStats {
        current_streak: streaks::current_streak(&records, today),
        longest_streak: streaks::longest_streak(&records),
        completion_rate: streaks::completion_rate(&records, created_on, today),
        heatmap: streaks::heatmap_series(&records, HEATMAP_WINDOW_DAYS, today),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_habit_validates_name() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_habit(
            &db,
            TEST_USER,
            "   ",
            None,
            "#10B981",
            HabitCategory::Body,
            0,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_and_list_habits_ordered() -> Result<()> {
        let db = setup_test_db().await?;

        create_habit(&db, TEST_USER, "Read", None, "#3B82F6", HabitCategory::Mind, 1).await?;
        create_habit(&db, TEST_USER, "Walk", None, "#10B981", HabitCategory::Body, 0).await?;

        let habits = get_habits(&db, TEST_USER).await?;
        assert_eq!(habits.len(), 2);
        assert_eq!(habits[0].name, "Walk");
        assert_eq!(habits[1].name, "Read");

        Ok(())
    }

    #[tokio::test]
    async fn test_habits_scoped_to_user() -> Result<()> {
        let db = setup_test_db().await?;

        let habit = create_test_habit(&db, "Walk").await?;

        assert!(get_habit(&db, "somebody_else", habit.id).await?.is_none());
        assert!(get_habits(&db, "somebody_else").await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_set_completion_upserts() -> Result<()> {
        let db = setup_test_db().await?;
        let habit = create_test_habit(&db, "Walk").await?;
        let date = test_date(2024, 1, 3);

        let first = set_completion(&db, TEST_USER, habit.id, date, true).await?;
        assert!(first.completed);

        // Same (habit, date): flips in place, no second row
        let second = set_completion(&db, TEST_USER, habit.id, date, false).await?;
        assert!(!second.completed);

        let all = get_completions(&db, TEST_USER, habit.id).await?;
        assert_eq!(all.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_set_completion_unknown_habit() -> Result<()> {
        let db = setup_test_db().await?;

        let result = set_completion(&db, TEST_USER, 999, test_date(2024, 1, 3), true).await;
        assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_completion_cycle() -> Result<()> {
        let db = setup_test_db().await?;
        let habit = create_test_habit(&db, "Walk").await?;
        let date = test_date(2024, 1, 3);

        assert!(!completed_on(&db, TEST_USER, habit.id, date).await?);

        let toggled = toggle_completion(&db, TEST_USER, habit.id, date).await?;
        assert!(toggled.completed);
        assert!(completed_on(&db, TEST_USER, habit.id, date).await?);

        let toggled = toggle_completion(&db, TEST_USER, habit.id, date).await?;
        assert!(!toggled.completed);
        assert!(!completed_on(&db, TEST_USER, habit.id, date).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_habit_cascades_to_completions() -> Result<()> {
        let db = setup_test_db().await?;
        let habit = create_test_habit(&db, "Walk").await?;
        add_completion(&db, habit.id, test_date(2024, 1, 1), true).await?;
        add_completion(&db, habit.id, test_date(2024, 1, 2), true).await?;

        delete_habit(&db, TEST_USER, habit.id).await?;

        assert!(get_habit(&db, TEST_USER, habit.id).await?.is_none());
        let orphans = Completion::find()
            .filter(completion::Column::HabitId.eq(habit.id))
            .all(&db)
            .await?;
        assert!(orphans.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_update_habit_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let habit = create_test_habit(&db, "Walk").await?;

        let updated = update_habit(
            &db,
            TEST_USER,
            habit.id,
            "Morning walk",
            Some("20 minutes".to_string()),
            "#EC4899",
            HabitCategory::Heart,
        )
        .await?;

        assert_eq!(updated.name, "Morning walk");
        assert_eq!(updated.description.as_deref(), Some("20 minutes"));
        assert_eq!(updated.category, HabitCategory::Heart);
        assert_eq!(updated.sort_order, habit.sort_order);

        Ok(())
    }

    #[tokio::test]
    async fn test_habit_stats_full_streak() -> Result<()> {
        let db = setup_test_db().await?;
        let habit = create_test_habit(&db, "Walk").await?;

        // Five consecutive completed days; evaluate on the last one. The
        // habit row was created "now", so pick dates around today to keep the
        // completion-rate denominator meaningful.
        let today = crate::core::dates::today_local();
        for back in 0..5 {
            let date = today - chrono::Days::new(back);
            add_completion(&db, habit.id, date, true).await?;
        }

        let stats = habit_stats(&db, TEST_USER, habit.id, today).await?;
        assert_eq!(stats.current_streak, 5);
        assert_eq!(stats.longest_streak, 5);
        assert_eq!(stats.completion_rate, 1.0);
        assert_eq!(stats.heatmap.len(), HEATMAP_WINDOW_DAYS as usize);
        assert_eq!(stats.heatmap.last().unwrap().date, today);

        Ok(())
    }
}
