//! Ritual business logic - recurring value-aligned practices.
//!
//! A ritual's completion is tracked per period, and the period containing a
//! given calendar date depends on the ritual's frequency: the exact date for
//! daily rituals, the ISO week (Monday through Sunday) for weekly, the
//! calendar month for monthly, the calendar quarter for quarterly. Period
//! matching is bounded on both ends, so a future-dated row can never satisfy
//! an earlier period.

use crate::core::dates;
use crate::entities::{
    Ritual, RitualCompletion, Value, ritual, ritual::Frequency, ritual_completion, value,
};
use crate::errors::{Error, Result};
use chrono::{Datelike, Days, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;

/// Inclusive first and last calendar day of the period containing `date`.
#[must_use]
pub fn period_bounds(frequency: Frequency, date: NaiveDate) -> (NaiveDate, NaiveDate) {
    match frequency {
        Frequency::Daily => (date, date),
        Frequency::Weekly => {
            let start = dates::monday_of(date);
            (start, start + Days::new(6))
        }
        Frequency::Monthly => {
            // Day 1 of the current and next month are always valid dates
            let start = date.with_day(1).unwrap_or(date);
            let next = if date.month() == 12 {
                NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
            } else {
                NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
            };
            (start, next.map_or(date, |n| n - Days::new(1)))
        }
        Frequency::Quarterly => {
            let start = dates::quarter_start_of(date);
            let (next_q, next_y) = match dates::quarter_of(date) {
                4 => (1, date.year() + 1),
                q => (q + 1, date.year()),
            };
            let next = dates::quarter_start(next_q, next_y);
            (start, next.map_or(date, |n| n - Days::new(1)))
        }
    }
}

/// Creates a new ritual, optionally anchored to one of the user's values.
pub async fn create_ritual(
    db: &DatabaseConnection,
    user_id: &str,
    name: &str,
    description: Option<String>,
    frequency: Frequency,
    value_id: Option<i64>,
) -> Result<ritual::Model> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Config {
            message: "Ritual name cannot be empty".to_string(),
        });
    }

    let existing = get_rituals(db, user_id).await?;
    if existing
        .iter()
        .any(|r| r.name.to_lowercase() == name.to_lowercase())
    {
        return Err(Error::Config {
            message: format!("A ritual named '{name}' already exists"),
        });
    }

    if let Some(value_id) = value_id {
        Value::find_by_id(value_id)
            .filter(value::Column::UserId.eq(user_id))
            .one(db)
            .await?
            .ok_or_else(|| Error::NotFound {
                entity: "value",
                id: value_id.to_string(),
            })?;
    }

    let model = ritual::ActiveModel {
        user_id: Set(user_id.to_string()),
        name: Set(name.to_string()),
        description: Set(description),
        frequency: Set(frequency),
        value_id: Set(value_id),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(user_id, ritual_id = model.id, name = %model.name, "created ritual");
    Ok(model)
}

/// Retrieves all rituals for a user, oldest first.
pub async fn get_rituals(db: &DatabaseConnection, user_id: &str) -> Result<Vec<ritual::Model>> {
    Ritual::find()
        .filter(ritual::Column::UserId.eq(user_id))
        .order_by_asc(ritual::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Resolves a ritual the caller expects to exist.
async fn require_ritual(
    db: &DatabaseConnection,
    user_id: &str,
    ritual_id: i64,
) -> Result<ritual::Model> {
    Ritual::find_by_id(ritual_id)
        .filter(ritual::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "ritual",
            id: ritual_id.to_string(),
        })
}

/// Deletes a ritual and all of its completion rows.
pub async fn delete_ritual(db: &DatabaseConnection, user_id: &str, ritual_id: i64) -> Result<()> {
    let existing = require_ritual(db, user_id, ritual_id).await?;

    let txn = db.begin().await?;
    RitualCompletion::delete_many()
        .filter(ritual_completion::Column::RitualId.eq(existing.id))
        .exec(&txn)
        .await?;
    Ritual::delete_by_id(existing.id).exec(&txn).await?;
    txn.commit().await?;

    info!(user_id, ritual_id, "deleted ritual and its completions");
    Ok(())
}

/// Finds the completion row for the period containing `date`, if any.
async fn completion_in_period(
    db: &DatabaseConnection,
    ritual: &ritual::Model,
    date: NaiveDate,
) -> Result<Option<ritual_completion::Model>> {
    let (start, end) = period_bounds(ritual.frequency, date);
    RitualCompletion::find()
        .filter(ritual_completion::Column::RitualId.eq(ritual.id))
        .filter(ritual_completion::Column::Date.between(start, end))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Records the completion state of a ritual for the period containing `date`.
///
/// At most one row exists per (ritual, period): a second marking inside the
/// same week/month/quarter updates the existing row in place rather than
/// inserting another.
pub async fn set_completion_for(
    db: &DatabaseConnection,
    user_id: &str,
    ritual_id: i64,
    date: NaiveDate,
    completed: bool,
) -> Result<ritual_completion::Model> {
    let ritual = require_ritual(db, user_id, ritual_id).await?;

    match completion_in_period(db, &ritual, date).await? {
        Some(existing) => {
            let mut model: ritual_completion::ActiveModel = existing.into();
            model.completed = Set(completed);
            model.update(db).await.map_err(Into::into)
        }
        None => ritual_completion::ActiveModel {
            ritual_id: Set(ritual_id),
            user_id: Set(user_id.to_string()),
            date: Set(date),
            completed: Set(completed),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(Into::into),
    }
}

/// Whether the ritual is completed for the period containing `date`.
pub async fn is_completed_for(
    db: &DatabaseConnection,
    user_id: &str,
    ritual_id: i64,
    date: NaiveDate,
) -> Result<bool> {
    let ritual = require_ritual(db, user_id, ritual_id).await?;
    let row = completion_in_period(db, &ritual, date).await?;
    Ok(row.is_some_and(|c| c.completed))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_bounds_daily() {
        let d = date(2024, 5, 15);
        assert_eq!(period_bounds(Frequency::Daily, d), (d, d));
    }

    #[test]
    fn test_period_bounds_weekly_monday_through_sunday() {
        // 2024-05-15 is a Wednesday; its ISO week is May 13 (Mon) - May 19 (Sun)
        let bounds = period_bounds(Frequency::Weekly, date(2024, 5, 15));
        assert_eq!(bounds, (date(2024, 5, 13), date(2024, 5, 19)));

        // A Sunday belongs to the week that started six days earlier
        let bounds = period_bounds(Frequency::Weekly, date(2024, 5, 19));
        assert_eq!(bounds, (date(2024, 5, 13), date(2024, 5, 19)));
    }

    #[test]
    fn test_period_bounds_monthly() {
        let bounds = period_bounds(Frequency::Monthly, date(2024, 2, 15));
        assert_eq!(bounds, (date(2024, 2, 1), date(2024, 2, 29))); // leap year

        let bounds = period_bounds(Frequency::Monthly, date(2024, 12, 31));
        assert_eq!(bounds, (date(2024, 12, 1), date(2024, 12, 31)));
    }

    #[test]
    fn test_period_bounds_quarterly() {
        let bounds = period_bounds(Frequency::Quarterly, date(2024, 8, 23));
        assert_eq!(bounds, (date(2024, 7, 1), date(2024, 9, 30)));

        let bounds = period_bounds(Frequency::Quarterly, date(2024, 11, 1));
        assert_eq!(bounds, (date(2024, 10, 1), date(2024, 12, 31)));
    }

    #[tokio::test]
    async fn test_create_ritual_requires_owned_value() -> Result<()> {
        let db = setup_test_db().await?;

        let value = create_test_value(&db, "Craft").await?;
        let ritual = create_ritual(
            &db,
            TEST_USER,
            "Weekly review",
            None,
            Frequency::Weekly,
            Some(value.id),
        )
        .await?;
        assert_eq!(ritual.value_id, Some(value.id));

        let result = create_ritual(
            &db,
            TEST_USER,
            "Broken anchor",
            None,
            Frequency::Daily,
            Some(999),
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_ritual_rejects_duplicate_names() -> Result<()> {
        let db = setup_test_db().await?;

        create_test_ritual(&db, "Weekly review", Frequency::Weekly).await?;
        let result = create_test_ritual(&db, "weekly REVIEW", Frequency::Daily).await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_weekly_completion_visible_all_week() -> Result<()> {
        let db = setup_test_db().await?;
        let ritual = create_test_ritual(&db, "Weekly review", Frequency::Weekly).await?;

        // Completed on Wednesday May 15
        set_completion_for(&db, TEST_USER, ritual.id, date(2024, 5, 15), true).await?;

        // Visible from Monday through Sunday of that ISO week
        for day in 13..=19 {
            assert!(
                is_completed_for(&db, TEST_USER, ritual.id, date(2024, 5, day)).await?,
                "expected completion visible on May {day}"
            );
        }

        // Invisible from the adjacent weeks
        assert!(!is_completed_for(&db, TEST_USER, ritual.id, date(2024, 5, 12)).await?);
        assert!(!is_completed_for(&db, TEST_USER, ritual.id, date(2024, 5, 20)).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_future_dated_row_never_matches_earlier_week() -> Result<()> {
        let db = setup_test_db().await?;
        let ritual = create_test_ritual(&db, "Weekly review", Frequency::Weekly).await?;

        // A row dated in a later week (e.g., clock skew or manual edit)
        set_completion_for(&db, TEST_USER, ritual.id, date(2024, 5, 22), true).await?;

        // Must not satisfy the week of May 13-19
        assert!(!is_completed_for(&db, TEST_USER, ritual.id, date(2024, 5, 15)).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_second_marking_same_period_updates_in_place() -> Result<()> {
        let db = setup_test_db().await?;
        let ritual = create_test_ritual(&db, "Weekly review", Frequency::Weekly).await?;

        let first = set_completion_for(&db, TEST_USER, ritual.id, date(2024, 5, 15), true).await?;
        // Un-marking later the same week touches the same row
        let second = set_completion_for(&db, TEST_USER, ritual.id, date(2024, 5, 17), false).await?;

        assert_eq!(first.id, second.id);
        assert!(!second.completed);

        let rows = RitualCompletion::find()
            .filter(ritual_completion::Column::RitualId.eq(ritual.id))
            .all(&db)
            .await?;
        assert_eq!(rows.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_daily_ritual_periods_are_independent_days() -> Result<()> {
        let db = setup_test_db().await?;
        let ritual = create_test_ritual(&db, "Morning pages", Frequency::Daily).await?;

        set_completion_for(&db, TEST_USER, ritual.id, date(2024, 5, 15), true).await?;

        assert!(is_completed_for(&db, TEST_USER, ritual.id, date(2024, 5, 15)).await?);
        assert!(!is_completed_for(&db, TEST_USER, ritual.id, date(2024, 5, 16)).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_ritual_cascades() -> Result<()> {
        let db = setup_test_db().await?;
        let ritual = create_test_ritual(&db, "Weekly review", Frequency::Weekly).await?;
        set_completion_for(&db, TEST_USER, ritual.id, date(2024, 5, 15), true).await?;

        delete_ritual(&db, TEST_USER, ritual.id).await?;

        let orphans = RitualCompletion::find()
            .filter(ritual_completion::Column::RitualId.eq(ritual.id))
            .all(&db)
            .await?;
        assert!(orphans.is_empty());

        Ok(())
    }
}
