//! Database configuration module for Stratum.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions via
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! structs. The composite unique indexes that back the upsert keys
//! (`(habit_id, date)`, `(user_id, week_start)`, and so on) are created
//! explicitly afterwards, since they span columns and cannot be expressed as
//! per-column attributes.

use crate::entities::{
    Completion, DailyPlan, Habit, Milestone, PersonalCode, QuarterlyPlan, RemarkableAspect, Ritual,
    RitualCompletion, Value, WeeklyPlan, completion, daily_plan, quarterly_plan, ritual_completion,
    weekly_plan,
};
use crate::errors::Result;
use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use std::path::Path;

/// Fallback database location; `mode=rwc` so a first launch creates the file
/// instead of failing to open it.
const DEFAULT_DATABASE_URL: &str = "sqlite://data/stratum.sqlite?mode=rwc";

/// Gets the database URL from environment variable or returns default `SQLite` path.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Connects to `url`, creating the parent directory for file-backed `SQLite`
/// databases first (`mode=rwc` creates the file but not the directory).
async fn connect(url: &str) -> Result<DatabaseConnection> {
    if let Some(rest) = url.strip_prefix("sqlite://") {
        let path = rest.split('?').next().unwrap_or(rest);
        if path != ":memory:" {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }
    }
    Database::connect(url).await.map_err(Into::into)
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL`
/// environment variable, falling back to a default local `SQLite` file.
pub async fn create_connection() -> Result<DatabaseConnection> {
    connect(&get_database_url()).await
}

/// Creates one entity's table if it does not already exist.
async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Creates all tables and upsert-key indexes.
///
/// Idempotent: every statement is `IF NOT EXISTS`, so calling this on every
/// launch against a persisted database is fine.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    create_table(db, Habit).await?;
    create_table(db, Completion).await?;
    create_table(db, Value).await?;
    create_table(db, Ritual).await?;
    create_table(db, RitualCompletion).await?;
    create_table(db, PersonalCode).await?;
    create_table(db, WeeklyPlan).await?;
    create_table(db, DailyPlan).await?;
    create_table(db, QuarterlyPlan).await?;
    create_table(db, RemarkableAspect).await?;
    create_table(db, Milestone).await?;

    // One record per period, enforced at the schema level so upserts can key
    // on these column pairs.
    let unique_indexes = [
        Index::create()
            .name("ux_completions_habit_date")
            .table(Completion)
            .col(completion::Column::HabitId)
            .col(completion::Column::Date)
            .unique()
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name("ux_ritual_completions_ritual_date")
            .table(RitualCompletion)
            .col(ritual_completion::Column::RitualId)
            .col(ritual_completion::Column::Date)
            .unique()
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name("ux_weekly_plans_user_week")
            .table(WeeklyPlan)
            .col(weekly_plan::Column::UserId)
            .col(weekly_plan::Column::WeekStart)
            .unique()
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name("ux_daily_plans_user_date")
            .table(DailyPlan)
            .col(daily_plan::Column::UserId)
            .col(daily_plan::Column::Date)
            .unique()
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name("ux_quarterly_plans_user_quarter")
            .table(QuarterlyPlan)
            .col(quarterly_plan::Column::UserId)
            .col(quarterly_plan::Column::QuarterStart)
            .unique()
            .if_not_exists()
            .to_owned(),
    ];

    let builder = db.get_database_backend();
    for index in unique_indexes {
        db.execute(builder.build(&index)).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::{CompletionModel, DailyPlanModel, HabitModel, MilestoneModel};
    use sea_orm::QuerySelect;

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Tables exist and are queryable
        let _: Vec<HabitModel> = Habit::find().limit(1).all(&db).await?;
        let _: Vec<CompletionModel> = Completion::find().limit(1).all(&db).await?;
        let _: Vec<DailyPlanModel> = DailyPlan::find().limit(1).all(&db).await?;
        let _: Vec<MilestoneModel> = Milestone::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_re_runnable() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;

        // Every launch runs table creation against the persisted database;
        // a second pass over existing tables and indexes must be a no-op.
        create_tables(&db).await?;
        create_tables(&db).await?;

        let _: Vec<HabitModel> = Habit::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_connect_creates_missing_file_and_directory() -> Result<()> {
        let base = std::env::temp_dir().join(format!("stratum-db-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&base);

        // Same shape as the default URL: file in a directory that does not
        // exist yet, with mode=rwc
        let path = base.join("data").join("stratum.sqlite");
        let url = format!("sqlite://{}?mode=rwc", path.display());

        let db = connect(&url).await?;
        create_tables(&db).await?;
        assert!(path.exists());

        drop(db);
        let _ = std::fs::remove_dir_all(&base);
        Ok(())
    }

    #[test]
    fn test_default_url_is_creatable() {
        // The fallback must carry mode=rwc or a first launch cannot create
        // the database file.
        assert!(DEFAULT_DATABASE_URL.contains("mode=rwc"));
        assert!(get_database_url().starts_with("sqlite://"));
    }

    #[tokio::test]
    async fn test_completion_unique_index_rejects_duplicates() -> Result<()> {
        use crate::entities::{completion, habit};
        use chrono::{NaiveDate, Utc};
        use sea_orm::{ActiveModelTrait, Set};

        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        let habit = habit::ActiveModel {
            user_id: Set("u1".to_string()),
            name: Set("Walk".to_string()),
            description: Set(None),
            color: Set("#10B981".to_string()),
            category: Set(habit::HabitCategory::Body),
            sort_order: Set(0),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let row = |completed: bool| completion::ActiveModel {
            habit_id: Set(habit.id),
            user_id: Set("u1".to_string()),
            date: Set(date),
            completed: Set(completed),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        row(true).insert(&db).await?;
        // Same (habit_id, date) must be rejected by the unique index
        assert!(row(false).insert(&db).await.is_err());

        Ok(())
    }
}
