//! Shared test utilities for Stratum.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{habits, rituals, values, vision},
    entities::{
        completion, habit,
        habit::HabitCategory,
        milestone,
        remarkable_aspect::{AspectCategory, AspectScale},
        ritual,
        ritual::Frequency,
        value,
    },
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// User id every default test fixture belongs to.
pub const TEST_USER: &str = "test_user";

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds a `NaiveDate` from parts, panicking on invalid input.
#[allow(clippy::unwrap_used)]
#[must_use]
pub fn test_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Creates a test habit with sensible defaults.
///
/// # Defaults
/// * `user_id`: [`TEST_USER`]
/// * `category`: body
/// * `color`: "#4ade80"
/// * `sort_order`: 0
pub async fn create_test_habit(db: &DatabaseConnection, name: &str) -> Result<habit::Model> {
    habits::create_habit(db, TEST_USER, name, None, "#4ade80", HabitCategory::Body, 0).await
}

/// Records a completion row for a habit on the given date.
pub async fn add_completion(
    db: &DatabaseConnection,
    habit_id: i64,
    date: NaiveDate,
    completed: bool,
) -> Result<completion::Model> {
    habits::set_completion(db, TEST_USER, habit_id, date, completed).await
}

/// Creates a test core value with sensible defaults.
pub async fn create_test_value(db: &DatabaseConnection, name: &str) -> Result<value::Model> {
    values::create_value(db, TEST_USER, name, None, 0).await
}

/// Creates a test ritual with the given frequency, unanchored to any value.
pub async fn create_test_ritual(
    db: &DatabaseConnection,
    name: &str,
    frequency: Frequency,
) -> Result<ritual::Model> {
    rituals::create_ritual(db, TEST_USER, name, None, frequency, None).await
}

/// Creates a test aspect with sensible defaults.
///
/// # Defaults
/// * `category`: health
/// * `scale`: small
pub async fn create_test_aspect(
    db: &DatabaseConnection,
    title: &str,
) -> Result<crate::entities::remarkable_aspect::Model> {
    vision::create_aspect(
        db,
        TEST_USER,
        title,
        None,
        AspectCategory::Health,
        AspectScale::Small,
    )
    .await
}

/// Creates a test milestone under the given aspect.
pub async fn create_test_milestone(
    db: &DatabaseConnection,
    aspect_id: i64,
    title: &str,
) -> Result<milestone::Model> {
    vision::create_milestone(db, TEST_USER, aspect_id, title, None, None, 0).await
}
