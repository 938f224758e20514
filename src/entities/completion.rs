//! Completion entity - one per-day completion record for a habit.
//!
//! The `date` column is a plain calendar date with no time component; day
//! semantics must never route through a timestamp. At most one row exists
//! per `(habit_id, date)`, enforced by a unique index and upsert-on-conflict
//! writes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Completion database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "completions")]
pub struct Model {
    /// Unique identifier for the completion row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Habit this completion belongs to
    pub habit_id: i64,
    /// Owning user
    pub user_id: String,
    /// Calendar date the completion applies to
    pub date: Date,
    /// Whether the habit was done on that day
    pub completed: bool,
    /// When the row was created (feeds the activity heatmap)
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Completion and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each completion belongs to one habit
    #[sea_orm(
        belongs_to = "super::habit::Entity",
        from = "Column::HabitId",
        to = "super::habit::Column::Id"
    )]
    Habit,
}

impl Related<super::habit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Habit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
