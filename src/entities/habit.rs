//! Habit entity - a keystone daily habit in the Discipline layer.
//!
//! Each habit has a name, display color, and one of three keystone
//! categories. Habits are owned by exactly one user and have many
//! completions, one per calendar day at most.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The three keystone habit categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum HabitCategory {
    /// Physical health and wellness
    #[sea_orm(string_value = "body")]
    Body,
    /// Mental acuity and learning
    #[sea_orm(string_value = "mind")]
    Mind,
    /// Emotional connection and relationships
    #[sea_orm(string_value = "heart")]
    Heart,
}

impl HabitCategory {
    /// Lowercase name matching the stored form.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Mind => "mind",
            Self::Heart => "heart",
        }
    }
}

/// Habit database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "habits")]
pub struct Model {
    /// Unique identifier for the habit
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning user
    pub user_id: String,
    /// Human-readable name of the habit (e.g., "Morning walk")
    pub name: String,
    /// Optional longer description
    pub description: Option<String>,
    /// Display color as a hex string (e.g., `"#10B981"`)
    pub color: String,
    /// Keystone category this habit belongs to
    pub category: HabitCategory,
    /// Ordering index within the user's habit list (dense, not contiguous)
    pub sort_order: i32,
    /// When the habit was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Habit and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One habit has many per-day completions
    #[sea_orm(has_many = "super::completion::Entity")]
    Completions,
}

impl Related<super::completion::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Completions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
