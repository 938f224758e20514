//! `WeeklyPlan` entity - the Control layer's plan for one ISO week.
//!
//! Keyed by `(user_id, week_start)` where `week_start` is always a Monday.
//! The "big rocks" list (at most 5) is stored as a JSON column.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::StringList;

/// Weekly plan database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "weekly_plans")]
pub struct Model {
    /// Unique identifier for the plan
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning user
    pub user_id: String,
    /// Monday that starts the planned ISO week
    pub week_start: Date,
    /// Optional theme for the week
    pub theme: Option<String>,
    /// Top weekly priorities, at most 5
    pub big_rocks: StringList,
    /// When the plan was first created
    pub created_at: DateTimeUtc,
    /// When the plan was last edited
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between `WeeklyPlan` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
