//! `DailyPlan` entity - the Control layer's plan for one calendar day.
//!
//! Keyed by `(user_id, date)`. Priorities, time blocks, and the shutdown
//! checklist state are JSON columns; `shutdown_complete` is a timestamp whose
//! presence marks the shutdown ritual as done for the day.

use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::StringList;

/// One scheduled block of time within a daily plan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlock {
    /// Start time as `HH:MM`
    pub start: String,
    /// End time as `HH:MM`
    pub end: String,
    /// What the block is for
    pub title: String,
    /// Free-form category label (e.g., "deep_work")
    pub category: String,
}

/// Ordered list of time blocks, stored as a JSON column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct TimeBlocks(pub Vec<TimeBlock>);

/// Per-item shutdown checklist state, stored as a JSON column.
///
/// Keys are checklist item ids (e.g., `"inbox"`), values are whether the item
/// has been checked off today.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct CheckMap(pub BTreeMap<String, bool>);

/// Daily plan database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "daily_plans")]
pub struct Model {
    /// Unique identifier for the plan
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning user
    pub user_id: String,
    /// Calendar date the plan applies to
    pub date: Date,
    /// Top priorities for the day, at most 3
    pub top_priorities: StringList,
    /// Free-text evening reflection
    pub reflection: Option<String>,
    /// Free-text task capture notes
    pub tasks_notes: Option<String>,
    /// Free-text idea capture notes
    pub ideas_notes: Option<String>,
    /// Ordered time blocks for the day
    pub time_blocks: TimeBlocks,
    /// When the shutdown ritual was completed, if it was
    pub shutdown_complete: Option<DateTimeUtc>,
    /// Per-item shutdown checklist state
    pub shutdown_checks: CheckMap,
    /// When the plan was first created
    pub created_at: DateTimeUtc,
    /// When the plan was last edited
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between `DailyPlan` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
