//! `QuarterlyPlan` entity - the Control layer's plan for one calendar quarter.
//!
//! Keyed by `(user_id, quarter_start)` where `quarter_start` is the first day
//! of the quarter. Objectives (3 to 5) are stored as a JSON column.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::StringList;

/// Quarterly plan database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quarterly_plans")]
pub struct Model {
    /// Unique identifier for the plan
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning user
    pub user_id: String,
    /// First calendar day of the planned quarter
    pub quarter_start: Date,
    /// Quarter objectives, between 3 and 5
    pub objectives: StringList,
    /// Free-text end-of-quarter reflection
    pub reflection: Option<String>,
    /// When the plan was first created
    pub created_at: DateTimeUtc,
    /// When the plan was last edited
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between `QuarterlyPlan` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
