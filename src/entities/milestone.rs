//! Milestone entity - one concrete step toward a remarkable aspect.
//!
//! Completion is modeled as the presence of `completed_at`; there is no
//! separate boolean flag.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Milestone database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "milestones")]
pub struct Model {
    /// Unique identifier for the milestone
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Aspect this milestone belongs to
    pub aspect_id: i64,
    /// Owning user
    pub user_id: String,
    /// Short title of the milestone
    pub title: String,
    /// Optional longer description
    pub description: Option<String>,
    /// Optional target calendar date
    pub target_date: Option<Date>,
    /// When the milestone was completed; `None` means still open
    pub completed_at: Option<DateTimeUtc>,
    /// Ordering index within the aspect's milestone list
    pub sort_order: i32,
    /// When the milestone was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Milestone and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each milestone belongs to one aspect
    #[sea_orm(
        belongs_to = "super::remarkable_aspect::Entity",
        from = "Column::AspectId",
        to = "super::remarkable_aspect::Column::Id"
    )]
    Aspect,
}

impl Related<super::remarkable_aspect::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Aspect.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
