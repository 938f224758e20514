//! `RitualCompletion` entity - one completion record for a ritual period.
//!
//! The `date` column holds the calendar date the ritual was actually marked
//! done. At most one row exists per ritual per period (exact date for daily
//! rituals, containing week/month/quarter otherwise); the period resolution
//! lives in [`crate::core::rituals`], backed by a unique `(ritual_id, date)`
//! index.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Ritual completion database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ritual_completions")]
pub struct Model {
    /// Unique identifier for the completion row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Ritual this completion belongs to
    pub ritual_id: i64,
    /// Owning user
    pub user_id: String,
    /// Calendar date the ritual was marked done
    pub date: Date,
    /// Whether the ritual was done for that period
    pub completed: bool,
    /// When the row was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `RitualCompletion` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each completion belongs to one ritual
    #[sea_orm(
        belongs_to = "super::ritual::Entity",
        from = "Column::RitualId",
        to = "super::ritual::Column::Id"
    )]
    Ritual,
}

impl Related<super::ritual::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ritual.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
