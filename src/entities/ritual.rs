//! Ritual entity - a recurring value-aligned practice in the Values layer.
//!
//! A ritual recurs at one of four frequencies and may be anchored to a core
//! value. Completion is tracked per period; see
//! [`crate::core::rituals`] for how a calendar date resolves to a period.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// How often a ritual recurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// Every day
    #[sea_orm(string_value = "daily")]
    Daily,
    /// Once per ISO week (Monday through Sunday)
    #[sea_orm(string_value = "weekly")]
    Weekly,
    /// Once per calendar month
    #[sea_orm(string_value = "monthly")]
    Monthly,
    /// Once per calendar quarter
    #[sea_orm(string_value = "quarterly")]
    Quarterly,
}

/// Ritual database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rituals")]
pub struct Model {
    /// Unique identifier for the ritual
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning user
    pub user_id: String,
    /// Human-readable name of the ritual
    pub name: String,
    /// Optional longer description
    pub description: Option<String>,
    /// Recurrence frequency
    pub frequency: Frequency,
    /// Core value this ritual embodies, if any
    pub value_id: Option<i64>,
    /// When the ritual was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Ritual and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each ritual may belong to one value
    #[sea_orm(
        belongs_to = "super::value::Entity",
        from = "Column::ValueId",
        to = "super::value::Column::Id"
    )]
    Value,
    /// One ritual has many per-period completions
    #[sea_orm(has_many = "super::ritual_completion::Entity")]
    Completions,
}

impl Related<super::value::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Value.def()
    }
}

impl Related<super::ritual_completion::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Completions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
