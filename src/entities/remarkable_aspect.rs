//! `RemarkableAspect` entity - a life area targeted for transformation in the
//! Vision layer.
//!
//! Each aspect has a category, a scale (how large an overhaul it is), and a
//! status, and decomposes into ordered milestones.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Life area an aspect belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum AspectCategory {
    /// Work and professional growth
    #[sea_orm(string_value = "career")]
    Career,
    /// Family relationships
    #[sea_orm(string_value = "family")]
    Family,
    /// Physical and mental health
    #[sea_orm(string_value = "health")]
    Health,
    /// Creative pursuits
    #[sea_orm(string_value = "creativity")]
    Creativity,
    /// Community and friendships
    #[sea_orm(string_value = "community")]
    Community,
    /// Day-to-day lifestyle
    #[sea_orm(string_value = "lifestyle")]
    Lifestyle,
}

/// How large an overhaul the aspect represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum AspectScale {
    /// Targeted improvement in one area
    #[sea_orm(string_value = "small")]
    Small,
    /// Major life transformation
    #[sea_orm(string_value = "large")]
    Large,
}

/// Current state of an aspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum AspectStatus {
    /// Still being scoped
    #[sea_orm(string_value = "planning")]
    Planning,
    /// Actively worked on
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    /// Done
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Paused
    #[sea_orm(string_value = "on_hold")]
    OnHold,
}

/// Remarkable aspect database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "remarkable_aspects")]
pub struct Model {
    /// Unique identifier for the aspect
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning user
    pub user_id: String,
    /// Short title of the aspect
    pub title: String,
    /// Optional longer description
    pub description: Option<String>,
    /// Life area this aspect belongs to
    pub category: AspectCategory,
    /// Scale of the intended overhaul
    pub scale: AspectScale,
    /// Current status
    pub status: AspectStatus,
    /// When the aspect was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `RemarkableAspect` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One aspect decomposes into many milestones
    #[sea_orm(has_many = "super::milestone::Entity")]
    Milestones,
}

impl Related<super::milestone::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Milestones.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
