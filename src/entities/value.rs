//! Value entity - a named core value in the Values layer.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Value database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "values")]
pub struct Model {
    /// Unique identifier for the value
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning user
    pub user_id: String,
    /// Short name of the value (e.g., "Craftsmanship")
    pub name: String,
    /// Optional longer description
    pub description: Option<String>,
    /// Ordering index within the user's value list
    pub sort_order: i32,
    /// When the value was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Value and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One value may anchor many rituals
    #[sea_orm(has_many = "super::ritual::Entity")]
    Rituals,
}

impl Related<super::ritual::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rituals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
