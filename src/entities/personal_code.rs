//! `PersonalCode` entity - the single free-text code document per user.
//!
//! Exactly one row per user, enforced by a unique index on `user_id` and
//! singleton upsert writes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Personal code database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "personal_code")]
pub struct Model {
    /// Unique identifier for the document
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning user; one document per user
    #[sea_orm(unique)]
    pub user_id: String,
    /// Free-text content of the personal code
    pub content: String,
    /// When the document was last edited
    pub updated_at: DateTimeUtc,
    /// When the document was first created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `PersonalCode` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
