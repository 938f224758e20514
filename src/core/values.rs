//! Values business logic - core values and the personal code document.
//!
//! Core values are a small ordered list per user with case-insensitive
//! unique names. The personal code is a single free-text document per user
//! written with singleton upsert semantics.

use crate::entities::{PersonalCode, Value, personal_code, value};
use crate::errors::{Error, Result};
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

/// Checks whether another value of this user already uses `name`.
async fn name_taken(
    db: &DatabaseConnection,
    user_id: &str,
    name: &str,
    exclude_id: Option<i64>,
) -> Result<bool> {
    let existing = Value::find()
        .filter(value::Column::UserId.eq(user_id))
        .all(db)
        .await?;

    Ok(existing.iter().any(|v| {
        Some(v.id) != exclude_id && v.name.to_lowercase() == name.to_lowercase()
    }))
}

/// Creates a new core value, rejecting empty and duplicate names.
pub async fn create_value(
    db: &DatabaseConnection,
    user_id: &str,
    name: &str,
    description: Option<String>,
    sort_order: i32,
) -> Result<value::Model> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Config {
            message: "Value name cannot be empty".to_string(),
        });
    }
    if name_taken(db, user_id, name, None).await? {
        return Err(Error::Config {
            message: format!("A value named '{name}' already exists"),
        });
    }

    let model = value::ActiveModel {
        user_id: Set(user_id.to_string()),
        name: Set(name.to_string()),
        description: Set(description),
        sort_order: Set(sort_order),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(user_id, value_id = model.id, name = %model.name, "created value");
    Ok(model)
}

/// Retrieves all core values for a user, ordered by list position.
pub async fn get_values(db: &DatabaseConnection, user_id: &str) -> Result<Vec<value::Model>> {
    Value::find()
        .filter(value::Column::UserId.eq(user_id))
        .order_by_asc(value::Column::SortOrder)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Updates a value's name and description.
pub async fn update_value(
    db: &DatabaseConnection,
    user_id: &str,
    value_id: i64,
    name: &str,
    description: Option<String>,
) -> Result<value::Model> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Config {
            message: "Value name cannot be empty".to_string(),
        });
    }
    if name_taken(db, user_id, name, Some(value_id)).await? {
        return Err(Error::Config {
            message: format!("A value named '{name}' already exists"),
        });
    }

    let existing = Value::find_by_id(value_id)
        .filter(value::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "value",
            id: value_id.to_string(),
        })?;

    let mut model: value::ActiveModel = existing.into();
    model.name = Set(name.to_string());
    model.description = Set(description);
    model.update(db).await.map_err(Into::into)
}

/// Deletes a value.
///
/// Rituals that referenced it keep working; their `value_id` simply dangles
/// and the view layer renders them as unanchored.
pub async fn delete_value(db: &DatabaseConnection, user_id: &str, value_id: i64) -> Result<()> {
    let result = Value::delete_many()
        .filter(value::Column::Id.eq(value_id))
        .filter(value::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "value",
            id: value_id.to_string(),
        });
    }

    Ok(())
}

/// Fetches the user's personal code document, if one exists.
pub async fn get_personal_code(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Option<personal_code::Model>> {
    PersonalCode::find()
        .filter(personal_code::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Writes the user's personal code document, creating it on first save.
///
/// Singleton upsert keyed on `user_id`: content and `updated_at` are
/// replaced, `created_at` keeps the first save's instant.
pub async fn upsert_personal_code(
    db: &DatabaseConnection,
    user_id: &str,
    content: &str,
) -> Result<personal_code::Model> {
    let now = Utc::now();
    let model = personal_code::ActiveModel {
        user_id: Set(user_id.to_string()),
        content: Set(content.to_string()),
        updated_at: Set(now),
        created_at: Set(now),
        ..Default::default()
    };

    PersonalCode::insert(model)
        .on_conflict(
            OnConflict::column(personal_code::Column::UserId)
                .update_columns([
                    personal_code::Column::Content,
                    personal_code::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(db)
        .await
        .map_err(Into::into)
}
