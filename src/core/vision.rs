//! Vision business logic - remarkable aspects and their milestones.
//!
//! An aspect is a life area targeted for transformation; it decomposes into
//! ordered milestones. Milestone completion is the presence of
//! `completed_at`, and completing or reopening one never touches the parent
//! aspect's status, which the user drives explicitly.

use crate::entities::{
    Milestone, RemarkableAspect, milestone,
    remarkable_aspect::{self, AspectCategory, AspectScale, AspectStatus},
};
use crate::errors::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;

/// Creates a new remarkable aspect in the `Planning` status.
pub async fn create_aspect(
    db: &DatabaseConnection,
    user_id: &str,
    title: &str,
    description: Option<String>,
    category: AspectCategory,
    scale: AspectScale,
) -> Result<remarkable_aspect::Model> {
    let title = title.trim();
    if title.is_empty() {
        return Err(Error::Config {
            message: "Aspect title cannot be empty".to_string(),
        });
    }

    let model = remarkable_aspect::ActiveModel {
        user_id: Set(user_id.to_string()),
        title: Set(title.to_string()),
        description: Set(description),
        category: Set(category),
        scale: Set(scale),
        status: Set(AspectStatus::Planning),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(user_id, aspect_id = model.id, title = %model.title, "created aspect");
    Ok(model)
}

/// Retrieves all aspects for a user, oldest first.
pub async fn get_aspects(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<remarkable_aspect::Model>> {
    RemarkableAspect::find()
        .filter(remarkable_aspect::Column::UserId.eq(user_id))
        .order_by_asc(remarkable_aspect::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Resolves an aspect the caller expects to exist.
async fn require_aspect(
    db: &DatabaseConnection,
    user_id: &str,
    aspect_id: i64,
) -> Result<remarkable_aspect::Model> {
    RemarkableAspect::find_by_id(aspect_id)
        .filter(remarkable_aspect::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "aspect",
            id: aspect_id.to_string(),
        })
}

/// Updates an aspect's content and status.
#[allow(clippy::too_many_arguments)]
pub async fn update_aspect(
    db: &DatabaseConnection,
    user_id: &str,
    aspect_id: i64,
    title: &str,
    description: Option<String>,
    category: AspectCategory,
    scale: AspectScale,
    status: AspectStatus,
) -> Result<remarkable_aspect::Model> {
    let title = title.trim();
    if title.is_empty() {
        return Err(Error::Config {
            message: "Aspect title cannot be empty".to_string(),
        });
    }

    let existing = require_aspect(db, user_id, aspect_id).await?;

    let mut model: remarkable_aspect::ActiveModel = existing.into();
    model.title = Set(title.to_string());
    model.description = Set(description);
    model.category = Set(category);
    model.scale = Set(scale);
    model.status = Set(status);
    model.update(db).await.map_err(Into::into)
}

/// Deletes an aspect and all of its milestones.
pub async fn delete_aspect(db: &DatabaseConnection, user_id: &str, aspect_id: i64) -> Result<()> {
    let existing = require_aspect(db, user_id, aspect_id).await?;

    let txn = db.begin().await?;
    Milestone::delete_many()
        .filter(milestone::Column::AspectId.eq(existing.id))
        .exec(&txn)
        .await?;
    RemarkableAspect::delete_by_id(existing.id).exec(&txn).await?;
    txn.commit().await?;

    info!(user_id, aspect_id, "deleted aspect and its milestones");
    Ok(())
}

/// Creates a milestone under one of the user's aspects.
pub async fn create_milestone(
    db: &DatabaseConnection,
    user_id: &str,
    aspect_id: i64,
    title: &str,
    description: Option<String>,
    target_date: Option<NaiveDate>,
    sort_order: i32,
) -> Result<milestone::Model> {
    let title = title.trim();
    if title.is_empty() {
        return Err(Error::Config {
            message: "Milestone title cannot be empty".to_string(),
        });
    }

    // Ownership check keeps milestones from attaching to another user's aspect
    require_aspect(db, user_id, aspect_id).await?;

    milestone::ActiveModel {
        aspect_id: Set(aspect_id),
        user_id: Set(user_id.to_string()),
        title: Set(title.to_string()),
        description: Set(description),
        target_date: Set(target_date),
        completed_at: Set(None),
        sort_order: Set(sort_order),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Retrieves an aspect's milestones in list order.
pub async fn get_milestones(
    db: &DatabaseConnection,
    user_id: &str,
    aspect_id: i64,
) -> Result<Vec<milestone::Model>> {
    require_aspect(db, user_id, aspect_id).await?;

    Milestone::find()
        .filter(milestone::Column::AspectId.eq(aspect_id))
        .order_by_asc(milestone::Column::SortOrder)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Rewrites an aspect's milestone ordering to match `ordered_ids`.
///
/// Every milestone of the aspect must appear exactly once; positions become
/// the dense indexes 0..n.
pub async fn reorder_milestones(
    db: &DatabaseConnection,
    user_id: &str,
    aspect_id: i64,
    ordered_ids: &[i64],
) -> Result<()> {
    let existing = get_milestones(db, user_id, aspect_id).await?;
    let mut current: Vec<i64> = existing.iter().map(|m| m.id).collect();
    let mut requested = ordered_ids.to_vec();
    current.sort_unstable();
    requested.sort_unstable();
    if current != requested {
        return Err(Error::Config {
            message: "Reorder must list each of the aspect's milestones exactly once".to_string(),
        });
    }

    let txn = db.begin().await?;
    for (position, id) in ordered_ids.iter().enumerate() {
        // Positions are dense indexes well below i32::MAX
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let sort_order = position as i32;
        Milestone::update_many()
            .col_expr(milestone::Column::SortOrder, Expr::value(sort_order))
            .filter(milestone::Column::Id.eq(*id))
            .exec(&txn)
            .await?;
    }
    txn.commit().await?;

    Ok(())
}

/// Resolves a milestone the caller expects to exist.
async fn require_milestone(
    db: &DatabaseConnection,
    user_id: &str,
    milestone_id: i64,
) -> Result<milestone::Model> {
    Milestone::find_by_id(milestone_id)
        .filter(milestone::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "milestone",
            id: milestone_id.to_string(),
        })
}

/// Marks a milestone completed at the given instant.
///
/// Completing an already-completed milestone moves its timestamp.
pub async fn complete_milestone(
    db: &DatabaseConnection,
    user_id: &str,
    milestone_id: i64,
    at: DateTime<Utc>,
) -> Result<milestone::Model> {
    let existing = require_milestone(db, user_id, milestone_id).await?;

    let mut model: milestone::ActiveModel = existing.into();
    model.completed_at = Set(Some(at));
    model.update(db).await.map_err(Into::into)
}

/// Reopens a completed milestone.
pub async fn uncomplete_milestone(
    db: &DatabaseConnection,
    user_id: &str,
    milestone_id: i64,
) -> Result<milestone::Model> {
    let existing = require_milestone(db, user_id, milestone_id).await?;

    let mut model: milestone::ActiveModel = existing.into();
    model.completed_at = Set(None);
    model.update(db).await.map_err(Into::into)
}

/// Deletes a milestone.
pub async fn delete_milestone(
    db: &DatabaseConnection,
    user_id: &str,
    milestone_id: i64,
) -> Result<()> {
    let existing = require_milestone(db, user_id, milestone_id).await?;
    Milestone::delete_by_id(existing.id).exec(db).await?;
    Ok(())
}
