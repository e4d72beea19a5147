//! Reconciliation of the media attachments of an article or comment.
//!
//! Creation inserts all descriptors in one statement. Updates are not a full
//! diff: each descriptor names an existing row of the owner and either edits
//! it or retires it, rows that are not mentioned stay as they are, and no new
//! rows can be added.

use std::collections::HashMap;
use sea_orm::*;
use crate::entities::resource::{self, Entity as Resource, ResourceOwner};
use crate::error::{AppError, AppResult};
use crate::models::article_model::{ResourceCreateRequest, ResourceUpdateRequest};
use crate::repositories::soft_delete::{soft_delete, SoftDeletable};

pub struct ResourceService;

impl ResourceService {
    /// Inserts `items` for `owner` and returns the new rows in submission order.
    pub async fn create_for_owner<C: ConnectionTrait>(
        db: &C,
        owner: ResourceOwner,
        items: Vec<ResourceCreateRequest>,
    ) -> AppResult<Vec<resource::Model>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let count = items.len();
        let (article_id, comment_id) = owner.foreign_keys();
        let rows = items.into_iter().map(|item| resource::ActiveModel {
            id: NotSet,
            url: Set(item.url),
            resource_type: Set(item.resource_type),
            article_id: Set(article_id),
            comment_id: Set(comment_id),
            is_deleted: Set(false),
        });

        Resource::insert_many(rows).exec(db).await?;

        // Ids are assigned in insertion order, so the newest `count` rows are ours.
        let mut created = Self::list_for_owner(db, owner).await?;
        let created = created.split_off(created.len().saturating_sub(count));
        tracing::debug!(?owner, count = created.len(), "resources created");
        Ok(created)
    }

    /// Applies update descriptors in order. Fails on the first id that is not
    /// an active resource of `owner`; callers run this inside a transaction so
    /// earlier edits are rolled back with it.
    pub async fn sync_for_owner<C: ConnectionTrait>(
        db: &C,
        owner: ResourceOwner,
        items: Vec<ResourceUpdateRequest>,
    ) -> AppResult<Vec<resource::Model>> {
        let mut pending = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let id = item.id.ok_or_else(|| {
                AppError::invalid_field(
                    &format!("resources[{}].id", index),
                    "required",
                    "Resource id is required on update",
                )
            })?;
            pending.push((id, item));
        }

        for (id, item) in pending {
            let row = Resource::find_active()
                .filter(owner.condition())
                .filter(resource::Column::Id.eq(id))
                .one(db)
                .await?
                .ok_or_else(|| AppError::not_found("RESOURCE_NOT_FOUND", format!("Resource {} not found", id)))?;
            row.owner()?;

            if item.delete {
                soft_delete(db, row.into_active_model()).await?;
                tracing::debug!(resource_id = id, "resource soft-deleted");
                continue;
            }

            let mut active = row.into_active_model();
            if let Some(url) = item.url {
                active.url = Set(url);
            }
            if let Some(resource_type) = item.resource_type {
                active.resource_type = Set(resource_type);
            }
            if active.is_changed() {
                active.update(db).await?;
            }
        }

        Self::list_for_owner(db, owner).await
    }

    /// Active resources of one owner, oldest first.
    pub async fn list_for_owner<C: ConnectionTrait>(
        db: &C,
        owner: ResourceOwner,
    ) -> AppResult<Vec<resource::Model>> {
        Ok(Resource::find_active()
            .filter(owner.condition())
            .order_by_asc(resource::Column::Id)
            .all(db)
            .await?)
    }

    /// Active resources of many comments at once, grouped by comment id.
    pub async fn list_for_comments<C: ConnectionTrait>(
        db: &C,
        comment_ids: &[i64],
    ) -> AppResult<HashMap<i64, Vec<resource::Model>>> {
        if comment_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Resource::find_active()
            .filter(resource::Column::CommentId.is_in(comment_ids.iter().copied()))
            .order_by_asc(resource::Column::Id)
            .all(db)
            .await?;

        let mut grouped: HashMap<i64, Vec<resource::Model>> = HashMap::new();
        for row in rows {
            if let ResourceOwner::Comment(comment_id) = row.owner()? {
                grouped.entry(comment_id).or_default().push(row);
            }
        }
        Ok(grouped)
    }
}
