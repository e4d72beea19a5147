use sea_orm::*;
use crate::entities::{comment, comment::Entity as Comment, resource::ResourceOwner, user};
use crate::error::{AppError, AppResult};
use crate::models::article_model::{CommentResponse, CreateCommentRequest, UpdateCommentRequest};
use crate::models::auth_model::CurrentUser;
use crate::repositories::soft_delete::{soft_delete, SoftDeletable};
use crate::services::article_service::{comment_response, ArticleService};
use crate::services::resource_service::ResourceService;
use crate::utils::validated_wrapper::validate_payload;

pub struct CommentService;

impl CommentService {
    pub async fn add_comment(
        db: &DatabaseConnection,
        article_slug: &str,
        author: &CurrentUser,
        payload: CreateCommentRequest,
    ) -> AppResult<CommentResponse> {
        validate_payload(&payload)?;

        let txn = db.begin().await?;
        let article = ArticleService::find_active_by_slug(&txn, article_slug).await?;

        let saved = comment::ActiveModel {
            id: NotSet,
            article_id: Set(article.id),
            author_id: Set(author.id),
            text: Set(payload.text),
            is_deleted: Set(false),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        ResourceService::create_for_owner(&txn, ResourceOwner::Comment(saved.id), payload.resources).await?;

        txn.commit().await?;
        tracing::info!(comment_id = saved.id, article_id = article.id, author_id = author.id, "comment added");

        Self::load_response(db, saved).await
    }

    /// Edits text and reconciles resources. Only the comment's author or an
    /// editor may do this.
    pub async fn update_comment(
        db: &DatabaseConnection,
        article_slug: &str,
        comment_id: i64,
        actor: &CurrentUser,
        payload: UpdateCommentRequest,
    ) -> AppResult<CommentResponse> {
        validate_payload(&payload)?;

        let txn = db.begin().await?;
        let existing = Self::find_for_article(&txn, article_slug, comment_id).await?;
        Self::ensure_can_modify(&existing, actor)?;

        let mut active = existing.into_active_model();
        if let Some(text) = payload.text {
            active.text = Set(text);
        }
        let updated = active.update(&txn).await?;

        if let Some(resources) = payload.resources {
            ResourceService::sync_for_owner(&txn, ResourceOwner::Comment(comment_id), resources).await?;
        }

        txn.commit().await?;
        tracing::info!(comment_id, "comment updated");

        Self::load_response(db, updated).await
    }

    pub async fn delete_comment(
        db: &DatabaseConnection,
        article_slug: &str,
        comment_id: i64,
        actor: &CurrentUser,
    ) -> AppResult<()> {
        let existing = Self::find_for_article(db, article_slug, comment_id).await?;
        Self::ensure_can_modify(&existing, actor)?;

        soft_delete(db, existing.into_active_model()).await?;
        tracing::info!(comment_id, "comment soft-deleted");
        Ok(())
    }

    async fn find_for_article<C: ConnectionTrait>(
        db: &C,
        article_slug: &str,
        comment_id: i64,
    ) -> AppResult<comment::Model> {
        let article = ArticleService::find_active_by_slug(db, article_slug).await?;

        Comment::find_active()
            .filter(comment::Column::Id.eq(comment_id))
            .filter(comment::Column::ArticleId.eq(article.id))
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("COMMENT_NOT_FOUND", format!("Comment {} not found", comment_id)))
    }

    fn ensure_can_modify(comment: &comment::Model, actor: &CurrentUser) -> AppResult<()> {
        if comment.author_id == actor.id || actor.is_editor() {
            Ok(())
        } else {
            tracing::warn!(comment_id = comment.id, user_id = actor.id, "comment modification denied");
            Err(AppError::forbidden("You can only modify your own comments"))
        }
    }

    async fn load_response(db: &DatabaseConnection, comment: comment::Model) -> AppResult<CommentResponse> {
        let author = user::Entity::find_by_id(comment.author_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::Programming(format!("comment {} has no author", comment.id)))?;
        let resources = ResourceService::list_for_owner(db, ResourceOwner::Comment(comment.id)).await?;

        Ok(comment_response(comment, &author, resources))
    }
}
