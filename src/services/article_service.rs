use sea_orm::*;
use crate::entities::{
    article, article::Entity as Article, comment, comment::Entity as Comment, resource::ResourceOwner, user,
};
use crate::error::{AppError, AppResult};
use crate::models::article_model::*;
use crate::models::auth_model::CurrentUser;
use crate::repositories::soft_delete::{soft_delete, SoftDeletable};
use crate::services::resource_service::ResourceService;
use crate::utils::validated_wrapper::validate_payload;

const DEFAULT_PAGE_SIZE: u64 = 10;
const MAX_PAGE_SIZE: u64 = 100;

pub struct ArticleService;

impl ArticleService {
    pub async fn create_article(
        db: &DatabaseConnection,
        author: &CurrentUser,
        payload: CreateArticleRequest,
    ) -> AppResult<ArticleDetailResponse> {
        validate_payload(&payload)?;

        let txn = db.begin().await?;

        let article = article::ActiveModel {
            id: NotSet,
            title: Set(payload.title),
            description: Set(payload.description),
            text: Set(payload.text),
            preview_image: Set(payload.preview_image),
            author_id: Set(author.id),
            is_deleted: Set(false),
            ..Default::default()
        };
        // Slug is finalised by the entity hook within this transaction
        let saved = article.insert(&txn).await?;

        ResourceService::create_for_owner(&txn, ResourceOwner::Article(saved.id), payload.resources).await?;

        txn.commit().await?;
        tracing::info!(article_id = saved.id, slug = %saved.slug, author_id = author.id, "article created");

        Self::get_article(db, &saved.slug).await
    }

    /// Detail view of an active article, with its resources and comments.
    pub async fn get_article<C: ConnectionTrait>(db: &C, slug: &str) -> AppResult<ArticleDetailResponse> {
        let (article, author) = Article::find_active()
            .filter(article::Column::Slug.eq(slug))
            .find_also_related(user::Entity)
            .one(db)
            .await?
            .ok_or_else(|| Self::not_found(slug))?;

        let author = author.ok_or_else(|| AppError::Programming(format!("article {} has no author", article.id)))?;

        let resources = ResourceService::list_for_owner(db, ResourceOwner::Article(article.id)).await?;
        let comments = Self::comments_for(db, article.id).await?;

        Ok(ArticleDetailResponse {
            id: article.id,
            title: article.title,
            description: article.description,
            text: article.text,
            preview_image: article.preview_image,
            slug: article.slug,
            author: AuthorResponse::from(&author),
            resources: resources.into_iter().map(ResourceResponse::from).collect(),
            comments_count: comments.len(),
            comments,
            created_at: article.created_at,
            updated_at: article.updated_at,
        })
    }

    /// Looks an article up regardless of its deletion flag.
    pub async fn find_including_deleted<C: ConnectionTrait>(db: &C, slug: &str) -> AppResult<article::Model> {
        Article::find_with_deleted()
            .filter(article::Column::Slug.eq(slug))
            .one(db)
            .await?
            .ok_or_else(|| Self::not_found(slug))
    }

    pub async fn find_active_by_slug<C: ConnectionTrait>(db: &C, slug: &str) -> AppResult<article::Model> {
        Article::find_active()
            .filter(article::Column::Slug.eq(slug))
            .one(db)
            .await?
            .ok_or_else(|| Self::not_found(slug))
    }

    pub async fn list_articles(
        db: &DatabaseConnection,
        params: ArticleFilterParams,
    ) -> AppResult<ArticleListResponse> {
        let page = params.page.unwrap_or(1).max(1);
        let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);

        let paginator = Article::find_active()
            .order_by_desc(article::Column::CreatedAt)
            .order_by_desc(article::Column::Id)
            .paginate(db, limit);

        let total = paginator.num_items().await?;

        // Pages past the end are empty; this also keeps the offset from overflowing.
        let in_range = (page - 1)
            .checked_mul(limit)
            .is_some_and(|offset| offset < total);
        let rows = if in_range {
            paginator.fetch_page(page - 1).await?
        } else {
            Vec::new()
        };

        let data = rows
            .into_iter()
            .map(|a| ArticleListItem {
                title: a.title,
                description: a.description,
                preview_image: a.preview_image,
                slug: a.slug,
            })
            .collect();

        Ok(ArticleListResponse {
            data,
            meta: PaginationMeta { total, page, limit },
        })
    }

    /// Partial update of an article followed by resource reconciliation.
    /// The slug follows the (possibly new) title.
    pub async fn update_article(
        db: &DatabaseConnection,
        slug: &str,
        payload: UpdateArticleRequest,
    ) -> AppResult<ArticleDetailResponse> {
        validate_payload(&payload)?;

        let txn = db.begin().await?;
        let existing = Self::find_active_by_slug(&txn, slug).await?;
        let article_id = existing.id;

        let mut active = existing.into_active_model();
        if let Some(title) = payload.title {
            active.title = Set(title);
        }
        if let Some(description) = payload.description {
            active.description = Set(description);
        }
        if let Some(text) = payload.text {
            active.text = Set(text);
        }
        if let Some(preview_image) = payload.preview_image {
            active.preview_image = Set(preview_image);
        }
        let updated = active.update(&txn).await?;

        if let Some(resources) = payload.resources {
            ResourceService::sync_for_owner(&txn, ResourceOwner::Article(article_id), resources).await?;
        }

        txn.commit().await?;
        tracing::info!(article_id, slug = %updated.slug, "article updated");

        Self::get_article(db, &updated.slug).await
    }

    /// Soft delete; comments and resources are left untouched.
    pub async fn delete_article(db: &DatabaseConnection, slug: &str) -> AppResult<()> {
        let article = Self::find_active_by_slug(db, slug).await?;
        let article_id = article.id;
        soft_delete(db, article.into_active_model()).await?;
        tracing::info!(article_id, "article soft-deleted");
        Ok(())
    }

    // Active comments of an article, newest first, each with author and resources
    async fn comments_for<C: ConnectionTrait>(db: &C, article_id: i64) -> AppResult<Vec<CommentResponse>> {
        let rows = Comment::find_active()
            .filter(comment::Column::ArticleId.eq(article_id))
            .order_by_desc(comment::Column::CreatedAt)
            .order_by_desc(comment::Column::Id)
            .find_also_related(user::Entity)
            .all(db)
            .await?;

        let ids: Vec<i64> = rows.iter().map(|(c, _)| c.id).collect();
        let mut resources = ResourceService::list_for_comments(db, &ids).await?;

        rows.into_iter()
            .map(|(c, author)| {
                let author = author.ok_or_else(|| AppError::Programming(format!("comment {} has no author", c.id)))?;
                let attached = resources.remove(&c.id).unwrap_or_default();
                Ok(comment_response(c, &author, attached))
            })
            .collect()
    }

    fn not_found(slug: &str) -> AppError {
        AppError::not_found("ARTICLE_NOT_FOUND", format!("Article '{}' not found", slug))
    }
}

pub(crate) fn comment_response(
    comment: comment::Model,
    author: &user::Model,
    resources: Vec<crate::entities::resource::Model>,
) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        author: AuthorResponse::from(author),
        text: comment.text,
        resources: resources.into_iter().map(ResourceResponse::from).collect(),
        created_at: comment.created_at,
        updated_at: comment.updated_at,
    }
}
