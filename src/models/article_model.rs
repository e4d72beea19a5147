use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::entities::{resource, resource::ResourceType, user};

// --- Resources ---

/// Attachment descriptor accepted when an article or comment is created.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResourceCreateRequest {
    #[serde(default)]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    #[validate(url(message = "Enter a valid URL"))]
    pub url: String,

    #[serde(rename = "type")]
    pub resource_type: ResourceType,
}

/// Attachment descriptor accepted on update. `id` selects an existing row of
/// the owner; `delete` retires it instead of editing it.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ResourceUpdateRequest {
    #[validate(required(message = "Resource id is required on update"))]
    pub id: Option<i64>,

    #[validate(url(message = "Enter a valid URL"))]
    pub url: Option<String>,

    #[serde(rename = "type")]
    pub resource_type: Option<ResourceType>,

    #[serde(default, deserialize_with = "crate::utils::validator_utils::deserialize_truthy")]
    pub delete: bool,
}

#[derive(Debug, Serialize)]
pub struct ResourceResponse {
    pub id: i64,
    pub url: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
}

impl From<resource::Model> for ResourceResponse {
    fn from(r: resource::Model) -> Self {
        Self { id: r.id, url: r.url, resource_type: r.resource_type }
    }
}

// --- Articles ---

#[derive(Debug, Deserialize, Validate)]
pub struct CreateArticleRequest {
    #[serde(default)]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    #[validate(length(max = 150, message = "Title must be at most 150 characters"))]
    pub title: String,

    #[serde(default)]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: String,

    #[serde(default)]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    pub text: String,

    #[serde(default)]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    #[validate(url(message = "Enter a valid URL"))]
    pub preview_image: String,

    #[serde(default)]
    #[validate(nested)]
    pub resources: Vec<ResourceCreateRequest>,
}

/// Partial update; absent fields keep their value and absent `resources`
/// skips reconciliation.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateArticleRequest {
    #[validate(length(min = 1, max = 150, message = "Title must be 1 to 150 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 1000, message = "Description must be 1 to 1000 characters"))]
    pub description: Option<String>,

    #[validate(length(min = 1, message = "Text cannot be empty"))]
    pub text: Option<String>,

    #[validate(url(message = "Enter a valid URL"))]
    pub preview_image: Option<String>,

    #[validate(nested)]
    pub resources: Option<Vec<ResourceUpdateRequest>>,
}

#[derive(Debug, Serialize)]
pub struct AuthorResponse {
    pub id: i64,
    pub username: String,
}

impl From<&user::Model> for AuthorResponse {
    fn from(u: &user::Model) -> Self {
        Self { id: u.id, username: u.username.clone() }
    }
}

#[derive(Debug, Serialize)]
pub struct ArticleDetailResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub text: String,
    pub preview_image: String,
    pub slug: String,
    pub author: AuthorResponse,
    pub resources: Vec<ResourceResponse>,
    pub comments_count: usize,
    pub comments: Vec<CommentResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ArticleListItem {
    pub title: String,
    pub description: String,
    pub preview_image: String,
    pub slug: String,
}

#[derive(Debug, Serialize)]
pub struct ArticleListResponse {
    pub data: Vec<ArticleListItem>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ArticleFilterParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

// --- Comments ---

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[serde(default)]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    #[validate(length(max = 512, message = "Comment must be at most 512 characters"))]
    pub text: String,

    #[serde(default)]
    #[validate(nested)]
    pub resources: Vec<ResourceCreateRequest>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, max = 512, message = "Comment must be 1 to 512 characters"))]
    pub text: Option<String>,

    #[validate(nested)]
    pub resources: Option<Vec<ResourceUpdateRequest>>,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: i64,
    pub author: AuthorResponse,
    pub text: String,
    pub resources: Vec<ResourceResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
