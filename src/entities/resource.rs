use sea_orm::{entity::prelude::*, sea_query::StringLen, Condition};
use serde::{Deserialize, Serialize};
use crate::error::AppError;
use crate::repositories::soft_delete::SoftDeletable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(3))")]
pub enum ResourceType {
    #[sea_orm(string_value = "IMG")]
    #[serde(rename = "IMG", alias = "IMAGE")]
    Image,
    #[sea_orm(string_value = "VID")]
    #[serde(rename = "VID", alias = "VIDEO")]
    Video,
    #[sea_orm(string_value = "URL")]
    #[serde(rename = "URL")]
    Url,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "resources")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub url: String,
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub article_id: Option<i64>,
    pub comment_id: Option<i64>,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::article::Entity",
        from = "Column::ArticleId",
        to = "super::article::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Article,
    #[sea_orm(
        belongs_to = "super::comment::Entity",
        from = "Column::CommentId",
        to = "super::comment::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Comment,
}

impl Related<super::article::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Article.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl SoftDeletable for Entity {
    fn deleted_column() -> Self::Column {
        Column::IsDeleted
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// The entity a resource row hangs off. Rows store it as two nullable
/// foreign keys of which exactly one is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceOwner {
    Article(i64),
    Comment(i64),
}

impl ResourceOwner {
    /// `(article_id, comment_id)` column values for rows owned by `self`.
    pub fn foreign_keys(self) -> (Option<i64>, Option<i64>) {
        match self {
            ResourceOwner::Article(id) => (Some(id), None),
            ResourceOwner::Comment(id) => (None, Some(id)),
        }
    }

    /// Filter selecting the rows owned by `self`.
    pub fn condition(self) -> Condition {
        match self {
            ResourceOwner::Article(id) => Condition::all().add(Column::ArticleId.eq(id)),
            ResourceOwner::Comment(id) => Condition::all().add(Column::CommentId.eq(id)),
        }
    }
}

impl Model {
    pub fn owner(&self) -> Result<ResourceOwner, AppError> {
        match (self.article_id, self.comment_id) {
            (Some(article_id), None) => Ok(ResourceOwner::Article(article_id)),
            (None, Some(comment_id)) => Ok(ResourceOwner::Comment(comment_id)),
            _ => Err(AppError::Programming(format!(
                "resource {} must belong to exactly one of article or comment",
                self.id
            ))),
        }
    }
}
