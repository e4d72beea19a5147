use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set, Value};
use serde::{Deserialize, Serialize};
use chrono::Utc;
use uuid::Uuid;
use crate::repositories::soft_delete::SoftDeletable;
use crate::utils::slug_utils::derive_slug;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "articles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub preview_image: String,

    #[sea_orm(unique)]
    pub slug: String,
    pub author_id: i64,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
    #[sea_orm(has_many = "super::resource::Entity")]
    Resource,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl Related<super::resource::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Resource.def()
    }
}

impl SoftDeletable for Entity {
    fn deleted_column() -> Self::Column {
        Column::IsDeleted
    }
}

/// Every save recomputes the slug from `id` and `title`.
///
/// The id of a new row is only known after the insert, so an insert writes a
/// throwaway unique slug first and `after_save` replaces it inside the same
/// connection (and therefore the same transaction).
#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now();
        if insert {
            self.created_at = Set(now);
            self.slug = Set(format!("pending-{}", Uuid::new_v4()));
        } else if let (Some(id), Some(title)) = (current(&self.id), current(&self.title)) {
            let slug = derive_slug(*id, title);
            self.slug = Set(slug);
        }
        self.updated_at = Set(now);
        Ok(self)
    }

    async fn after_save<C>(model: Model, db: &C, insert: bool) -> Result<Model, DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert {
            return Ok(model);
        }
        // Second phase: the slug is rewritten by `before_save`.
        let active: ActiveModel = model.into();
        active.update(db).await
    }
}

fn current<V: Into<Value>>(value: &ActiveValue<V>) -> Option<&V> {
    match value {
        ActiveValue::Set(v) | ActiveValue::Unchanged(v) => Some(v),
        ActiveValue::NotSet => None,
    }
}
