//! Soft deletion as a capability of an entity.
//!
//! Entities that carry an `is_deleted` flag implement [`SoftDeletable`] and
//! are read through [`SoftDeletable::find_active`]; rows are retired with
//! [`soft_delete`], which never issues a `DELETE`. Dependents are not
//! touched when their owner is retired.

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, Select,
};

pub trait SoftDeletable: EntityTrait {
    /// The boolean `is_deleted` column.
    fn deleted_column() -> Self::Column;

    /// Default view: rows that have not been deleted.
    fn find_active() -> Select<Self> {
        Self::find().filter(Self::deleted_column().eq(false))
    }

    /// Audit view: every row, deleted or not.
    fn find_with_deleted() -> Select<Self> {
        Self::find()
    }
}

/// Flags the row as deleted and persists it.
pub async fn soft_delete<A, C>(
    db: &C,
    mut active: A,
) -> Result<<A::Entity as EntityTrait>::Model, DbErr>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send + 'static,
    A::Entity: SoftDeletable,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    C: ConnectionTrait,
{
    active.set(<A::Entity as SoftDeletable>::deleted_column(), true.into());
    active.update(db).await
}
