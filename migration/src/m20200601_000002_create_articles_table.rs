use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(Articles::Table)
                .if_not_exists()
                .col(ColumnDef::new(Articles::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Articles::Title).string_len(150).not_null())
                .col(ColumnDef::new(Articles::Description).text().not_null())
                .col(ColumnDef::new(Articles::Text).text().not_null())
                .col(ColumnDef::new(Articles::PreviewImage).string().not_null())
                // Unique across deleted rows too, slugs are never reused.
                .col(ColumnDef::new(Articles::Slug).string().not_null().unique_key())
                .col(ColumnDef::new(Articles::AuthorId).big_integer().not_null())
                .col(ColumnDef::new(Articles::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(Articles::UpdatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(Articles::IsDeleted).boolean().not_null().default(false))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_articles_author_id")
                        .from(Articles::Table, Articles::AuthorId)
                        .to(Users::Table, Users::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        manager.create_index(Index::create().name("idx_articles_created_at").table(Articles::Table).col(Articles::CreatedAt).to_owned()).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Articles::Table).to_owned()).await
    }
}

#[derive(Iden)]
enum Articles {
    Table,
    Id,
    Title,
    Description,
    Text,
    PreviewImage,
    Slug,
    AuthorId,
    CreatedAt,
    UpdatedAt,
    IsDeleted,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
