use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. Comments
        manager.create_table(
            Table::create()
                .table(Comments::Table)
                .if_not_exists()
                .col(ColumnDef::new(Comments::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Comments::ArticleId).big_integer().not_null())
                .col(ColumnDef::new(Comments::AuthorId).big_integer().not_null())
                .col(ColumnDef::new(Comments::Text).text().not_null())
                .col(ColumnDef::new(Comments::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(Comments::UpdatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(Comments::IsDeleted).boolean().not_null().default(false))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_comments_article_id")
                        .from(Comments::Table, Comments::ArticleId)
                        .to(Articles::Table, Articles::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_comments_author_id")
                        .from(Comments::Table, Comments::AuthorId)
                        .to(Users::Table, Users::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        manager.create_index(Index::create().name("idx_comments_article_id").table(Comments::Table).col(Comments::ArticleId).to_owned()).await?;

        // 2. Resources, owned by exactly one of article / comment
        manager.create_table(
            Table::create()
                .table(Resources::Table)
                .if_not_exists()
                .col(ColumnDef::new(Resources::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Resources::Url).string().not_null())
                .col(ColumnDef::new(Resources::Type).string_len(3).not_null())
                .col(ColumnDef::new(Resources::ArticleId).big_integer().null())
                .col(ColumnDef::new(Resources::CommentId).big_integer().null())
                .col(ColumnDef::new(Resources::IsDeleted).boolean().not_null().default(false))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_resources_article_id")
                        .from(Resources::Table, Resources::ArticleId)
                        .to(Articles::Table, Articles::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_resources_comment_id")
                        .from(Resources::Table, Resources::CommentId)
                        .to(Comments::Table, Comments::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        manager.create_index(Index::create().name("idx_resources_article_id").table(Resources::Table).col(Resources::ArticleId).to_owned()).await?;
        manager.create_index(Index::create().name("idx_resources_comment_id").table(Resources::Table).col(Resources::CommentId).to_owned()).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Resources::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Comments::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(Iden)]
enum Comments {
    Table,
    Id,
    ArticleId,
    AuthorId,
    Text,
    CreatedAt,
    UpdatedAt,
    IsDeleted,
}

#[derive(Iden)]
enum Resources {
    Table,
    Id,
    Url,
    Type,
    ArticleId,
    CommentId,
    IsDeleted,
}

#[derive(Iden)]
enum Articles {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
