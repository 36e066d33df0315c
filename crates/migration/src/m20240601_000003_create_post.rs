//! Create `post` table.
//! `url` is the public slug and must be unique; deleting a category keeps its posts.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Post::Table)
                    .if_not_exists()
                    .col(pk_auto(Post::Id))
                    .col(string_len(Post::Title, 256).not_null())
                    .col(string_len(Post::Author, 64).not_null())
                    .col(string_len_uniq(Post::Url, 256))
                    .col(text(Post::Content).not_null())
                    .col(timestamp_with_time_zone(Post::CreationTime).not_null())
                    .col(integer_null(Post::CategoryId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_category")
                            .from(Post::Table, Post::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Post::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Post {
    Table,
    Id,
    Title,
    Author,
    Url,
    Content,
    CreationTime,
    CategoryId,
}

#[derive(DeriveIden)]
enum Category { Table, Id }
