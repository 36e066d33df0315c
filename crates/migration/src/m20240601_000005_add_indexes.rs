use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Post: listing and previous/next navigation order by creation_time
        manager
            .create_index(
                Index::create()
                    .name("idx_post_creation_time")
                    .table(Post::Table)
                    .col(Post::CreationTime)
                    .to_owned(),
            )
            .await?;

        // Post: category lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_post_category")
                    .table(Post::Table)
                    .col(Post::CategoryId)
                    .to_owned(),
            )
            .await?;

        // PostTag: tag -> posts lookups (post side is covered by the unique index)
        manager
            .create_index(
                Index::create()
                    .name("idx_post_tag_tag")
                    .table(PostTag::Table)
                    .col(PostTag::TagId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_post_creation_time").table(Post::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_post_category").table(Post::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_post_tag_tag").table(PostTag::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Post { Table, CreationTime, CategoryId }

#[derive(DeriveIden)]
enum PostTag { Table, TagId }
