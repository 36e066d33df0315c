//! Create `post_tag` join table between posts and tags.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PostTag::Table)
                    .if_not_exists()
                    .col(pk_auto(PostTag::Id))
                    .col(integer(PostTag::PostId).not_null())
                    .col(integer(PostTag::TagId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_tag_post")
                            .from(PostTag::Table, PostTag::PostId)
                            .to(Post::Table, Post::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_tag_tag")
                            .from(PostTag::Table, PostTag::TagId)
                            .to(Tag::Table, Tag::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // A tag is linked to a post at most once
        manager
            .create_index(
                Index::create()
                    .name("uniq_post_tag_post_tag")
                    .table(PostTag::Table)
                    .col(PostTag::PostId)
                    .col(PostTag::TagId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PostTag::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum PostTag {
    Table,
    Id,
    PostId,
    TagId,
}

#[derive(DeriveIden)]
enum Post { Table, Id }

#[derive(DeriveIden)]
enum Tag { Table, Id }
