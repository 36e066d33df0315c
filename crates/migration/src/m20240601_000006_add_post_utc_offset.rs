//! `timestamptz` keeps the instant only; the author's UTC offset is stored beside it.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Post::Table)
                    .add_column_if_not_exists(integer(Post::UtcOffsetSecs).not_null().default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(Table::alter().table(Post::Table).drop_column(Post::UtcOffsetSecs).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Post { Table, UtcOffsetSecs }
