//! Create `message` table.
//! `author` and `content` are NOT NULL; `like_count` starts at zero.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Message::Table)
                    .if_not_exists()
                    .col(uuid(Message::Id).primary_key())
                    .col(string_len(Message::Author, 255).not_null())
                    .col(text(Message::Content).not_null())
                    .col(timestamp_with_time_zone(Message::CreatedAt).not_null())
                    .col(integer(Message::LikeCount).not_null().default(0))
                    .to_owned(),
            )
            .await?;

        // Listing pages in creation order
        manager
            .create_index(
                Index::create()
                    .name("idx_message_created_at")
                    .table(Message::Table)
                    .col(Message::CreatedAt)
                    .col(Message::Id)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Message::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Message {
    Table,
    Id,
    Author,
    Content,
    CreatedAt,
    LikeCount,
}
