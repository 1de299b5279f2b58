use entity::message;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(message::Entity)
            .if_not_exists()
            .col(
                ColumnDef::new(message::Column::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(
                ColumnDef::new(message::Column::SenderId)
                    .integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(message::Column::RecipientId)
                    .integer()
                    .not_null(),
            )
            .col(ColumnDef::new(message::Column::Content).text().not_null())
            .col(ColumnDef::new(message::Column::Media).json().not_null())
            .col(ColumnDef::new(message::Column::ChatId).integer().null())
            .col(
                ColumnDef::new(message::Column::CreatedAt)
                    .big_integer()
                    .not_null(),
            )
            .to_owned();

        manager.create_table(table).await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_message_sender")
                    .col(message::Column::SenderId)
                    .table(message::Entity)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_message_recipient")
                    .col(message::Column::RecipientId)
                    .table(message::Entity)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_message_sender").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_message_recipient").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(message::Entity).to_owned())
            .await
    }
}
