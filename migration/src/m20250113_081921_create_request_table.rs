use entity::request;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(request::Entity)
            .if_not_exists()
            .col(
                ColumnDef::new(request::Column::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(
                ColumnDef::new(request::Column::DonationId)
                    .integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(request::Column::RequesterId)
                    .integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(request::Column::Status)
                    .string_len(16)
                    .not_null()
                    .default("pending"),
            )
            .col(
                ColumnDef::new(request::Column::CreatedAt)
                    .big_integer()
                    .not_null(),
            )
            .to_owned();

        manager.create_table(table).await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_request_donation")
                    .col(request::Column::DonationId)
                    .table(request::Entity)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_request_donation").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(request::Entity).to_owned())
            .await
    }
}
