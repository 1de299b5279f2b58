use entity::donation;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(donation::Entity)
            .if_not_exists()
            .col(
                ColumnDef::new(donation::Column::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(
                ColumnDef::new(donation::Column::DonorId)
                    .integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(donation::Column::Item)
                    .string_len(200)
                    .not_null(),
            )
            .col(
                ColumnDef::new(donation::Column::Description)
                    .text()
                    .not_null(),
            )
            .col(
                ColumnDef::new(donation::Column::Category)
                    .string_len(24)
                    .not_null(),
            )
            .col(
                ColumnDef::new(donation::Column::Status)
                    .string_len(16)
                    .not_null()
                    .default("pending"),
            )
            .col(ColumnDef::new(donation::Column::Media).json().not_null())
            .col(
                ColumnDef::new(donation::Column::SelectedRecipient)
                    .integer()
                    .null(),
            )
            .col(
                ColumnDef::new(donation::Column::CreatedAt)
                    .big_integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(donation::Column::UpdatedAt)
                    .big_integer()
                    .not_null(),
            )
            .to_owned();

        manager.create_table(table).await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_donation_donor")
                    .col(donation::Column::DonorId)
                    .table(donation::Entity)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_donation_status")
                    .col(donation::Column::Status)
                    .table(donation::Entity)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_donation_donor").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_donation_status").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(donation::Entity).to_owned())
            .await
    }
}
