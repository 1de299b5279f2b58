use entity::user;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(user::Entity)
            .if_not_exists()
            .col(
                ColumnDef::new(user::Column::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(user::Column::Name).string_len(100).not_null())
            .col(
                ColumnDef::new(user::Column::LastName)
                    .string_len(100)
                    .not_null(),
            )
            .col(ColumnDef::new(user::Column::Email).text().not_null())
            .col(ColumnDef::new(user::Column::Phone).string_len(32).not_null())
            .col(ColumnDef::new(user::Column::Password).text().not_null())
            .col(
                ColumnDef::new(user::Column::Role)
                    .string_len(16)
                    .not_null()
                    .default("user"),
            )
            .col(ColumnDef::new(user::Column::ProfilePhoto).text().null())
            .col(ColumnDef::new(user::Column::BackgroundImage).text().null())
            .col(ColumnDef::new(user::Column::Bio).text().null())
            .col(ColumnDef::new(user::Column::Country).string_len(100).null())
            .col(ColumnDef::new(user::Column::State).string_len(100).null())
            .col(ColumnDef::new(user::Column::Address).text().null())
            .col(ColumnDef::new(user::Column::Birthday).big_integer().null())
            .col(
                ColumnDef::new(user::Column::Availability)
                    .boolean()
                    .not_null()
                    .default(true),
            )
            .col(ColumnDef::new(user::Column::Gender).string_len(8).null())
            .col(
                ColumnDef::new(user::Column::Anonymity)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .col(ColumnDef::new(user::Column::Interests).json().not_null())
            .col(
                ColumnDef::new(user::Column::XpPoints)
                    .big_integer()
                    .not_null()
                    .default(0),
            )
            .col(
                ColumnDef::new(user::Column::CreatedAt)
                    .big_integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(user::Column::UpdatedAt)
                    .big_integer()
                    .not_null(),
            )
            .to_owned();

        manager.create_table(table).await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_user_email")
                    .col(user::Column::Email)
                    .table(user::Entity)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_user_phone")
                    .col(user::Column::Phone)
                    .table(user::Entity)
                    .unique()
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uq_user_email").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uq_user_phone").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(user::Entity).to_owned())
            .await
    }
}
