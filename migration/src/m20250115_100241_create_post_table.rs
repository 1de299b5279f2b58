use entity::post;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(post::Entity)
            .if_not_exists()
            .col(
                ColumnDef::new(post::Column::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(post::Column::Title).string_len(200).not_null())
            .col(ColumnDef::new(post::Column::Content).text().not_null())
            .col(ColumnDef::new(post::Column::AuthorId).integer().not_null())
            .col(
                ColumnDef::new(post::Column::Category)
                    .string_len(16)
                    .not_null(),
            )
            .col(
                ColumnDef::new(post::Column::Status)
                    .string_len(16)
                    .not_null()
                    .default("draft"),
            )
            .col(ColumnDef::new(post::Column::Media).json().not_null())
            .col(
                ColumnDef::new(post::Column::CreatedAt)
                    .big_integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(post::Column::UpdatedAt)
                    .big_integer()
                    .not_null(),
            )
            .to_owned();

        manager.create_table(table).await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_post_author")
                    .col(post::Column::AuthorId)
                    .table(post::Entity)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_post_author").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(post::Entity).to_owned())
            .await
    }
}
