use entity::comment;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(comment::Entity)
            .if_not_exists()
            .col(
                ColumnDef::new(comment::Column::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(
                ColumnDef::new(comment::Column::Subject)
                    .string_len(16)
                    .not_null(),
            )
            .col(
                ColumnDef::new(comment::Column::SubjectId)
                    .integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(comment::Column::AuthorId)
                    .integer()
                    .not_null(),
            )
            .col(ColumnDef::new(comment::Column::Content).text().not_null())
            .col(
                ColumnDef::new(comment::Column::CreatedAt)
                    .big_integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(comment::Column::UpdatedAt)
                    .big_integer()
                    .not_null(),
            )
            .to_owned();

        manager.create_table(table).await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_comment_subject")
                    .col(comment::Column::Subject)
                    .col(comment::Column::SubjectId)
                    .table(comment::Entity)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_comment_subject").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(comment::Entity).to_owned())
            .await
    }
}
