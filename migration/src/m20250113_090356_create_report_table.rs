use entity::report;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(report::Entity)
            .if_not_exists()
            .col(
                ColumnDef::new(report::Column::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(
                ColumnDef::new(report::Column::Subject)
                    .string_len(16)
                    .not_null(),
            )
            .col(
                ColumnDef::new(report::Column::SubjectId)
                    .integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(report::Column::ReporterId)
                    .integer()
                    .not_null(),
            )
            .col(ColumnDef::new(report::Column::Reason).text().not_null())
            .col(
                ColumnDef::new(report::Column::Status)
                    .string_len(16)
                    .not_null()
                    .default("pending"),
            )
            .col(
                ColumnDef::new(report::Column::CreatedAt)
                    .big_integer()
                    .not_null(),
            )
            .to_owned();

        manager.create_table(table).await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_report_subject")
                    .col(report::Column::Subject)
                    .col(report::Column::SubjectId)
                    .table(report::Entity)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_report_subject").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(report::Entity).to_owned())
            .await
    }
}
