use entity::reaction;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(reaction::Entity)
            .if_not_exists()
            .col(
                ColumnDef::new(reaction::Column::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(
                ColumnDef::new(reaction::Column::Kind)
                    .string_len(8)
                    .not_null(),
            )
            .col(
                ColumnDef::new(reaction::Column::Subject)
                    .string_len(16)
                    .not_null(),
            )
            .col(
                ColumnDef::new(reaction::Column::SubjectId)
                    .integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(reaction::Column::UserId)
                    .integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(reaction::Column::CreatedAt)
                    .big_integer()
                    .not_null(),
            )
            .to_owned();

        manager.create_table(table).await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_reaction_subject_user")
                    .col(reaction::Column::Kind)
                    .col(reaction::Column::Subject)
                    .col(reaction::Column::SubjectId)
                    .col(reaction::Column::UserId)
                    .table(reaction::Entity)
                    .unique()
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uq_reaction_subject_user").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(reaction::Entity).to_owned())
            .await
    }
}
