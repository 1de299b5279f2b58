pub use sea_orm_migration::prelude::*;

mod m20250112_091433_create_user_table;
mod m20250112_104012_create_donation_table;
mod m20250113_081921_create_request_table;
mod m20250113_090356_create_report_table;
mod m20250114_071208_create_comment_table;
mod m20250114_073655_create_reaction_table;
mod m20250115_100241_create_post_table;
mod m20250116_062917_create_message_table;
mod m20250116_064530_create_chat_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250112_091433_create_user_table::Migration),
            Box::new(m20250112_104012_create_donation_table::Migration),
            Box::new(m20250113_081921_create_request_table::Migration),
            Box::new(m20250113_090356_create_report_table::Migration),
            Box::new(m20250114_071208_create_comment_table::Migration),
            Box::new(m20250114_073655_create_reaction_table::Migration),
            Box::new(m20250115_100241_create_post_table::Migration),
            Box::new(m20250116_062917_create_message_table::Migration),
            Box::new(m20250116_064530_create_chat_table::Migration),
        ]
    }
}
