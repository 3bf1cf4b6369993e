//! Create `applications` table.
//!
//! Applications are provisioned administratively and looked up during login.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Applications::Table)
                    .if_not_exists()
                    .col(big_integer(Applications::Id).auto_increment().primary_key())
                    .col(string_len(Applications::Name, 128).unique_key().not_null())
                    .col(timestamp_with_time_zone(Applications::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Applications::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Applications { Table, Id, Name, CreatedAt }
