use sea_orm_migration::{prelude::*, schema::*};

use crate::m20240301_000001_create_portal_tables::Profiles;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BankAccounts::Table)
                    .if_not_exists()
                    .col(pk_auto(BankAccounts::Id))
                    .col(integer(BankAccounts::ProfileId))
                    .col(string(BankAccounts::BankName))
                    .col(string(BankAccounts::AccountHolder))
                    .col(string(BankAccounts::AccountNumber))
                    .col(string_null(BankAccounts::BranchCode))
                    .col(string_len(BankAccounts::AccountType, 20))
                    .col(boolean(BankAccounts::IsPrimary).default(false))
                    .col(timestamp_with_time_zone(BankAccounts::CreatedAt))
                    .col(timestamp_with_time_zone(BankAccounts::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bank_account_profile")
                            .from(BankAccounts::Table, BankAccounts::ProfileId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // At most one primary account per profile (partial index, SQLite and PostgreSQL)
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_bank_accounts_single_primary \
                 ON bank_accounts (profile_id) WHERE is_primary",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP INDEX IF EXISTS idx_bank_accounts_single_primary")
            .await?;

        manager
            .drop_table(Table::drop().table(BankAccounts::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum BankAccounts {
    Table,
    Id,
    ProfileId,
    BankName,
    AccountHolder,
    AccountNumber,
    BranchCode,
    AccountType,
    IsPrimary,
    CreatedAt,
    UpdatedAt,
}
