use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create profiles table
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(pk_auto(Profiles::Id))
                    .col(string(Profiles::FullName))
                    .col(string(Profiles::Email).unique_key())
                    .col(string_len(Profiles::Role, 20))
                    .to_owned(),
            )
            .await?;

        // Create sessions table
        manager
            .create_table(
                Table::create()
                    .table(Sessions::Table)
                    .if_not_exists()
                    .col(pk_auto(Sessions::Id))
                    .col(string(Sessions::Token).unique_key())
                    .col(integer(Sessions::ProfileId))
                    .col(timestamp_with_time_zone(Sessions::ExpiresAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_session_profile")
                            .from(Sessions::Table, Sessions::ProfileId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create voucher_types table
        manager
            .create_table(
                Table::create()
                    .table(VoucherTypes::Table)
                    .if_not_exists()
                    .col(pk_auto(VoucherTypes::Id))
                    .col(string(VoucherTypes::Name).unique_key())
                    .to_owned(),
            )
            .await?;

        // Create retailers table
        manager
            .create_table(
                Table::create()
                    .table(Retailers::Table)
                    .if_not_exists()
                    .col(pk_auto(Retailers::Id))
                    .col(integer_null(Retailers::AgentProfileId))
                    .col(string(Retailers::Name))
                    .col(string_null(Retailers::Location))
                    .col(string_len(Retailers::Status, 20).default("active"))
                    .col(decimal(Retailers::Balance).decimal_len(16, 4).default(0))
                    .col(decimal(Retailers::CommissionBalance).decimal_len(16, 4).default(0))
                    .col(string_null(Retailers::ContactPerson))
                    .col(string_null(Retailers::ContactEmail))
                    .col(string_null(Retailers::ContactPhone))
                    .col(timestamp_with_time_zone(Retailers::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_retailer_agent")
                            .from(Retailers::Table, Retailers::AgentProfileId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_retailers_agent_profile_id")
                    .table(Retailers::Table)
                    .col(Retailers::AgentProfileId)
                    .to_owned(),
            )
            .await?;

        // Create terminals table
        manager
            .create_table(
                Table::create()
                    .table(Terminals::Table)
                    .if_not_exists()
                    .col(pk_auto(Terminals::Id))
                    .col(integer(Terminals::RetailerId))
                    .col(string(Terminals::Name))
                    .col(string_len(Terminals::Status, 20).default("active"))
                    .col(timestamp_with_time_zone_null(Terminals::LastActive))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_terminal_retailer")
                            .from(Terminals::Table, Terminals::RetailerId)
                            .to(Retailers::Table, Retailers::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_terminals_retailer_id")
                    .table(Terminals::Table)
                    .col(Terminals::RetailerId)
                    .to_owned(),
            )
            .await?;

        // Create sales table
        manager
            .create_table(
                Table::create()
                    .table(Sales::Table)
                    .if_not_exists()
                    .col(pk_auto(Sales::Id))
                    .col(integer(Sales::TerminalId))
                    .col(integer_null(Sales::VoucherTypeId))
                    .col(decimal(Sales::SaleAmount).decimal_len(16, 4))
                    .col(decimal(Sales::AgentCommission).decimal_len(16, 4))
                    .col(timestamp_with_time_zone(Sales::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sale_terminal")
                            .from(Sales::Table, Sales::TerminalId)
                            .to(Terminals::Table, Terminals::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sale_voucher_type")
                            .from(Sales::Table, Sales::VoucherTypeId)
                            .to(VoucherTypes::Table, VoucherTypes::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sales_terminal_created_at")
                    .table(Sales::Table)
                    .col(Sales::TerminalId)
                    .col(Sales::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Create agent_transactions table
        manager
            .create_table(
                Table::create()
                    .table(AgentTransactions::Table)
                    .if_not_exists()
                    .col(pk_auto(AgentTransactions::Id))
                    .col(integer(AgentTransactions::AgentProfileId))
                    .col(string_len(AgentTransactions::TransactionType, 32))
                    .col(decimal(AgentTransactions::Amount).decimal_len(16, 4))
                    .col(decimal(AgentTransactions::BalanceAfter).decimal_len(16, 4))
                    .col(string_null(AgentTransactions::Notes))
                    .col(integer_null(AgentTransactions::RetailerId))
                    .col(timestamp_with_time_zone(AgentTransactions::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_agent_transaction_agent")
                            .from(AgentTransactions::Table, AgentTransactions::AgentProfileId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_agent_transaction_retailer")
                            .from(AgentTransactions::Table, AgentTransactions::RetailerId)
                            .to(Retailers::Table, Retailers::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_agent_transactions_agent_created_at")
                    .table(AgentTransactions::Table)
                    .col(AgentTransactions::AgentProfileId)
                    .col(AgentTransactions::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order to avoid foreign key constraints
        manager
            .drop_table(Table::drop().table(AgentTransactions::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Sales::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Terminals::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Retailers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(VoucherTypes::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Sessions::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Profiles {
    Table,
    Id,
    FullName,
    Email,
    Role,
}

#[derive(DeriveIden)]
enum Sessions {
    Table,
    Id,
    Token,
    ProfileId,
    ExpiresAt,
}

#[derive(DeriveIden)]
enum VoucherTypes {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Retailers {
    Table,
    Id,
    AgentProfileId,
    Name,
    Location,
    Status,
    Balance,
    CommissionBalance,
    ContactPerson,
    ContactEmail,
    ContactPhone,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Terminals {
    Table,
    Id,
    RetailerId,
    Name,
    Status,
    LastActive,
}

#[derive(DeriveIden)]
enum Sales {
    Table,
    Id,
    TerminalId,
    VoucherTypeId,
    SaleAmount,
    AgentCommission,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AgentTransactions {
    Table,
    Id,
    AgentProfileId,
    TransactionType,
    Amount,
    BalanceAfter,
    Notes,
    RetailerId,
    CreatedAt,
}
