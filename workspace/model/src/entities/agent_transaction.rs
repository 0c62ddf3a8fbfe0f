use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::{profile, retailer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum TransactionType {
    #[sea_orm(string_value = "commission_credit")]
    CommissionCredit,
    /// Money already paid out to the agent. The authoritative source of paid commission.
    #[sea_orm(string_value = "commission_payout")]
    CommissionPayout,
    #[sea_orm(string_value = "adjustment")]
    Adjustment,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::CommissionCredit => "commission_credit",
            TransactionType::CommissionPayout => "commission_payout",
            TransactionType::Adjustment => "adjustment",
        }
    }
}

/// A line on the agent's running statement.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "agent_transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub agent_profile_id: i32,
    pub transaction_type: TransactionType,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub balance_after: Decimal,
    pub notes: Option<String>,
    /// Retailer the entry relates to, if any.
    pub retailer_id: Option<i32>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "profile::Entity",
        from = "Column::AgentProfileId",
        to = "profile::Column::Id",
        on_delete = "Cascade"
    )]
    Agent,
    #[sea_orm(
        belongs_to = "retailer::Entity",
        from = "Column::RetailerId",
        to = "retailer::Column::Id",
        on_delete = "SetNull"
    )]
    Retailer,
}

impl Related<profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Agent.def()
    }
}

impl Related<retailer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Retailer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
