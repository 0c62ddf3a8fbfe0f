use sea_orm::entity::prelude::*;
use std::str::FromStr;

use super::profile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum BankAccountType {
    #[sea_orm(string_value = "cheque")]
    Cheque,
    #[sea_orm(string_value = "savings")]
    Savings,
    #[sea_orm(string_value = "transmission")]
    Transmission,
}

impl BankAccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BankAccountType::Cheque => "cheque",
            BankAccountType::Savings => "savings",
            BankAccountType::Transmission => "transmission",
        }
    }
}

impl FromStr for BankAccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cheque" => Ok(BankAccountType::Cheque),
            "savings" => Ok(BankAccountType::Savings),
            "transmission" => Ok(BankAccountType::Transmission),
            other => Err(format!("unknown bank account type '{}'", other)),
        }
    }
}

/// Payout destination of a profile. At most one row per profile has `is_primary` set;
/// a partial unique index enforces this at the database level as well.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bank_accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub profile_id: i32,
    pub bank_name: String,
    pub account_holder: String,
    pub account_number: String,
    pub branch_code: Option<String>,
    pub account_type: BankAccountType,
    #[sea_orm(default_value = "false")]
    pub is_primary: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "profile::Entity",
        from = "Column::ProfileId",
        to = "profile::Column::Id",
        on_delete = "Cascade"
    )]
    Profile,
}

impl Related<profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
