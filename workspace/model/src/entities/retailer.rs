use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use std::fmt;
use std::str::FromStr;

use super::{profile, terminal};

/// Lifecycle status of a retailer. Retailers are never deleted, only moved between statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum RetailerStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
    #[sea_orm(string_value = "suspended")]
    Suspended,
    #[sea_orm(string_value = "blocked")]
    Blocked,
}

impl RetailerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RetailerStatus::Active => "active",
            RetailerStatus::Inactive => "inactive",
            RetailerStatus::Suspended => "suspended",
            RetailerStatus::Blocked => "blocked",
        }
    }
}

impl fmt::Display for RetailerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RetailerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(RetailerStatus::Active),
            "inactive" => Ok(RetailerStatus::Inactive),
            "suspended" => Ok(RetailerStatus::Suspended),
            "blocked" => Ok(RetailerStatus::Blocked),
            other => Err(format!("unknown retailer status '{}'", other)),
        }
    }
}

/// A merchant account selling vouchers through one or more terminals.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "retailers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// The managing agent. Null until the retailer is assigned.
    pub agent_profile_id: Option<i32>,
    pub name: String,
    pub location: Option<String>,
    pub status: RetailerStatus,
    /// Current spendable float.
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub balance: Decimal,
    /// Unpaid commission owed to the retailer (not the agent).
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub commission_balance: Decimal,
    pub contact_person: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "profile::Entity",
        from = "Column::AgentProfileId",
        to = "profile::Column::Id",
        on_delete = "SetNull"
    )]
    Agent,
    #[sea_orm(has_many = "terminal::Entity")]
    Terminal,
}

impl Related<profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Agent.def()
    }
}

impl Related<terminal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Terminal.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
