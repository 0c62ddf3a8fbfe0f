use sea_orm::entity::prelude::*;

/// Role a profile acts under once its session is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ProfileRole {
    #[sea_orm(string_value = "agent")]
    Agent,
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "retailer")]
    Retailer,
}

impl ProfileRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileRole::Agent => "agent",
            ProfileRole::Admin => "admin",
            ProfileRole::Retailer => "retailer",
        }
    }
}

/// A person who can sign in to the portal. Agents are profiles with the `agent` role.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub full_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub role: ProfileRole,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// An agent manages many retailers.
    #[sea_orm(has_many = "super::retailer::Entity")]
    Retailer,
    /// Statement and payout records of the agent.
    #[sea_orm(has_many = "super::agent_transaction::Entity")]
    AgentTransaction,
    #[sea_orm(has_many = "super::bank_account::Entity")]
    BankAccount,
    #[sea_orm(has_many = "super::session::Entity")]
    Session,
}

impl Related<super::retailer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Retailer.def()
    }
}

impl Related<super::agent_transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AgentTransaction.def()
    }
}

impl Related<super::bank_account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BankAccount.def()
    }
}

impl Related<super::session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
