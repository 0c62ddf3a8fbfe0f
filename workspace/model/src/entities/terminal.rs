use sea_orm::entity::prelude::*;

use super::{retailer, sale};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum TerminalStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
}

impl TerminalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminalStatus::Active => "active",
            TerminalStatus::Inactive => "inactive",
        }
    }
}

/// A point-of-sale device. Every sale is recorded against exactly one terminal.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "terminals")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub retailer_id: i32,
    pub name: String,
    pub status: TerminalStatus,
    pub last_active: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "retailer::Entity",
        from = "Column::RetailerId",
        to = "retailer::Column::Id",
        on_delete = "Cascade"
    )]
    Retailer,
    #[sea_orm(has_many = "sale::Entity")]
    Sale,
}

impl Related<retailer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Retailer.def()
    }
}

impl Related<sale::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sale.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
