use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::{terminal, voucher_type};

/// One voucher sale. Rows are immutable once written.
///
/// Ownership runs sale -> terminal -> retailer -> agent; there is no denormalised agent
/// column, so "sales of agent X" always joins through terminals and retailers.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sales")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub terminal_id: i32,
    pub voucher_type_id: Option<i32>,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub sale_amount: Decimal,
    /// The agent's cut of this sale, persisted at sale time.
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub agent_commission: Decimal,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "terminal::Entity",
        from = "Column::TerminalId",
        to = "terminal::Column::Id",
        on_delete = "Restrict"
    )]
    Terminal,
    #[sea_orm(
        belongs_to = "voucher_type::Entity",
        from = "Column::VoucherTypeId",
        to = "voucher_type::Column::Id",
        on_delete = "SetNull"
    )]
    VoucherType,
}

impl Related<terminal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Terminal.def()
    }
}

impl Related<voucher_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VoucherType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
