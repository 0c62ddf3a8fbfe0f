use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Agent-level commission rollup, all time.
///
/// Pending commission is deliberately not a field: it is always derived through
/// [`AgentSummary::pending_commission`] so it can never drift from the two sums.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AgentSummary {
    pub retailer_count: u64,
    /// Sum of `agent_commission` over every sale owned by the agent.
    pub total_commission: Decimal,
    /// Sum of `commission_payout` transaction amounts.
    pub paid_commission: Decimal,
}

impl AgentSummary {
    pub fn pending_commission(&self) -> Decimal {
        self.total_commission - self.paid_commission
    }
}

/// Statement totals. The fields are private so `pending_commission` can only be set
/// by [`StatementStats::new`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct StatementStats {
    total_commission: Decimal,
    paid_commission: Decimal,
    pending_commission: Decimal,
    transaction_count: usize,
}

impl StatementStats {
    pub fn new(total_commission: Decimal, paid_commission: Decimal, transaction_count: usize) -> Self {
        Self {
            total_commission,
            paid_commission,
            pending_commission: total_commission - paid_commission,
            transaction_count,
        }
    }

    pub fn total_commission(&self) -> Decimal {
        self.total_commission
    }

    pub fn paid_commission(&self) -> Decimal {
        self.paid_commission
    }

    pub fn pending_commission(&self) -> Decimal {
        self.pending_commission
    }

    /// Number of pending (sale-derived) lines. Paid lines are not counted.
    pub fn transaction_count(&self) -> usize {
        self.transaction_count
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum LineStatus {
    Pending,
    Paid,
}

/// A single statement line, either a sale (pending) or a payout (paid).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct StatementLine {
    pub date: DateTime<Utc>,
    pub retailer_name: Option<String>,
    /// Voucher type name for sales, "Commission Payout" for payouts.
    #[serde(rename = "type")]
    pub line_type: String,
    pub value: Decimal,
    pub commission: Decimal,
    pub status: LineStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CommissionStatement {
    pub stats: StatementStats,
    pub pending_transactions: Vec<StatementLine>,
    pub paid_transactions: Vec<StatementLine>,
}
