//! Transport-layer types shared between the aggregation core and the HTTP API.
//! The compute crate returns these shapes and the API serves them unchanged.

mod bank_account;
mod commission;
mod retailers;
mod transactions;

pub use bank_account::{BankAccountDto, SaveBankAccountRequest};
pub use commission::{
    AgentSummary, CommissionStatement, LineStatus, StatementLine, StatementStats,
};
pub use retailers::{
    AggregationStatus, RetailerDetail, RetailerSalesSummary, RetailerWithSales, RosterSortKey,
    SortDirection, TerminalDto,
};
pub use transactions::AgentTransactionDto;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

/// Everything the agent landing page shows, loaded in one call.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DashboardDto {
    /// `None` when the summary could not be computed. Never read this as zero.
    pub summary: Option<AgentSummary>,
    pub retailers: Vec<RetailerWithSales>,
}
