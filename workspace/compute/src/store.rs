//! Data store gateway.
//!
//! Aggregators never touch the database directly; they receive a `&dyn PortalStore`.
//! [`SeaOrmStore`] is the production implementation and [`TimeoutStore`] bounds the
//! duration of every call made through it.

pub mod database;
pub mod timeout;

pub use self::database::SeaOrmStore;
pub use self::timeout::TimeoutStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use model::entities::{agent_transaction, bank_account, retailer, sale, terminal};
use rust_decimal::Decimal;
use sea_orm::FromQueryResult;

use crate::error::StoreError;
use crate::window::TimeRange;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// A sale joined with the names the statement needs.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct SaleLine {
    pub id: i32,
    pub retailer_id: i32,
    pub retailer_name: String,
    pub voucher_type: Option<String>,
    pub sale_amount: Decimal,
    pub agent_commission: Decimal,
    pub created_at: DateTime<Utc>,
}

/// An agent transaction with the name of its related retailer, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionLine {
    pub transaction: agent_transaction::Model,
    pub retailer_name: Option<String>,
}

/// Predicate for agent transaction lookups.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub transaction_type: Option<agent_transaction::TransactionType>,
    pub range: Option<TimeRange>,
    /// Rows to skip. Only applied together with `limit`.
    pub offset: u64,
    pub limit: Option<u64>,
}

impl TransactionFilter {
    /// Every payout, optionally restricted to a time range.
    pub fn payouts(range: Option<TimeRange>) -> Self {
        Self {
            transaction_type: Some(agent_transaction::TransactionType::CommissionPayout),
            range,
            ..Default::default()
        }
    }
}

/// Validated fields of the primary bank account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankAccountInput {
    pub bank_name: String,
    pub account_holder: String,
    pub account_number: String,
    pub branch_code: Option<String>,
    pub account_type: bank_account::BankAccountType,
}

/// Row-level access to the portal's relational store.
///
/// Every lookup that takes an `agent_id` filters by ownership in the query itself.
#[async_trait]
pub trait PortalStore: Send + Sync {
    /// Retailers assigned to the agent, ordered by name.
    async fn agent_retailers(&self, agent_id: i32) -> StoreResult<Vec<retailer::Model>>;

    async fn count_agent_retailers(&self, agent_id: i32) -> StoreResult<u64>;

    /// The retailer, only if it is assigned to the agent.
    async fn agent_retailer(
        &self,
        agent_id: i32,
        retailer_id: i32,
    ) -> StoreResult<Option<retailer::Model>>;

    async fn retailer_terminals(&self, retailer_id: i32) -> StoreResult<Vec<terminal::Model>>;

    /// All-time sales of one retailer, joined through its terminals. Empty when the
    /// retailer is not assigned to the agent.
    async fn retailer_sales(&self, agent_id: i32, retailer_id: i32)
    -> StoreResult<Vec<sale::Model>>;

    /// Sales transitively owned by the agent, newest first.
    async fn agent_sales(
        &self,
        agent_id: i32,
        range: Option<TimeRange>,
    ) -> StoreResult<Vec<SaleLine>>;

    /// Agent transactions matching the filter, newest first.
    async fn agent_transactions(
        &self,
        agent_id: i32,
        filter: TransactionFilter,
    ) -> StoreResult<Vec<TransactionLine>>;

    /// Sets the retailer's status to blocked in a single conditional update keyed by
    /// `(retailer_id, agent_id)`. Returns the number of rows changed.
    async fn block_retailer(&self, agent_id: i32, retailer_id: i32) -> StoreResult<u64>;

    async fn primary_bank_account(
        &self,
        profile_id: i32,
    ) -> StoreResult<Option<bank_account::Model>>;

    /// Updates the profile's primary account, or inserts it as primary when none exists.
    async fn upsert_primary_bank_account(
        &self,
        profile_id: i32,
        input: BankAccountInput,
        now: DateTime<Utc>,
    ) -> StoreResult<bank_account::Model>;
}
