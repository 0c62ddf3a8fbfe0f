use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use model::entities::{bank_account, retailer, sale, terminal};
use tracing::warn;

use super::{
    BankAccountInput, PortalStore, SaleLine, StoreResult, TransactionFilter, TransactionLine,
};
use crate::error::StoreError;
use crate::window::TimeRange;

/// Wraps another store and fails any call that runs longer than `limit`.
pub struct TimeoutStore<S> {
    inner: S,
    limit: Duration,
}

impl<S: PortalStore> TimeoutStore<S> {
    pub fn new(inner: S, limit: Duration) -> Self {
        Self { inner, limit }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> StoreResult<T>
    where
        F: Future<Output = StoreResult<T>> + Send,
    {
        match tokio::time::timeout(self.limit, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(operation, limit_ms = self.limit.as_millis() as u64, "Store call timed out");
                Err(StoreError::Timeout(self.limit))
            }
        }
    }
}

#[async_trait]
impl<S: PortalStore> PortalStore for TimeoutStore<S> {
    async fn agent_retailers(&self, agent_id: i32) -> StoreResult<Vec<retailer::Model>> {
        self.bounded("agent_retailers", self.inner.agent_retailers(agent_id))
            .await
    }

    async fn count_agent_retailers(&self, agent_id: i32) -> StoreResult<u64> {
        self.bounded(
            "count_agent_retailers",
            self.inner.count_agent_retailers(agent_id),
        )
        .await
    }

    async fn agent_retailer(
        &self,
        agent_id: i32,
        retailer_id: i32,
    ) -> StoreResult<Option<retailer::Model>> {
        self.bounded(
            "agent_retailer",
            self.inner.agent_retailer(agent_id, retailer_id),
        )
        .await
    }

    async fn retailer_terminals(&self, retailer_id: i32) -> StoreResult<Vec<terminal::Model>> {
        self.bounded(
            "retailer_terminals",
            self.inner.retailer_terminals(retailer_id),
        )
        .await
    }

    async fn retailer_sales(
        &self,
        agent_id: i32,
        retailer_id: i32,
    ) -> StoreResult<Vec<sale::Model>> {
        self.bounded(
            "retailer_sales",
            self.inner.retailer_sales(agent_id, retailer_id),
        )
        .await
    }

    async fn agent_sales(
        &self,
        agent_id: i32,
        range: Option<TimeRange>,
    ) -> StoreResult<Vec<SaleLine>> {
        self.bounded("agent_sales", self.inner.agent_sales(agent_id, range))
            .await
    }

    async fn agent_transactions(
        &self,
        agent_id: i32,
        filter: TransactionFilter,
    ) -> StoreResult<Vec<TransactionLine>> {
        self.bounded(
            "agent_transactions",
            self.inner.agent_transactions(agent_id, filter),
        )
        .await
    }

    async fn block_retailer(&self, agent_id: i32, retailer_id: i32) -> StoreResult<u64> {
        self.bounded(
            "block_retailer",
            self.inner.block_retailer(agent_id, retailer_id),
        )
        .await
    }

    async fn primary_bank_account(
        &self,
        profile_id: i32,
    ) -> StoreResult<Option<bank_account::Model>> {
        self.bounded(
            "primary_bank_account",
            self.inner.primary_bank_account(profile_id),
        )
        .await
    }

    async fn upsert_primary_bank_account(
        &self,
        profile_id: i32,
        input: BankAccountInput,
        now: DateTime<Utc>,
    ) -> StoreResult<bank_account::Model> {
        self.bounded(
            "upsert_primary_bank_account",
            self.inner.upsert_primary_bank_account(profile_id, input, now),
        )
        .await
    }
}
