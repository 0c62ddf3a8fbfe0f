//! Commission aggregation and reconciliation for the agent portal.
//!
//! Every operation takes the data store explicitly as `&dyn PortalStore` and the agent id
//! as a plain argument. Nothing is cached between calls.

pub mod bank_account;
pub mod dashboard;
pub mod error;
pub mod retailer;
pub mod roster;
pub mod statement;
pub mod store;
pub mod summary;
pub mod transactions;
pub mod window;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;
use std::time::Duration;

use sea_orm::DatabaseConnection;
use store::{PortalStore, SeaOrmStore, TimeoutStore};

/// Returns the store used by the running service: the SeaORM store with every call bounded
/// by `query_timeout`.
pub fn default_store(db: DatabaseConnection, query_timeout: Duration) -> Arc<dyn PortalStore> {
    Arc::new(TimeoutStore::new(SeaOrmStore::new(db), query_timeout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{insert_agent, setup_db};

    #[tokio::test]
    async fn test_default_store_answers_queries() {
        let db = setup_db().await.unwrap();
        let agent = insert_agent(&db, "Agent A").await.unwrap();
        let store = default_store(db, Duration::from_secs(5));

        let summary = summary::fetch_agent_summary(store.as_ref(), agent.id).await.unwrap();
        assert_eq!(summary.retailer_count, 0);
    }
}
