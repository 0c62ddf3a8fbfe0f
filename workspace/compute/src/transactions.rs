use common::AgentTransactionDto;
use tracing::{debug, instrument};

use crate::error::{ensure_id, PortalError, Result, StoreResultExt};
use crate::store::{PortalStore, TransactionFilter, TransactionLine};

pub const MAX_PAGE_SIZE: i64 = 200;

/// Newest-first slice of the agent's statement history.
#[instrument(skip(store))]
pub async fn fetch_agent_transactions(
    store: &dyn PortalStore,
    agent_id: i32,
    offset: i64,
    limit: i64,
) -> Result<Vec<AgentTransactionDto>> {
    ensure_id("agent", agent_id)?;
    if offset < 0 {
        return Err(PortalError::validation(format!("offset must not be negative, got {}", offset)));
    }
    if !(1..=MAX_PAGE_SIZE).contains(&limit) {
        return Err(PortalError::validation(format!(
            "limit must be between 1 and {}, got {}",
            MAX_PAGE_SIZE, limit
        )));
    }

    let filter = TransactionFilter {
        offset: offset as u64,
        limit: Some(limit as u64),
        ..Default::default()
    };
    let lines = store
        .agent_transactions(agent_id, filter)
        .await
        .or_unavailable(|| format!("transactions of agent {}", agent_id))?;

    debug!(count = lines.len(), "Agent transactions loaded");
    Ok(lines.into_iter().map(transaction_dto).collect())
}

fn transaction_dto(line: TransactionLine) -> AgentTransactionDto {
    let TransactionLine {
        transaction,
        retailer_name,
    } = line;
    AgentTransactionDto {
        id: transaction.id,
        transaction_type: transaction.transaction_type.as_str().to_string(),
        amount: transaction.amount,
        balance_after: transaction.balance_after,
        notes: transaction.notes,
        retailer_name,
        created_at: transaction.created_at,
    }
}
