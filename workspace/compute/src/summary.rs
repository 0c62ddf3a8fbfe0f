use common::AgentSummary;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::error::{ensure_id, Result, StoreResultExt};
use crate::store::{PortalStore, TransactionFilter};

/// All-time commission earned and paid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommissionTotals {
    pub total: Decimal,
    pub paid: Decimal,
}

/// Sums `agent_commission` over every owned sale and `amount` over every payout.
///
/// Both reads run concurrently and either failure fails the whole result.
pub(crate) async fn commission_totals(
    store: &dyn PortalStore,
    agent_id: i32,
) -> Result<CommissionTotals> {
    let (sales, payouts) = tokio::try_join!(
        async {
            store
                .agent_sales(agent_id, None)
                .await
                .or_unavailable(|| format!("sales of agent {}", agent_id))
        },
        async {
            store
                .agent_transactions(agent_id, TransactionFilter::payouts(None))
                .await
                .or_unavailable(|| format!("payouts of agent {}", agent_id))
        },
    )?;

    Ok(CommissionTotals {
        total: sales.iter().map(|sale| sale.agent_commission).sum(),
        paid: payouts.iter().map(|line| line.transaction.amount).sum(),
    })
}

/// Agent-level rollup. Any failing read fails the summary; there is no partial result.
#[instrument(skip(store))]
pub async fn fetch_agent_summary(store: &dyn PortalStore, agent_id: i32) -> Result<AgentSummary> {
    ensure_id("agent", agent_id)?;

    let (retailer_count, totals) = tokio::try_join!(
        async {
            store
                .count_agent_retailers(agent_id)
                .await
                .or_unavailable(|| format!("retailer count of agent {}", agent_id))
        },
        commission_totals(store, agent_id),
    )?;

    let summary = AgentSummary {
        retailer_count,
        total_commission: totals.total,
        paid_commission: totals.paid,
    };
    debug!(?summary, "Agent summary computed");
    Ok(summary)
}
