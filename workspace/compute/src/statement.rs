//! Commission statement for a date range.
//!
//! Line items are restricted to the requested days. The stats are not: total and paid are
//! all-time figures, so `pending_commission` always means "earned and never paid out".

use chrono::{FixedOffset, NaiveDate};
use common::{CommissionStatement, LineStatus, StatementLine, StatementStats};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::error::{ensure_id, Result, StoreResultExt};
use crate::store::{PortalStore, SaleLine, TransactionFilter, TransactionLine};
use crate::summary::commission_totals;
use crate::window::statement_range;

pub const PAYOUT_LINE_TYPE: &str = "Commission Payout";
pub const UNKNOWN_VOUCHER_TYPE: &str = "Unknown";

#[instrument(skip(store))]
pub async fn build_commission_statement(
    store: &dyn PortalStore,
    agent_id: i32,
    start_date: NaiveDate,
    end_date: NaiveDate,
    offset: FixedOffset,
) -> Result<CommissionStatement> {
    ensure_id("agent", agent_id)?;
    let range = statement_range(start_date, end_date, offset)?;

    let (totals, sales, payouts) = tokio::try_join!(
        commission_totals(store, agent_id),
        async {
            store
                .agent_sales(agent_id, Some(range))
                .await
                .or_unavailable(|| format!("statement sales of agent {}", agent_id))
        },
        async {
            store
                .agent_transactions(agent_id, TransactionFilter::payouts(Some(range)))
                .await
                .or_unavailable(|| format!("statement payouts of agent {}", agent_id))
        },
    )?;

    let pending_transactions: Vec<StatementLine> = sales.into_iter().map(pending_line).collect();
    let paid_transactions: Vec<StatementLine> = payouts.into_iter().map(paid_line).collect();

    // Paid lines are not part of the count.
    let stats = StatementStats::new(totals.total, totals.paid, pending_transactions.len());

    debug!(
        pending = pending_transactions.len(),
        paid = paid_transactions.len(),
        "Commission statement built"
    );

    Ok(CommissionStatement {
        stats,
        pending_transactions,
        paid_transactions,
    })
}

fn pending_line(sale: SaleLine) -> StatementLine {
    StatementLine {
        date: sale.created_at,
        retailer_name: Some(sale.retailer_name),
        line_type: sale
            .voucher_type
            .unwrap_or_else(|| UNKNOWN_VOUCHER_TYPE.to_string()),
        value: sale.sale_amount,
        commission: sale.agent_commission,
        status: LineStatus::Pending,
    }
}

fn paid_line(line: TransactionLine) -> StatementLine {
    StatementLine {
        date: line.transaction.created_at,
        retailer_name: line.transaction.notes,
        line_type: PAYOUT_LINE_TYPE.to_string(),
        value: Decimal::ZERO,
        commission: line.transaction.amount,
        status: LineStatus::Paid,
    }
}
