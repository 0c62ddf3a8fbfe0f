//! Single-retailer drill down: profile with terminals, and windowed sales rollups.
//! Both resolve the retailer through the agent first, so a foreign id is not found.

use chrono::{DateTime, FixedOffset, Utc};
use common::{RetailerDetail, RetailerSalesSummary, TerminalDto};
use model::entities::{retailer, sale, terminal};
use tracing::{debug, instrument, warn};

use crate::error::{ensure_id, PortalError, Result, StoreResultExt};
use crate::store::PortalStore;
use crate::window::SalesWindows;

/// Retailer profile and terminal list, only when the retailer belongs to the agent.
#[instrument(skip(store))]
pub async fn fetch_retailer_detail(
    store: &dyn PortalStore,
    agent_id: i32,
    retailer_id: i32,
) -> Result<RetailerDetail> {
    let retailer = owned_retailer(store, agent_id, retailer_id).await?;

    let terminals = store
        .retailer_terminals(retailer.id)
        .await
        .or_unavailable(|| format!("terminals of retailer {}", retailer_id))?;

    Ok(RetailerDetail {
        id: retailer.id,
        name: retailer.name,
        location: retailer.location,
        status: retailer.status.to_string(),
        balance: retailer.balance,
        commission_balance: retailer.commission_balance,
        contact_person: retailer.contact_person,
        contact_email: retailer.contact_email,
        contact_phone: retailer.contact_phone,
        created_at: retailer.created_at,
        terminals: terminals.into_iter().map(terminal_dto).collect(),
    })
}

fn terminal_dto(terminal: terminal::Model) -> TerminalDto {
    TerminalDto {
        id: terminal.id,
        name: terminal.name,
        status: terminal.status.as_str().to_string(),
        last_active: terminal.last_active,
    }
}

async fn owned_retailer(
    store: &dyn PortalStore,
    agent_id: i32,
    retailer_id: i32,
) -> Result<retailer::Model> {
    ensure_id("agent", agent_id)?;
    ensure_id("retailer", retailer_id)?;

    store
        .agent_retailer(agent_id, retailer_id)
        .await
        .or_unavailable(|| format!("retailer {}", retailer_id))?
        .ok_or_else(|| {
            warn!("Retailer not visible to agent");
            PortalError::not_found(format!("retailer {}", retailer_id))
        })
}

/// Today, month-to-date and all-time sales of one retailer as of `now`.
#[instrument(skip(store))]
pub async fn fetch_retailer_sales_summary(
    store: &dyn PortalStore,
    agent_id: i32,
    retailer_id: i32,
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> Result<RetailerSalesSummary> {
    let windows = SalesWindows::at(now, offset)?;
    let retailer = owned_retailer(store, agent_id, retailer_id).await?;

    let sales = store
        .retailer_sales(agent_id, retailer.id)
        .await
        .or_unavailable(|| format!("sales of retailer {}", retailer_id))?;

    let summary = summarize_sales(&sales, &windows);
    debug!(?summary, "Retailer sales summarised");
    Ok(summary)
}

/// Buckets one sale set into the three windows in a single pass.
pub fn summarize_sales(sales: &[sale::Model], windows: &SalesWindows) -> RetailerSalesSummary {
    sales
        .iter()
        .fold(RetailerSalesSummary::default(), |mut summary, sale| {
            summary.total_count += 1;
            summary.total_value += sale.sale_amount;
            summary.total_commission += sale.agent_commission;

            if windows.is_month_to_date(sale.created_at) {
                summary.mtd_count += 1;
                summary.mtd_value += sale.sale_amount;
            }
            if windows.is_today(sale.created_at) {
                summary.today_count += 1;
                summary.today_value += sale.sale_amount;
            }
            summary
        })
}
