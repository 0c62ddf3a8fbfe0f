use common::DashboardDto;
use tracing::{instrument, warn};

use crate::error::{ensure_id, Result};
use crate::roster::fetch_my_retailers;
use crate::store::PortalStore;
use crate::summary::fetch_agent_summary;

/// Roster and summary, loaded concurrently.
///
/// A failed summary is reported as `None` so the page still shows the roster. A failed
/// roster fails the dashboard.
#[instrument(skip(store))]
pub async fn load_dashboard(
    store: &dyn PortalStore,
    agent_id: i32,
    roster_concurrency: usize,
) -> Result<DashboardDto> {
    ensure_id("agent", agent_id)?;

    let (retailers, summary) = tokio::join!(
        fetch_my_retailers(store, agent_id, roster_concurrency),
        fetch_agent_summary(store, agent_id),
    );

    let summary = match summary {
        Ok(summary) => Some(summary),
        Err(err) => {
            warn!(error = %err, "Summary unavailable on dashboard");
            None
        }
    };

    Ok(DashboardDto {
        summary,
        retailers: retailers?,
    })
}
