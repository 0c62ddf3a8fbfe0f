use axum::{extract::State, response::Json};
use common::DashboardDto;
use compute::dashboard::load_dashboard;
use tracing::instrument;

use crate::auth::AgentPrincipal;
use crate::error::ApiError;
use crate::handlers::ok;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Roster and summary in one call; `summary` is null when it could not be computed
#[utoipa::path(
    get,
    path = "/api/v1/agents/{agent_id}/dashboard",
    tag = "dashboard",
    params(("agent_id" = i32, Path, description = "Agent profile ID")),
    responses(
        (status = 200, description = "Dashboard loaded", body = ApiResponse<DashboardDto>),
        (status = 503, description = "Roster unavailable, retry", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[instrument(skip(state))]
pub async fn get_dashboard(
    principal: AgentPrincipal,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardDto>>, ApiError> {
    let dashboard = load_dashboard(
        state.store.as_ref(),
        principal.agent_id,
        state.settings.roster_concurrency,
    )
    .await?;
    Ok(Json(ok(dashboard, "Dashboard loaded successfully")))
}
