use axum::{extract::State, response::Json};
use common::AgentSummary;
use compute::summary::fetch_agent_summary;
use tracing::instrument;

use crate::auth::AgentPrincipal;
use crate::error::ApiError;
use crate::handlers::ok;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// All-time commission summary of the agent
///
/// Pending commission is not part of the payload; clients derive it as
/// `total_commission - paid_commission`.
#[utoipa::path(
    get,
    path = "/api/v1/agents/{agent_id}/summary",
    tag = "commission",
    params(("agent_id" = i32, Path, description = "Agent profile ID")),
    responses(
        (status = 200, description = "Summary computed", body = ApiResponse<AgentSummary>),
        (status = 503, description = "Summary unavailable, retry", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[instrument(skip(state))]
pub async fn get_summary(
    principal: AgentPrincipal,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AgentSummary>>, ApiError> {
    let summary = fetch_agent_summary(state.store.as_ref(), principal.agent_id).await?;
    Ok(Json(ok(summary, "Summary retrieved successfully")))
}
