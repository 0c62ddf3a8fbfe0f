use axum::{extract::State, response::Json};
use common::CommissionStatement;
use compute::statement::build_commission_statement;
use tracing::instrument;

use crate::auth::AgentPrincipal;
use crate::error::ApiError;
use crate::extract::ValidQuery;
use crate::handlers::ok;
use crate::schemas::{ApiResponse, AppState, ErrorResponse, StatementQuery};

/// Commission statement for an inclusive range of days
#[utoipa::path(
    get,
    path = "/api/v1/agents/{agent_id}/commission-statement",
    tag = "commission",
    params(
        ("agent_id" = i32, Path, description = "Agent profile ID"),
        StatementQuery
    ),
    responses(
        (status = 200, description = "Statement built", body = ApiResponse<CommissionStatement>),
        (status = 400, description = "Malformed dates or end_date before start_date", body = ErrorResponse),
        (status = 503, description = "Statement unavailable, retry", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[instrument(skip(state))]
pub async fn get_commission_statement(
    principal: AgentPrincipal,
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<StatementQuery>,
) -> Result<Json<ApiResponse<CommissionStatement>>, ApiError> {
    let statement = build_commission_statement(
        state.store.as_ref(),
        principal.agent_id,
        query.start_date,
        query.end_date,
        state.settings.reporting_offset(),
    )
    .await?;
    Ok(Json(ok(statement, "Commission statement retrieved successfully")))
}
