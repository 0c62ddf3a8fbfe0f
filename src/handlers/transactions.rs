use axum::{extract::State, response::Json};
use common::AgentTransactionDto;
use compute::transactions::fetch_agent_transactions;
use tracing::{debug, instrument};

use crate::auth::AgentPrincipal;
use crate::error::ApiError;
use crate::extract::ValidQuery;
use crate::handlers::ok;
use crate::schemas::{ApiResponse, AppState, ErrorResponse, TransactionsQuery};

const DEFAULT_PAGE_SIZE: i64 = 50;

/// The agent's statement history, newest first
#[utoipa::path(
    get,
    path = "/api/v1/agents/{agent_id}/transactions",
    tag = "transactions",
    params(
        ("agent_id" = i32, Path, description = "Agent profile ID"),
        TransactionsQuery
    ),
    responses(
        (status = 200, description = "Transactions retrieved successfully", body = ApiResponse<Vec<AgentTransactionDto>>),
        (status = 400, description = "Invalid offset or limit", body = ErrorResponse),
        (status = 503, description = "Data unavailable, retry", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[instrument(skip(state))]
pub async fn get_transactions(
    principal: AgentPrincipal,
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<TransactionsQuery>,
) -> Result<Json<ApiResponse<Vec<AgentTransactionDto>>>, ApiError> {
    let offset = query.offset.unwrap_or(0);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);
    debug!(offset, limit, "Fetching agent transactions");

    let transactions =
        fetch_agent_transactions(state.store.as_ref(), principal.agent_id, offset, limit).await?;
    Ok(Json(ok(transactions, "Transactions retrieved successfully")))
}
