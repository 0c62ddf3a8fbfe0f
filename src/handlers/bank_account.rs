use axum::{extract::State, response::Json};
use chrono::Utc;
use common::{BankAccountDto, SaveBankAccountRequest};
use compute::bank_account;
use tracing::instrument;

use crate::auth::AgentPrincipal;
use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::handlers::ok;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// The agent's primary payout account, or null when none is saved
#[utoipa::path(
    get,
    path = "/api/v1/agents/{agent_id}/bank-account",
    tag = "bank-account",
    params(("agent_id" = i32, Path, description = "Agent profile ID")),
    responses(
        (status = 200, description = "Bank account retrieved", body = ApiResponse<Option<BankAccountDto>>),
        (status = 503, description = "Data unavailable, retry", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[instrument(skip(state))]
pub async fn get_bank_account(
    principal: AgentPrincipal,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Option<BankAccountDto>>>, ApiError> {
    let account = bank_account::fetch_bank_account(state.store.as_ref(), principal.agent_id).await?;
    Ok(Json(ok(account, "Bank account retrieved successfully")))
}

/// Create or update the agent's primary payout account
#[utoipa::path(
    put,
    path = "/api/v1/agents/{agent_id}/bank-account",
    tag = "bank-account",
    params(("agent_id" = i32, Path, description = "Agent profile ID")),
    request_body = SaveBankAccountRequest,
    responses(
        (status = 200, description = "Bank account saved", body = ApiResponse<BankAccountDto>),
        (status = 400, description = "Invalid bank account details", body = ErrorResponse),
        (status = 503, description = "Data unavailable, retry", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[instrument(skip(state, request))]
pub async fn save_bank_account(
    principal: AgentPrincipal,
    State(state): State<AppState>,
    ValidJson(request): ValidJson<SaveBankAccountRequest>,
) -> Result<Json<ApiResponse<BankAccountDto>>, ApiError> {
    let saved =
        bank_account::save_bank_account(state.store.as_ref(), principal.agent_id, request, Utc::now())
            .await?;
    Ok(Json(ok(saved, "Bank account saved successfully")))
}
