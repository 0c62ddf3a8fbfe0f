use axum::{
    extract::{Path, State},
    response::Json,
};
use chrono::Utc;
use common::{RetailerDetail, RetailerSalesSummary, RetailerWithSales, RosterSortKey};
use compute::{retailer, roster};
use compute::roster::{RosterFilter, RosterSort};
use model::entities::retailer::RetailerStatus;
use tracing::{debug, info, instrument};

use crate::auth::AgentPrincipal;
use crate::error::ApiError;
use crate::extract::ValidQuery;
use crate::handlers::ok;
use crate::schemas::{ApiResponse, AppState, BlockRetailerResponse, ErrorResponse, RosterQuery};

/// List the agent's retailers with all-time sales aggregates
#[utoipa::path(
    get,
    path = "/api/v1/agents/{agent_id}/retailers",
    tag = "retailers",
    params(
        ("agent_id" = i32, Path, description = "Agent profile ID"),
        RosterQuery
    ),
    responses(
        (status = 200, description = "Roster retrieved successfully", body = ApiResponse<Vec<RetailerWithSales>>),
        (status = 400, description = "Invalid filter or sort", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not allowed to act as this agent", body = ErrorResponse),
        (status = 503, description = "Data unavailable, retry", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[instrument(skip(state))]
pub async fn get_retailers(
    principal: AgentPrincipal,
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<RosterQuery>,
) -> Result<Json<ApiResponse<Vec<RetailerWithSales>>>, ApiError> {
    let filter = RosterFilter {
        search: query.search,
        status: roster::parse_status_filter(query.status.as_deref())?,
    };
    let key = query.sort.unwrap_or(RosterSortKey::Name);
    let sort = RosterSort {
        key,
        direction: query.direction.unwrap_or_else(|| key.default_direction()),
    };

    let entries = roster::fetch_my_retailers(
        state.store.as_ref(),
        principal.agent_id,
        state.settings.roster_concurrency,
    )
    .await?;

    let mut entries = roster::filter_retailers(entries, &filter);
    roster::sort_retailers(&mut entries, sort);
    debug!(count = entries.len(), "Roster filtered and sorted");

    Ok(Json(ok(entries, "Retailers retrieved successfully")))
}

/// Get a retailer owned by the agent, with its terminals
#[utoipa::path(
    get,
    path = "/api/v1/agents/{agent_id}/retailers/{retailer_id}",
    tag = "retailers",
    params(
        ("agent_id" = i32, Path, description = "Agent profile ID"),
        ("retailer_id" = i32, Path, description = "Retailer ID")
    ),
    responses(
        (status = 200, description = "Retailer retrieved successfully", body = ApiResponse<RetailerDetail>),
        (status = 404, description = "Retailer not found for this agent", body = ErrorResponse),
        (status = 503, description = "Data unavailable, retry", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[instrument(skip(state))]
pub async fn get_retailer(
    principal: AgentPrincipal,
    State(state): State<AppState>,
    Path(path): Path<(i32, i32)>,
) -> Result<Json<ApiResponse<RetailerDetail>>, ApiError> {
    let (_, retailer_id) = path;
    let detail =
        retailer::fetch_retailer_detail(state.store.as_ref(), principal.agent_id, retailer_id).await?;
    Ok(Json(ok(detail, "Retailer retrieved successfully")))
}

/// Today, month-to-date and all-time sales of a retailer
#[utoipa::path(
    get,
    path = "/api/v1/agents/{agent_id}/retailers/{retailer_id}/sales-summary",
    tag = "retailers",
    params(
        ("agent_id" = i32, Path, description = "Agent profile ID"),
        ("retailer_id" = i32, Path, description = "Retailer ID")
    ),
    responses(
        (status = 200, description = "Sales summary computed", body = ApiResponse<RetailerSalesSummary>),
        (status = 404, description = "Retailer not found for this agent", body = ErrorResponse),
        (status = 503, description = "Data unavailable, retry", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[instrument(skip(state))]
pub async fn get_retailer_sales_summary(
    principal: AgentPrincipal,
    State(state): State<AppState>,
    Path(path): Path<(i32, i32)>,
) -> Result<Json<ApiResponse<RetailerSalesSummary>>, ApiError> {
    let (_, retailer_id) = path;
    let summary = retailer::fetch_retailer_sales_summary(
        state.store.as_ref(),
        principal.agent_id,
        retailer_id,
        Utc::now(),
        state.settings.reporting_offset(),
    )
    .await?;
    Ok(Json(ok(summary, "Sales summary retrieved successfully")))
}

/// Block a retailer owned by the agent
#[utoipa::path(
    post,
    path = "/api/v1/agents/{agent_id}/retailers/{retailer_id}/block",
    tag = "retailers",
    params(
        ("agent_id" = i32, Path, description = "Agent profile ID"),
        ("retailer_id" = i32, Path, description = "Retailer ID")
    ),
    responses(
        (status = 200, description = "Retailer blocked", body = ApiResponse<BlockRetailerResponse>),
        (status = 404, description = "Retailer not found for this agent", body = ErrorResponse),
        (status = 503, description = "Data unavailable, retry", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[instrument(skip(state))]
pub async fn block_retailer(
    principal: AgentPrincipal,
    State(state): State<AppState>,
    Path(path): Path<(i32, i32)>,
) -> Result<Json<ApiResponse<BlockRetailerResponse>>, ApiError> {
    let (_, retailer_id) = path;
    roster::block_retailer(state.store.as_ref(), principal.agent_id, retailer_id).await?;
    info!(retailer_id, "Retailer blocked by agent");

    let response = BlockRetailerResponse {
        retailer_id,
        status: RetailerStatus::Blocked.to_string(),
    };
    Ok(Json(ok(response, "Retailer blocked successfully")))
}
