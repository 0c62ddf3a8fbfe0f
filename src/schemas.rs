use std::sync::Arc;

use chrono::NaiveDate;
pub use common::ApiResponse;
use common::{
    AgentSummary, AgentTransactionDto, AggregationStatus, BankAccountDto, CommissionStatement,
    DashboardDto, LineStatus, RetailerDetail, RetailerSalesSummary, RetailerWithSales,
    RosterSortKey, SaveBankAccountRequest, SortDirection, StatementLine, StatementStats,
    TerminalDto,
};
use compute::store::PortalStore;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, OpenApi, ToSchema};
use validator::Validate;

use crate::auth::AccessGuard;
use crate::config::Settings;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection, used for health checks
    pub db: DatabaseConnection,
    /// Data store gateway every aggregation reads through
    pub store: Arc<dyn PortalStore>,
    /// Resolves bearer tokens to principals
    pub guard: Arc<dyn AccessGuard>,
    pub settings: Arc<Settings>,
}

/// Query parameters of the retailer roster
#[derive(Debug, Default, Deserialize, Serialize, ToSchema, IntoParams, Validate)]
pub struct RosterQuery {
    /// Case-insensitive substring of name or location
    pub search: Option<String>,
    /// `active`, `inactive`, `suspended`, `blocked` or `all`
    pub status: Option<String>,
    /// Sort column (default: name)
    pub sort: Option<RosterSortKey>,
    /// Sort direction (default depends on the column)
    pub direction: Option<SortDirection>,
}

/// Query parameters of the commission statement
#[derive(Debug, Deserialize, Serialize, ToSchema, IntoParams, Validate)]
pub struct StatementQuery {
    /// First day of the statement (YYYY-MM-DD)
    pub start_date: NaiveDate,
    /// Last day of the statement, included in full (YYYY-MM-DD)
    pub end_date: NaiveDate,
}

/// Query parameters of the transaction history
#[derive(Debug, Default, Deserialize, Serialize, ToSchema, IntoParams, Validate)]
pub struct TransactionsQuery {
    /// Rows to skip (default: 0)
    #[validate(range(min = 0))]
    pub offset: Option<i64>,
    /// Page size (default: 50)
    #[validate(range(min = 1, max = 200))]
    pub limit: Option<i64>,
}

/// Result of blocking a retailer
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BlockRetailerResponse {
    pub retailer_id: i32,
    pub status: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::retailers::get_retailers,
        crate::handlers::retailers::get_retailer,
        crate::handlers::retailers::get_retailer_sales_summary,
        crate::handlers::retailers::block_retailer,
        crate::handlers::summary::get_summary,
        crate::handlers::statement::get_commission_statement,
        crate::handlers::transactions::get_transactions,
        crate::handlers::bank_account::get_bank_account,
        crate::handlers::bank_account::save_bank_account,
        crate::handlers::dashboard::get_dashboard,
    ),
    components(
        schemas(
            ApiResponse<Vec<RetailerWithSales>>,
            ApiResponse<RetailerDetail>,
            ApiResponse<AgentSummary>,
            ApiResponse<CommissionStatement>,
            ErrorResponse,
            HealthResponse,
            RosterQuery,
            StatementQuery,
            TransactionsQuery,
            BlockRetailerResponse,
            RetailerWithSales,
            AggregationStatus,
            RosterSortKey,
            SortDirection,
            RetailerDetail,
            TerminalDto,
            RetailerSalesSummary,
            AgentSummary,
            CommissionStatement,
            StatementStats,
            StatementLine,
            LineStatus,
            AgentTransactionDto,
            BankAccountDto,
            SaveBankAccountRequest,
            DashboardDto,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "retailers", description = "Retailer roster and drill-down"),
        (name = "commission", description = "Commission summary and statement"),
        (name = "transactions", description = "Agent statement history"),
        (name = "bank-account", description = "Payout bank account"),
        (name = "dashboard", description = "Agent landing page"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Agent Portal API",
        description = "Agent-facing portal for voucher distribution: retailer roster, commission summaries, statements and payout details",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;

/// Registers the bearer token scheme used by the agent routes.
pub struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}
