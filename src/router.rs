use crate::handlers::{
    bank_account::{get_bank_account, save_bank_account},
    dashboard::get_dashboard,
    health::health_check,
    retailers::{block_retailer, get_retailer, get_retailer_sales_summary, get_retailers},
    statement::get_commission_statement,
    summary::get_summary,
    transactions::get_transactions,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Routes scoped to one agent. Every handler resolves the caller through `AgentPrincipal`.
fn agent_routes() -> Router<AppState> {
    Router::new()
        .route("/retailers", get(get_retailers))
        .route("/retailers/:retailer_id", get(get_retailer))
        .route("/retailers/:retailer_id/sales-summary", get(get_retailer_sales_summary))
        .route("/retailers/:retailer_id/block", post(block_retailer))
        .route("/summary", get(get_summary))
        .route("/commission-statement", get(get_commission_statement))
        .route("/transactions", get(get_transactions))
        .route("/bank-account", get(get_bank_account).put(save_bank_account))
        .route("/dashboard", get(get_dashboard))
}

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Agent routes
        .nest("/api/v1/agents/:agent_id", agent_routes())
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
