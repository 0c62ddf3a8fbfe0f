use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::config::{initialize_app_state, Settings};
use crate::router::create_router;

pub async fn serve(settings: Settings) -> Result<()> {
    info!("Agent portal starting up");
    debug!(?settings, "Effective settings");

    let bind_address = settings.bind_address.clone();
    let state = initialize_app_state(settings)
        .await
        .context("Failed to initialize application state")?;
    let app = create_router(state);

    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind to address {}", bind_address))?;

    info!("Agent portal API running on http://{}", bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    axum::serve(listener, app).await.context("Server error")?;

    info!("Server shutdown gracefully");
    Ok(())
}
