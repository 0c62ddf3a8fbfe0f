use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use chrono::{FixedOffset, Offset, Utc};
use config::{Config, Environment, File};
use sea_orm::Database;
use serde::Deserialize;
use tracing::{debug, info};

use crate::auth::default_guard;
use crate::schemas::AppState;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://agent-portal.db";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// Runtime settings.
///
/// Sources in increasing priority: built-in defaults, an optional `agent-portal.{toml,yaml,json}`
/// file in the working directory, and `PORTAL_*` environment variables.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    pub database_url: String,
    pub bind_address: String,
    /// Upper bound for a single data store call
    pub query_timeout_ms: u64,
    /// Maximum in-flight per-retailer sales lookups while building the roster
    pub roster_concurrency: usize,
    /// Offset of the reporting timezone used for day and month boundaries
    pub reporting_utc_offset_minutes: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            query_timeout_ms: 5000,
            roster_concurrency: 8,
            reporting_utc_offset_minutes: 0,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Settings::default();
        let settings: Settings = Config::builder()
            .set_default("database_url", defaults.database_url)?
            .set_default("bind_address", defaults.bind_address)?
            .set_default("query_timeout_ms", defaults.query_timeout_ms)?
            .set_default("roster_concurrency", defaults.roster_concurrency as u64)?
            .set_default("reporting_utc_offset_minutes", i64::from(defaults.reporting_utc_offset_minutes))?
            .add_source(File::with_name("agent-portal").required(false))
            .add_source(Environment::with_prefix("PORTAL").try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        debug!(?settings, "Settings loaded");
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.query_timeout_ms == 0 {
            bail!("query_timeout_ms must be positive");
        }
        if self.roster_concurrency == 0 {
            bail!("roster_concurrency must be positive");
        }
        if FixedOffset::east_opt(self.reporting_utc_offset_minutes.saturating_mul(60)).is_none() {
            bail!(
                "reporting_utc_offset_minutes {} is outside -1439..=1439",
                self.reporting_utc_offset_minutes
            );
        }
        Ok(())
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    /// Falls back to UTC for an out-of-range offset; `validate` rejects those at startup.
    pub fn reporting_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.reporting_utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(|| Utc.fix())
    }
}

/// Connects to the database and wires the store and access guard.
pub async fn initialize_app_state(settings: Settings) -> Result<AppState> {
    info!("Connecting to database: {}", settings.database_url);
    let db = Database::connect(&settings.database_url).await?;

    let store = compute::default_store(db.clone(), settings.query_timeout());
    let guard = default_guard(db.clone(), settings.query_timeout());

    Ok(AppState {
        db,
        store,
        guard,
        settings: Arc::new(settings),
    })
}
