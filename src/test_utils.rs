use std::sync::Arc;
use std::time::Duration;

use axum::http::{header::AUTHORIZATION, HeaderName, HeaderValue};
use axum::Router;
use chrono::{DateTime, TimeDelta, Utc};
use migration::{Migrator, MigratorTrait};
use model::entities::{
    agent_transaction::{self, TransactionType},
    profile::{self, ProfileRole},
    retailer::{self, RetailerStatus},
    sale, session,
    terminal::{self, TerminalStatus},
};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, NotSet, Set};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::auth::default_guard;
use crate::config::Settings;
use crate::router::create_router;
use crate::schemas::AppState;

/// Create an in-memory SQLite database for testing
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub fn setup_test_app_state(db: DatabaseConnection) -> AppState {
    let settings = Settings {
        database_url: "sqlite::memory:".to_string(),
        ..Settings::default()
    };
    AppState {
        store: compute::default_store(db.clone(), Duration::from_secs(5)),
        guard: default_guard(db.clone(), Duration::from_secs(5)),
        settings: Arc::new(settings),
        db,
    }
}

/// Initialize tracing for tests with output to STDERR.
///
/// The log level is taken from RUST_LOG, defaulting to WARN.
fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| level.parse::<Level>().ok())
        .unwrap_or(Level::WARN);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_default(subscriber)
}

/// Seeded database plus the router serving it.
pub struct TestApp {
    pub db: DatabaseConnection,
    pub router: Router,
    _tracing: tracing::subscriber::DefaultGuard,
}

pub async fn setup_test_app() -> TestApp {
    let tracing = init_test_tracing();
    let db = setup_test_db().await;
    let router = create_router(setup_test_app_state(db.clone()));
    TestApp {
        db,
        router,
        _tracing: tracing,
    }
}

pub fn cents(value: i64) -> Decimal {
    Decimal::new(value, 2)
}

pub fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

/// A profile with a live session. Returns the profile id and its bearer token.
pub async fn create_profile_with_session(
    db: &DatabaseConnection,
    full_name: &str,
    role: ProfileRole,
) -> (i32, String) {
    let profile = profile::ActiveModel {
        id: NotSet,
        full_name: Set(full_name.to_string()),
        email: Set(format!("{}@example.com", full_name.to_lowercase().replace(' ', "."))),
        role: Set(role),
    }
    .insert(db)
    .await
    .expect("Failed to create profile");

    let token = format!("token-{}", profile.id);
    session::ActiveModel {
        id: NotSet,
        token: Set(token.clone()),
        profile_id: Set(profile.id),
        expires_at: Set(Utc::now() + TimeDelta::hours(1)),
    }
    .insert(db)
    .await
    .expect("Failed to create session");

    (profile.id, token)
}

pub async fn create_expired_session(db: &DatabaseConnection, profile_id: i32) -> String {
    let token = format!("expired-{}", profile_id);
    session::ActiveModel {
        id: NotSet,
        token: Set(token.clone()),
        profile_id: Set(profile_id),
        expires_at: Set(Utc::now() - TimeDelta::hours(1)),
    }
    .insert(db)
    .await
    .expect("Failed to create session");
    token
}

pub async fn create_retailer(db: &DatabaseConnection, agent_id: i32, name: &str, location: Option<&str>) -> retailer::Model {
    retailer::ActiveModel {
        id: NotSet,
        agent_profile_id: Set(Some(agent_id)),
        name: Set(name.to_string()),
        location: Set(location.map(str::to_string)),
        status: Set(RetailerStatus::Active),
        balance: Set(cents(50000)),
        commission_balance: Set(Decimal::ZERO),
        contact_person: Set(None),
        contact_email: Set(None),
        contact_phone: Set(None),
        created_at: Set(at("2024-01-01T08:00:00Z")),
    }
    .insert(db)
    .await
    .expect("Failed to create retailer")
}

pub async fn create_terminal(db: &DatabaseConnection, retailer_id: i32) -> terminal::Model {
    terminal::ActiveModel {
        id: NotSet,
        retailer_id: Set(retailer_id),
        name: Set(format!("Till {}", retailer_id)),
        status: Set(TerminalStatus::Active),
        last_active: Set(None),
    }
    .insert(db)
    .await
    .expect("Failed to create terminal")
}

pub async fn create_sale(
    db: &DatabaseConnection,
    terminal_id: i32,
    sale_amount: Decimal,
    agent_commission: Decimal,
    created_at: DateTime<Utc>,
) -> sale::Model {
    sale::ActiveModel {
        id: NotSet,
        terminal_id: Set(terminal_id),
        voucher_type_id: Set(None),
        sale_amount: Set(sale_amount),
        agent_commission: Set(agent_commission),
        created_at: Set(created_at),
    }
    .insert(db)
    .await
    .expect("Failed to create sale")
}

pub async fn create_payout(
    db: &DatabaseConnection,
    agent_id: i32,
    amount: Decimal,
    created_at: DateTime<Utc>,
) -> agent_transaction::Model {
    agent_transaction::ActiveModel {
        id: NotSet,
        agent_profile_id: Set(agent_id),
        transaction_type: Set(TransactionType::CommissionPayout),
        amount: Set(amount),
        balance_after: Set(Decimal::ZERO),
        notes: Set(Some("Monthly payout".to_string())),
        retailer_id: Set(None),
        created_at: Set(created_at),
    }
    .insert(db)
    .await
    .expect("Failed to create payout")
}

/// `Authorization: Bearer <token>` header pair.
pub fn bearer(token: &str) -> (HeaderName, HeaderValue) {
    let value = HeaderValue::from_str(&format!("Bearer {}", token)).expect("valid header value");
    (AUTHORIZATION, value)
}
