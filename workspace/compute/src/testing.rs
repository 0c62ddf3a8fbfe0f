//! Database fixtures and store doubles shared by the compute tests.

use std::sync::Once;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use migration::{Migrator, MigratorTrait};
use model::entities::{
    agent_transaction::{self, TransactionType},
    bank_account, profile::{self, ProfileRole},
    retailer::{self, RetailerStatus},
    sale, terminal::{self, TerminalStatus},
    voucher_type,
};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, DbErr, NotSet, Set,
};

use crate::error::StoreError;
use crate::store::{
    BankAccountInput, PortalStore, SaleLine, SeaOrmStore, StoreResult, TransactionFilter,
    TransactionLine,
};
use crate::window::TimeRange;

static TRACING: Once = Once::new();

/// Installs a stderr subscriber once per test binary. Level follows `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub async fn setup_db() -> Result<DatabaseConnection, DbErr> {
    init_tracing();

    let db = Database::connect("sqlite::memory:").await?;
    db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;
    Migrator::up(&db, None).await.expect("Migrations failed.");
    Ok(db)
}

/// Money helper, `cents(30000)` is 300.00.
pub fn cents(value: i64) -> Decimal {
    Decimal::new(value, 2)
}

pub fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

pub async fn insert_profile(
    db: &DatabaseConnection,
    full_name: &str,
    role: ProfileRole,
) -> Result<profile::Model, DbErr> {
    profile::ActiveModel {
        id: NotSet,
        full_name: Set(full_name.to_string()),
        email: Set(format!("{}@example.com", full_name.to_lowercase().replace(' ', "."))),
        role: Set(role),
    }
    .insert(db)
    .await
}

pub async fn insert_agent(db: &DatabaseConnection, full_name: &str) -> Result<profile::Model, DbErr> {
    insert_profile(db, full_name, ProfileRole::Agent).await
}

pub async fn insert_retailer(
    db: &DatabaseConnection,
    agent_id: i32,
    name: &str,
    location: Option<&str>,
    status: RetailerStatus,
) -> Result<retailer::Model, DbErr> {
    retailer::ActiveModel {
        id: NotSet,
        agent_profile_id: Set(Some(agent_id)),
        name: Set(name.to_string()),
        location: Set(location.map(str::to_string)),
        status: Set(status),
        balance: Set(cents(100000)),
        commission_balance: Set(cents(1500)),
        contact_person: Set(Some(format!("{} Owner", name))),
        contact_email: Set(None),
        contact_phone: Set(Some("0821234567".to_string())),
        created_at: Set(at("2024-01-01T08:00:00Z")),
    }
    .insert(db)
    .await
}

pub async fn insert_terminal(
    db: &DatabaseConnection,
    retailer_id: i32,
    name: &str,
) -> Result<terminal::Model, DbErr> {
    terminal::ActiveModel {
        id: NotSet,
        retailer_id: Set(retailer_id),
        name: Set(name.to_string()),
        status: Set(TerminalStatus::Active),
        last_active: Set(Some(at("2024-03-10T12:00:00Z"))),
    }
    .insert(db)
    .await
}

pub async fn insert_voucher_type(
    db: &DatabaseConnection,
    name: &str,
) -> Result<voucher_type::Model, DbErr> {
    voucher_type::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
    }
    .insert(db)
    .await
}

pub async fn insert_sale(
    db: &DatabaseConnection,
    terminal_id: i32,
    voucher_type_id: Option<i32>,
    sale_amount: Decimal,
    agent_commission: Decimal,
    created_at: DateTime<Utc>,
) -> Result<sale::Model, DbErr> {
    sale::ActiveModel {
        id: NotSet,
        terminal_id: Set(terminal_id),
        voucher_type_id: Set(voucher_type_id),
        sale_amount: Set(sale_amount),
        agent_commission: Set(agent_commission),
        created_at: Set(created_at),
    }
    .insert(db)
    .await
}

pub async fn insert_transaction(
    db: &DatabaseConnection,
    agent_id: i32,
    transaction_type: TransactionType,
    amount: Decimal,
    notes: Option<&str>,
    created_at: DateTime<Utc>,
) -> Result<agent_transaction::Model, DbErr> {
    agent_transaction::ActiveModel {
        id: NotSet,
        agent_profile_id: Set(agent_id),
        transaction_type: Set(transaction_type),
        amount: Set(amount),
        balance_after: Set(Decimal::ZERO),
        notes: Set(notes.map(str::to_string)),
        retailer_id: Set(None),
        created_at: Set(created_at),
    }
    .insert(db)
    .await
}

pub async fn insert_payout(
    db: &DatabaseConnection,
    agent_id: i32,
    amount: Decimal,
    notes: Option<&str>,
    created_at: DateTime<Utc>,
) -> Result<agent_transaction::Model, DbErr> {
    insert_transaction(db, agent_id, TransactionType::CommissionPayout, amount, notes, created_at).await
}

/// Store double that delegates to [`SeaOrmStore`] but injects faults.
pub struct FaultyStore {
    inner: SeaOrmStore,
    /// `retailer_sales` fails for this retailer.
    pub failing_retailer: Option<i32>,
    /// `count_agent_retailers` fails.
    pub fail_count: bool,
    /// `agent_sales` sleeps this long before answering.
    pub stall_sales: Option<Duration>,
    calls: AtomicUsize,
}

impl FaultyStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            inner: SeaOrmStore::new(db),
            failing_retailer: None,
            fail_count: false,
            stall_sales: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of store calls made so far, faulty or not.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn injected(what: &str) -> StoreError {
        StoreError::Database(DbErr::Custom(format!("injected failure: {}", what)))
    }
}

#[async_trait]
impl PortalStore for FaultyStore {
    async fn agent_retailers(&self, agent_id: i32) -> StoreResult<Vec<retailer::Model>> {
        self.record();
        self.inner.agent_retailers(agent_id).await
    }

    async fn count_agent_retailers(&self, agent_id: i32) -> StoreResult<u64> {
        self.record();
        if self.fail_count {
            return Err(Self::injected("count_agent_retailers"));
        }
        self.inner.count_agent_retailers(agent_id).await
    }

    async fn agent_retailer(
        &self,
        agent_id: i32,
        retailer_id: i32,
    ) -> StoreResult<Option<retailer::Model>> {
        self.record();
        self.inner.agent_retailer(agent_id, retailer_id).await
    }

    async fn retailer_terminals(&self, retailer_id: i32) -> StoreResult<Vec<terminal::Model>> {
        self.record();
        self.inner.retailer_terminals(retailer_id).await
    }

    async fn retailer_sales(
        &self,
        agent_id: i32,
        retailer_id: i32,
    ) -> StoreResult<Vec<sale::Model>> {
        self.record();
        if self.failing_retailer == Some(retailer_id) {
            return Err(Self::injected("retailer_sales"));
        }
        self.inner.retailer_sales(agent_id, retailer_id).await
    }

    async fn agent_sales(
        &self,
        agent_id: i32,
        range: Option<TimeRange>,
    ) -> StoreResult<Vec<SaleLine>> {
        self.record();
        if let Some(stall) = self.stall_sales {
            tokio::time::sleep(stall).await;
        }
        self.inner.agent_sales(agent_id, range).await
    }

    async fn agent_transactions(
        &self,
        agent_id: i32,
        filter: TransactionFilter,
    ) -> StoreResult<Vec<TransactionLine>> {
        self.record();
        self.inner.agent_transactions(agent_id, filter).await
    }

    async fn block_retailer(&self, agent_id: i32, retailer_id: i32) -> StoreResult<u64> {
        self.record();
        self.inner.block_retailer(agent_id, retailer_id).await
    }

    async fn primary_bank_account(
        &self,
        profile_id: i32,
    ) -> StoreResult<Option<bank_account::Model>> {
        self.record();
        self.inner.primary_bank_account(profile_id).await
    }

    async fn upsert_primary_bank_account(
        &self,
        profile_id: i32,
        input: BankAccountInput,
        now: DateTime<Utc>,
    ) -> StoreResult<bank_account::Model> {
        self.record();
        self.inner
            .upsert_primary_bank_account(profile_id, input, now)
            .await
    }
}
