use async_trait::async_trait;
use chrono::{DateTime, Utc};
use model::entities::{
    agent_transaction, bank_account, retailer, retailer::RetailerStatus, sale, terminal,
    voucher_type,
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use tracing::{debug, instrument};

use super::{
    BankAccountInput, PortalStore, SaleLine, StoreResult, TransactionFilter, TransactionLine,
};

/// [`PortalStore`] backed by a SeaORM connection.
#[derive(Debug, Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PortalStore for SeaOrmStore {
    #[instrument(skip(self))]
    async fn agent_retailers(&self, agent_id: i32) -> StoreResult<Vec<retailer::Model>> {
        let retailers = retailer::Entity::find()
            .filter(retailer::Column::AgentProfileId.eq(agent_id))
            .order_by_asc(retailer::Column::Name)
            .all(&self.db)
            .await?;
        debug!(count = retailers.len(), "Loaded agent retailers");
        Ok(retailers)
    }

    #[instrument(skip(self))]
    async fn count_agent_retailers(&self, agent_id: i32) -> StoreResult<u64> {
        Ok(retailer::Entity::find()
            .filter(retailer::Column::AgentProfileId.eq(agent_id))
            .count(&self.db)
            .await?)
    }

    #[instrument(skip(self))]
    async fn agent_retailer(
        &self,
        agent_id: i32,
        retailer_id: i32,
    ) -> StoreResult<Option<retailer::Model>> {
        Ok(retailer::Entity::find_by_id(retailer_id)
            .filter(retailer::Column::AgentProfileId.eq(agent_id))
            .one(&self.db)
            .await?)
    }

    #[instrument(skip(self))]
    async fn retailer_terminals(&self, retailer_id: i32) -> StoreResult<Vec<terminal::Model>> {
        Ok(terminal::Entity::find()
            .filter(terminal::Column::RetailerId.eq(retailer_id))
            .order_by_asc(terminal::Column::Id)
            .all(&self.db)
            .await?)
    }

    #[instrument(skip(self))]
    async fn retailer_sales(
        &self,
        agent_id: i32,
        retailer_id: i32,
    ) -> StoreResult<Vec<sale::Model>> {
        Ok(sale::Entity::find()
            .join(JoinType::InnerJoin, sale::Relation::Terminal.def())
            .join(JoinType::InnerJoin, terminal::Relation::Retailer.def())
            .filter(retailer::Column::Id.eq(retailer_id))
            .filter(retailer::Column::AgentProfileId.eq(agent_id))
            .order_by_desc(sale::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    #[instrument(skip(self))]
    async fn agent_sales(
        &self,
        agent_id: i32,
        range: Option<crate::window::TimeRange>,
    ) -> StoreResult<Vec<SaleLine>> {
        let mut query = sale::Entity::find()
            .select_only()
            .column_as(sale::Column::Id, "id")
            .column_as(retailer::Column::Id, "retailer_id")
            .column_as(retailer::Column::Name, "retailer_name")
            .column_as(voucher_type::Column::Name, "voucher_type")
            .column_as(sale::Column::SaleAmount, "sale_amount")
            .column_as(sale::Column::AgentCommission, "agent_commission")
            .column_as(sale::Column::CreatedAt, "created_at")
            .join(JoinType::InnerJoin, sale::Relation::Terminal.def())
            .join(JoinType::InnerJoin, terminal::Relation::Retailer.def())
            .join(JoinType::LeftJoin, sale::Relation::VoucherType.def())
            .filter(retailer::Column::AgentProfileId.eq(agent_id));

        if let Some(range) = range {
            query = query
                .filter(sale::Column::CreatedAt.gte(range.start))
                .filter(sale::Column::CreatedAt.lt(range.end));
        }

        let lines = query
            .order_by_desc(sale::Column::CreatedAt)
            .order_by_desc(sale::Column::Id)
            .into_model::<SaleLine>()
            .all(&self.db)
            .await?;
        debug!(count = lines.len(), "Loaded agent sales");
        Ok(lines)
    }

    #[instrument(skip(self))]
    async fn agent_transactions(
        &self,
        agent_id: i32,
        filter: TransactionFilter,
    ) -> StoreResult<Vec<TransactionLine>> {
        let mut query = agent_transaction::Entity::find()
            .filter(agent_transaction::Column::AgentProfileId.eq(agent_id));

        if let Some(transaction_type) = filter.transaction_type {
            query = query.filter(agent_transaction::Column::TransactionType.eq(transaction_type));
        }
        if let Some(range) = filter.range {
            query = query
                .filter(agent_transaction::Column::CreatedAt.gte(range.start))
                .filter(agent_transaction::Column::CreatedAt.lt(range.end));
        }

        let mut select = query
            .find_also_related(retailer::Entity)
            .order_by_desc(agent_transaction::Column::CreatedAt)
            .order_by_desc(agent_transaction::Column::Id);

        // SQLite only accepts OFFSET after a LIMIT clause.
        if let Some(limit) = filter.limit {
            select = select.limit(limit).offset(filter.offset);
        }

        let rows = select.all(&self.db).await?;

        Ok(rows
            .into_iter()
            .map(|(transaction, retailer)| TransactionLine {
                transaction,
                retailer_name: retailer.map(|r| r.name),
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn block_retailer(&self, agent_id: i32, retailer_id: i32) -> StoreResult<u64> {
        let result = retailer::Entity::update_many()
            .col_expr(retailer::Column::Status, Expr::value(RetailerStatus::Blocked))
            .filter(retailer::Column::Id.eq(retailer_id))
            .filter(retailer::Column::AgentProfileId.eq(agent_id))
            .exec(&self.db)
            .await?;
        debug!(rows = result.rows_affected, "Block retailer update applied");
        Ok(result.rows_affected)
    }

    #[instrument(skip(self))]
    async fn primary_bank_account(
        &self,
        profile_id: i32,
    ) -> StoreResult<Option<bank_account::Model>> {
        Ok(bank_account::Entity::find()
            .filter(bank_account::Column::ProfileId.eq(profile_id))
            .filter(bank_account::Column::IsPrimary.eq(true))
            .one(&self.db)
            .await?)
    }

    #[instrument(skip(self, input))]
    async fn upsert_primary_bank_account(
        &self,
        profile_id: i32,
        input: BankAccountInput,
        now: DateTime<Utc>,
    ) -> StoreResult<bank_account::Model> {
        let txn = self.db.begin().await?;

        let existing = bank_account::Entity::find()
            .filter(bank_account::Column::ProfileId.eq(profile_id))
            .filter(bank_account::Column::IsPrimary.eq(true))
            .one(&txn)
            .await?;

        let saved = match existing {
            Some(account) => {
                let mut active: bank_account::ActiveModel = account.into();
                active.bank_name = Set(input.bank_name);
                active.account_holder = Set(input.account_holder);
                active.account_number = Set(input.account_number);
                active.branch_code = Set(input.branch_code);
                active.account_type = Set(input.account_type);
                active.updated_at = Set(now);
                active.update(&txn).await?
            }
            None => {
                bank_account::ActiveModel {
                    id: NotSet,
                    profile_id: Set(profile_id),
                    bank_name: Set(input.bank_name),
                    account_holder: Set(input.account_holder),
                    account_number: Set(input.account_number),
                    branch_code: Set(input.branch_code),
                    account_type: Set(input.account_type),
                    is_primary: Set(true),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(&txn)
                .await?
            }
        };

        txn.commit().await?;
        debug!(account_id = saved.id, "Primary bank account saved");
        Ok(saved)
    }
}
