use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A row of the agent's statement history.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AgentTransactionDto {
    pub id: i32,
    pub transaction_type: String,
    pub amount: Decimal,
    pub balance_after: Decimal,
    pub notes: Option<String>,
    pub retailer_name: Option<String>,
    pub created_at: DateTime<Utc>,
}
