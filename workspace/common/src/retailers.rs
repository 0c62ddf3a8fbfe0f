use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Whether the per-retailer sales figures of a roster entry could be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AggregationStatus {
    Complete,
    /// The sales lookup failed; the aggregates on the entry are zeroed placeholders.
    Unavailable,
}

/// One roster entry: the retailer plus its all-time sales aggregates.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RetailerWithSales {
    pub id: i32,
    pub name: String,
    pub location: Option<String>,
    pub status: String,
    pub balance: Decimal,
    pub commission_balance: Decimal,
    /// Number of sales across all terminals, all time.
    pub sales_count: u64,
    /// Sum of `sale_amount`, all time.
    pub total_sales: Decimal,
    /// Sum of `agent_commission`, all time.
    pub commission_earned: Decimal,
    pub aggregation: AggregationStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TerminalDto {
    pub id: i32,
    pub name: String,
    pub status: String,
    pub last_active: Option<DateTime<Utc>>,
}

/// Retailer profile with its terminal list.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RetailerDetail {
    pub id: i32,
    pub name: String,
    pub location: Option<String>,
    pub status: String,
    pub balance: Decimal,
    pub commission_balance: Decimal,
    pub contact_person: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub terminals: Vec<TerminalDto>,
}

/// Sales rollups of a single retailer over three nested windows.
///
/// All windows come from one sale set, so `today_* <= mtd_* <= total_*` holds for any
/// snapshot with non-negative sale amounts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RetailerSalesSummary {
    pub today_count: u64,
    pub today_value: Decimal,
    pub mtd_count: u64,
    pub mtd_value: Decimal,
    pub total_count: u64,
    pub total_value: Decimal,
    pub total_commission: Decimal,
}

/// Column the roster can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RosterSortKey {
    Name,
    TotalSales,
    Commission,
    Status,
}

impl RosterSortKey {
    /// Direction used the first time a key is selected.
    pub fn default_direction(&self) -> SortDirection {
        match self {
            RosterSortKey::Name | RosterSortKey::Status => SortDirection::Asc,
            RosterSortKey::TotalSales | RosterSortKey::Commission => SortDirection::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}
