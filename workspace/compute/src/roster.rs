//! Retailer roster of an agent: per-retailer all-time sales aggregates, the blocked
//! status transition, and the pure filter/sort functions the UI applies to the list.

use common::{AggregationStatus, RetailerWithSales, RosterSortKey, SortDirection};
use futures::stream::{self, StreamExt};
use model::entities::{retailer, retailer::RetailerStatus, sale};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

use crate::error::{ensure_id, PortalError, Result, StoreResultExt};
use crate::store::PortalStore;

/// Lists the agent's retailers with all-time sales aggregates.
///
/// Per-retailer sales lookups run with at most `concurrency` in flight and keep the roster
/// order. A failed lookup does not fail the roster; the entry comes back zeroed and marked
/// [`AggregationStatus::Unavailable`].
#[instrument(skip(store))]
pub async fn fetch_my_retailers(
    store: &dyn PortalStore,
    agent_id: i32,
    concurrency: usize,
) -> Result<Vec<RetailerWithSales>> {
    ensure_id("agent", agent_id)?;

    let retailers = store
        .agent_retailers(agent_id)
        .await
        .or_unavailable(|| format!("retailers of agent {}", agent_id))?;

    let entries: Vec<RetailerWithSales> = stream::iter(retailers)
        .map(move |retailer| async move {
            match store.retailer_sales(agent_id, retailer.id).await {
                Ok(sales) => aggregate_sales(&retailer, &sales),
                Err(err) => {
                    warn!(retailer_id = retailer.id, error = %err, "Sales lookup failed, using zeroed aggregates");
                    unavailable_entry(&retailer)
                }
            }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    debug!(count = entries.len(), "Roster aggregated");
    Ok(entries)
}

/// Reduces the sales of one retailer to count and sums.
pub fn aggregate_sales(retailer: &retailer::Model, sales: &[sale::Model]) -> RetailerWithSales {
    let (total_sales, commission_earned) = sales.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(value, commission), sale| (value + sale.sale_amount, commission + sale.agent_commission),
    );

    RetailerWithSales {
        sales_count: sales.len() as u64,
        total_sales,
        commission_earned,
        aggregation: AggregationStatus::Complete,
        ..base_entry(retailer)
    }
}

fn unavailable_entry(retailer: &retailer::Model) -> RetailerWithSales {
    RetailerWithSales {
        aggregation: AggregationStatus::Unavailable,
        ..base_entry(retailer)
    }
}

fn base_entry(retailer: &retailer::Model) -> RetailerWithSales {
    RetailerWithSales {
        id: retailer.id,
        name: retailer.name.clone(),
        location: retailer.location.clone(),
        status: retailer.status.to_string(),
        balance: retailer.balance,
        commission_balance: retailer.commission_balance,
        sales_count: 0,
        total_sales: Decimal::ZERO,
        commission_earned: Decimal::ZERO,
        aggregation: AggregationStatus::Complete,
    }
}

/// Moves an owned retailer to `blocked`.
///
/// Ownership is part of the update predicate. Zero matched rows is reported as not found,
/// whether the retailer is missing or belongs to someone else.
#[instrument(skip(store))]
pub async fn block_retailer(store: &dyn PortalStore, agent_id: i32, retailer_id: i32) -> Result<()> {
    ensure_id("agent", agent_id)?;
    ensure_id("retailer", retailer_id)?;

    let rows = store
        .block_retailer(agent_id, retailer_id)
        .await
        .or_unavailable(|| format!("retailer {}", retailer_id))?;

    if rows == 0 {
        warn!("Block rejected, retailer not owned by agent or missing");
        return Err(PortalError::not_found(format!("retailer {}", retailer_id)));
    }

    info!("Retailer blocked");
    Ok(())
}

/// Client-side roster filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterFilter {
    /// Case-insensitive substring of name or location.
    pub search: Option<String>,
    /// `None` matches every status.
    pub status: Option<RetailerStatus>,
}

/// Parses the status filter. Missing, empty and `all` mean no filter.
pub fn parse_status_filter(value: Option<&str>) -> Result<Option<RetailerStatus>> {
    match value.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(status) => status
            .parse::<RetailerStatus>()
            .map(Some)
            .map_err(PortalError::validation),
    }
}

pub fn filter_retailers(entries: Vec<RetailerWithSales>, filter: &RosterFilter) -> Vec<RetailerWithSales> {
    let needle = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    entries
        .into_iter()
        .filter(|entry| match filter.status {
            Some(status) => entry.status == status.as_str(),
            None => true,
        })
        .filter(|entry| match &needle {
            Some(needle) => {
                entry.name.to_lowercase().contains(needle)
                    || entry
                        .location
                        .as_deref()
                        .is_some_and(|location| location.to_lowercase().contains(needle))
            }
            None => true,
        })
        .collect()
}

/// Current sort column and direction of the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterSort {
    pub key: RosterSortKey,
    pub direction: SortDirection,
}

impl Default for RosterSort {
    fn default() -> Self {
        Self::new(RosterSortKey::Name)
    }
}

impl RosterSort {
    pub fn new(key: RosterSortKey) -> Self {
        Self {
            key,
            direction: key.default_direction(),
        }
    }

    /// Selecting the current key again flips the direction; a new key starts from its default.
    pub fn select(self, key: RosterSortKey) -> Self {
        if key == self.key {
            Self {
                key,
                direction: self.direction.flipped(),
            }
        } else {
            Self::new(key)
        }
    }
}

pub fn sort_retailers(entries: &mut [RetailerWithSales], sort: RosterSort) {
    entries.sort_by(|a, b| {
        let ordering = match sort.key {
            RosterSortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            RosterSortKey::TotalSales => a.total_sales.cmp(&b.total_sales),
            RosterSortKey::Commission => a.commission_earned.cmp(&b.commission_earned),
            RosterSortKey::Status => a.status.cmp(&b.status),
        };
        let ordering = match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };
        ordering.then_with(|| a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SeaOrmStore;
    use crate::testing::*;
    use model::entities::retailer::RetailerStatus;
    use sea_orm::EntityTrait;

    fn entry(id: i32, name: &str, location: Option<&str>, status: &str, total: i64, commission: i64) -> RetailerWithSales {
        RetailerWithSales {
            id,
            name: name.to_string(),
            location: location.map(str::to_string),
            status: status.to_string(),
            balance: Decimal::ZERO,
            commission_balance: Decimal::ZERO,
            sales_count: 1,
            total_sales: cents(total),
            commission_earned: cents(commission),
            aggregation: AggregationStatus::Complete,
        }
    }

    fn sample() -> Vec<RetailerWithSales> {
        vec![
            entry(1, "corner spar", Some("Soweto"), "active", 30000, 3000),
            entry(2, "Bobs Tuck Shop", Some("Khayelitsha"), "blocked", 90000, 4500),
            entry(3, "Alpha Mart", None, "inactive", 1000, 9000),
        ]
    }

    fn ids(entries: &[RetailerWithSales]) -> Vec<i32> {
        entries.iter().map(|e| e.id).collect()
    }

    #[tokio::test]
    async fn test_roster_scenario() {
        let db = setup_db().await.unwrap();
        let agent = insert_agent(&db, "Agent A").await.unwrap();
        let r1 = insert_retailer(&db, agent.id, "R1", Some("Durban"), RetailerStatus::Active).await.unwrap();
        let r2 = insert_retailer(&db, agent.id, "R2", None, RetailerStatus::Active).await.unwrap();
        let terminal = insert_terminal(&db, r1.id, "T1").await.unwrap();
        for day in ["2024-03-02T10:00:00Z", "2024-03-05T10:00:00Z", "2024-03-09T10:00:00Z"] {
            insert_sale(&db, terminal.id, None, cents(10000), cents(1000), at(day)).await.unwrap();
        }

        let store = SeaOrmStore::new(db);
        let roster = fetch_my_retailers(&store, agent.id, 4).await.unwrap();

        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].id, r1.id);
        assert_eq!(roster[0].sales_count, 3);
        assert_eq!(roster[0].total_sales, cents(30000));
        assert_eq!(roster[0].commission_earned, cents(3000));
        assert_eq!(roster[1].id, r2.id);
        assert_eq!(roster[1].sales_count, 0);
        assert_eq!(roster[1].total_sales, Decimal::ZERO);
        assert_eq!(roster[1].commission_earned, Decimal::ZERO);
        assert!(roster.iter().all(|e| e.aggregation == AggregationStatus::Complete));
    }

    #[tokio::test]
    async fn test_roster_isolates_failing_retailer() {
        let db = setup_db().await.unwrap();
        let agent = insert_agent(&db, "Agent A").await.unwrap();
        let mut failing = 0;
        for name in ["Alpha", "Bravo", "Charlie"] {
            let retailer = insert_retailer(&db, agent.id, name, None, RetailerStatus::Active).await.unwrap();
            let terminal = insert_terminal(&db, retailer.id, "T").await.unwrap();
            insert_sale(&db, terminal.id, None, cents(5000), cents(500), at("2024-03-02T10:00:00Z")).await.unwrap();
            if name == "Bravo" {
                failing = retailer.id;
            }
        }

        let mut store = FaultyStore::new(db);
        store.failing_retailer = Some(failing);
        let roster = fetch_my_retailers(&store, agent.id, 2).await.unwrap();

        assert_eq!(roster.len(), 3);
        assert_eq!(roster[1].id, failing);
        assert_eq!(roster[1].sales_count, 0);
        assert_eq!(roster[1].commission_earned, Decimal::ZERO);
        assert_eq!(roster[1].aggregation, AggregationStatus::Unavailable);
        for ok in [&roster[0], &roster[2]] {
            assert_eq!(ok.sales_count, 1);
            assert_eq!(ok.total_sales, cents(5000));
            assert_eq!(ok.commission_earned, cents(500));
            assert_eq!(ok.aggregation, AggregationStatus::Complete);
        }
    }

    #[tokio::test]
    async fn test_roster_excludes_other_agents() {
        let db = setup_db().await.unwrap();
        let agent = insert_agent(&db, "Agent A").await.unwrap();
        let other = insert_agent(&db, "Agent B").await.unwrap();
        insert_retailer(&db, other.id, "Not Mine", None, RetailerStatus::Active).await.unwrap();

        let store = SeaOrmStore::new(db);
        let roster = fetch_my_retailers(&store, agent.id, 8).await.unwrap();
        assert!(roster.is_empty());
    }

    #[tokio::test]
    async fn test_roster_rejects_invalid_agent() {
        let db = setup_db().await.unwrap();
        let store = SeaOrmStore::new(db);
        let result = fetch_my_retailers(&store, 0, 8).await;
        assert!(matches!(result, Err(PortalError::Validation(_))));
    }

    #[tokio::test]
    async fn test_block_retailer_requires_ownership() {
        let db = setup_db().await.unwrap();
        let agent = insert_agent(&db, "Agent A").await.unwrap();
        let other = insert_agent(&db, "Agent B").await.unwrap();
        let mine = insert_retailer(&db, agent.id, "Mine", None, RetailerStatus::Active).await.unwrap();
        let theirs = insert_retailer(&db, other.id, "Theirs", None, RetailerStatus::Active).await.unwrap();

        let store = SeaOrmStore::new(db.clone());
        block_retailer(&store, agent.id, mine.id).await.unwrap();

        let result = block_retailer(&store, agent.id, theirs.id).await;
        assert!(matches!(result, Err(PortalError::NotFoundOrUnauthorized { .. })));
        let missing = block_retailer(&store, agent.id, 9999).await;
        assert!(matches!(missing, Err(PortalError::NotFoundOrUnauthorized { .. })));

        let mine = retailer::Entity::find_by_id(mine.id).one(&db).await.unwrap().unwrap();
        let theirs = retailer::Entity::find_by_id(theirs.id).one(&db).await.unwrap().unwrap();
        assert_eq!(mine.status, RetailerStatus::Blocked);
        assert_eq!(theirs.status, RetailerStatus::Active);
    }

    #[test]
    fn test_filter_by_search_matches_name_or_location() {
        let filter = RosterFilter {
            search: Some("SOWETO".to_string()),
            status: None,
        };
        assert_eq!(ids(&filter_retailers(sample(), &filter)), vec![1]);

        let filter = RosterFilter {
            search: Some("mart".to_string()),
            status: None,
        };
        assert_eq!(ids(&filter_retailers(sample(), &filter)), vec![3]);

        assert_eq!(ids(&filter_retailers(sample(), &RosterFilter::default())), vec![1, 2, 3]);
    }

    #[test]
    fn test_filter_by_status() {
        let status = parse_status_filter(Some("blocked")).unwrap();
        let filter = RosterFilter { search: None, status };
        assert_eq!(ids(&filter_retailers(sample(), &filter)), vec![2]);

        assert_eq!(parse_status_filter(Some("all")).unwrap(), None);
        assert_eq!(parse_status_filter(None).unwrap(), None);
        assert!(matches!(parse_status_filter(Some("deleted")), Err(PortalError::Validation(_))));
    }

    #[test]
    fn test_sort_keys_and_defaults() {
        let mut entries = sample();
        sort_retailers(&mut entries, RosterSort::new(RosterSortKey::Name));
        assert_eq!(ids(&entries), vec![3, 2, 1]);

        sort_retailers(&mut entries, RosterSort::new(RosterSortKey::TotalSales));
        assert_eq!(ids(&entries), vec![2, 1, 3]);

        sort_retailers(&mut entries, RosterSort::new(RosterSortKey::Commission));
        assert_eq!(ids(&entries), vec![3, 2, 1]);

        sort_retailers(&mut entries, RosterSort::new(RosterSortKey::Status));
        assert_eq!(ids(&entries), vec![1, 2, 3]);
    }

    #[test]
    fn test_reselecting_key_toggles_direction() {
        let sort = RosterSort::default();
        assert_eq!(sort.direction, SortDirection::Asc);

        let toggled = sort.select(RosterSortKey::Name);
        assert_eq!(toggled.direction, SortDirection::Desc);
        let mut entries = sample();
        sort_retailers(&mut entries, toggled);
        assert_eq!(ids(&entries), vec![1, 2, 3]);

        let switched = toggled.select(RosterSortKey::TotalSales);
        assert_eq!(switched, RosterSort::new(RosterSortKey::TotalSales));
        assert_eq!(switched.select(RosterSortKey::TotalSales).direction, SortDirection::Asc);
    }
}
