//! Dataset Cache
//!
//! Holds the last-completed customer/campaign snapshot for the current
//! session. `refresh` is the only entry point that touches the backing
//! repositories, so views re-render from the cache instead of re-fetching.
//! Snapshots are replaced wholesale; nothing is ever mutated in place.
//!
//! Overlapping refreshes resolve by generation: each refresh takes a
//! generation number when it starts, and a completed fetch only installs if
//! no later-started fetch has already landed. A stale result arriving after
//! a newer one is discarded, so readers always see the newest completed
//! dataset.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{info, warn};

use patron_core::domain::aggregates::{Campaign, Customer};
use patron_core::ports::outbound::{CampaignRepository, CustomerRepository, RepositoryError};

/// One immutable fetch result
#[derive(Clone, Debug)]
pub struct DatasetSnapshot {
    pub customers: Vec<Customer>,
    pub campaigns: Vec<Campaign>,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Default)]
struct CacheState {
    snapshot: Option<Arc<DatasetSnapshot>>,
    installed_generation: u64,
}

/// Session-scoped cache of the last-fetched dataset
#[derive(Default)]
pub struct DatasetCache {
    state: RwLock<CacheState>,
    next_generation: AtomicU64,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The newest completed snapshot, if any fetch has finished
    pub fn snapshot(&self) -> Option<Arc<DatasetSnapshot>> {
        self.state.read().snapshot.clone()
    }

    /// When the current snapshot was fetched
    pub fn last_fetched_at(&self) -> Option<DateTime<Utc>> {
        self.state.read().snapshot.as_ref().map(|s| s.fetched_at)
    }

    /// Fetch both datasets and install the result.
    ///
    /// Returns the snapshot readers will now observe: the fetched one, or
    /// the newer one that superseded it while this fetch was in flight.
    pub async fn refresh(
        &self,
        customers: &dyn CustomerRepository,
        campaigns: &dyn CampaignRepository,
    ) -> Result<Arc<DatasetSnapshot>, RepositoryError> {
        let generation = self.begin_refresh();

        let customer_list = customers.list().await?;
        let campaign_list = campaigns.list().await?;

        let snapshot = Arc::new(DatasetSnapshot {
            customers: customer_list,
            campaigns: campaign_list,
            fetched_at: Utc::now(),
        });

        if self.install(generation, snapshot.clone()) {
            info!(
                generation,
                customers = snapshot.customers.len(),
                campaigns = snapshot.campaigns.len(),
                "dataset refreshed"
            );
            Ok(snapshot)
        } else {
            warn!(generation, "discarded stale fetch superseded by a newer one");
            Ok(self.snapshot().unwrap_or(snapshot))
        }
    }

    fn begin_refresh(&self) -> u64 {
        self.next_generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn install(&self, generation: u64, snapshot: Arc<DatasetSnapshot>) -> bool {
        let mut state = self.state.write();
        if generation <= state.installed_generation {
            return false;
        }
        state.installed_generation = generation;
        state.snapshot = Some(snapshot);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use patron_core::domain::value_objects::{Email, Phone, Spending};
    use patron_core::infrastructure::persistence::{
        InMemoryCampaignRepository, InMemoryCustomerRepository,
    };

    fn snapshot_of(label: &str) -> Arc<DatasetSnapshot> {
        let customer = Customer::create(
            label,
            Email::new(&format!("{}@example.com", label)).unwrap(),
            Phone::new("555-123-4567").unwrap(),
            Spending::zero(),
            Utc::now(),
        );
        Arc::new(DatasetSnapshot {
            customers: vec![customer],
            campaigns: vec![],
            fetched_at: Utc::now(),
        })
    }

    struct FailingCustomers;

    #[async_trait]
    impl CustomerRepository for FailingCustomers {
        async fn list(&self) -> Result<Vec<Customer>, RepositoryError> {
            Err(RepositoryError::ConnectionError("boom".into()))
        }

        async fn save(&self, _customer: &Customer) -> Result<(), RepositoryError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_refresh_installs_snapshot() {
        let customers = InMemoryCustomerRepository::new();
        let campaigns = InMemoryCampaignRepository::new();
        let cache = DatasetCache::new();

        assert!(cache.snapshot().is_none());
        assert!(cache.last_fetched_at().is_none());

        let snapshot = cache.refresh(&customers, &campaigns).await.unwrap();
        assert!(snapshot.customers.is_empty());
        assert!(cache.snapshot().is_some());
        assert!(cache.last_fetched_at().is_some());
    }

    #[tokio::test]
    async fn test_failed_refresh_leaves_cache_untouched() {
        let campaigns = InMemoryCampaignRepository::new();
        let cache = DatasetCache::new();

        let result = cache.refresh(&FailingCustomers, &campaigns).await;
        assert!(result.is_err());
        assert!(cache.snapshot().is_none());
    }

    #[test]
    fn test_stale_fetch_is_discarded() {
        let cache = DatasetCache::new();

        // Two refreshes begin; the later-started one completes first
        let slow = cache.begin_refresh();
        let fast = cache.begin_refresh();

        assert!(cache.install(fast, snapshot_of("fast")));
        // The slow fetch finishes afterwards and must not clobber
        assert!(!cache.install(slow, snapshot_of("slow")));

        let current = cache.snapshot().unwrap();
        assert_eq!(current.customers[0].name(), "fast");
    }

    #[test]
    fn test_later_generation_replaces_earlier() {
        let cache = DatasetCache::new();

        let first = cache.begin_refresh();
        assert!(cache.install(first, snapshot_of("first")));

        let second = cache.begin_refresh();
        assert!(cache.install(second, snapshot_of("second")));

        let current = cache.snapshot().unwrap();
        assert_eq!(current.customers[0].name(), "second");
    }
}
