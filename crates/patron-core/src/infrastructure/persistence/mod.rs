//! In-memory repository implementations for testing
//!
//! Vec-backed stores so list order matches insertion order, the way the
//! remote API returns records in a stable order.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::aggregates::{Campaign, CommunicationLog, Customer, MessageDraft};
use crate::domain::value_objects::EntityId;
use crate::domain::DomainEvent;
use crate::ports::outbound::{
    CampaignRepository, CommunicationLogRepository, CustomerRepository, EventPublisher,
    RepositoryError,
};

/// In-memory customer repository (for testing)
#[derive(Default)]
pub struct InMemoryCustomerRepository {
    customers: RwLock<Vec<Customer>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn list(&self) -> Result<Vec<Customer>, RepositoryError> {
        let customers = self.customers.read().unwrap();
        Ok(customers.clone())
    }

    async fn save(&self, customer: &Customer) -> Result<(), RepositoryError> {
        let mut customers = self.customers.write().unwrap();
        match customers.iter_mut().find(|c| c.id() == customer.id()) {
            Some(existing) => *existing = customer.clone(),
            None => customers.push(customer.clone()),
        }
        Ok(())
    }
}

/// In-memory campaign repository (for testing)
#[derive(Default)]
pub struct InMemoryCampaignRepository {
    campaigns: RwLock<Vec<Campaign>>,
}

impl InMemoryCampaignRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CampaignRepository for InMemoryCampaignRepository {
    async fn list(&self) -> Result<Vec<Campaign>, RepositoryError> {
        let campaigns = self.campaigns.read().unwrap();
        Ok(campaigns.clone())
    }

    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Campaign>, RepositoryError> {
        let campaigns = self.campaigns.read().unwrap();
        Ok(campaigns.iter().find(|c| c.id() == id).cloned())
    }

    async fn save(&self, campaign: &Campaign) -> Result<(), RepositoryError> {
        let mut campaigns = self.campaigns.write().unwrap();
        match campaigns.iter_mut().find(|c| c.id() == campaign.id()) {
            Some(existing) => *existing = campaign.clone(),
            None => campaigns.push(campaign.clone()),
        }
        Ok(())
    }
}

/// In-memory communication log (for testing)
#[derive(Default)]
pub struct InMemoryCommunicationLogRepository {
    logs: RwLock<Vec<CommunicationLog>>,
}

impl InMemoryCommunicationLogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommunicationLogRepository for InMemoryCommunicationLogRepository {
    async fn list(&self) -> Result<Vec<CommunicationLog>, RepositoryError> {
        let logs = self.logs.read().unwrap();
        Ok(logs.clone())
    }

    async fn record(&self, draft: MessageDraft) -> Result<(), RepositoryError> {
        // Stamp the fields the real backing store would assign
        let log = CommunicationLog {
            id: EntityId::new(),
            campaign_id: draft.campaign_id,
            campaign_name: draft.campaign_name,
            message: draft.message,
            recipients: draft.recipients,
            created_at: Utc::now(),
        };

        let mut logs = self.logs.write().unwrap();
        logs.push(log);
        Ok(())
    }
}

/// No-op event publisher for testing
#[derive(Default)]
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _events: Vec<DomainEvent>) -> Result<(), RepositoryError> {
        Ok(())
    }
}
