//! Customer Aggregate
//!
//! Rich aggregate root for customer records with encapsulated business logic.
//! Customers are owned by the remote API; instances are either created
//! locally (raising a Created event for the outbound sync) or restored from
//! already-validated API payloads.

use chrono::{DateTime, Utc};

use crate::domain::events::{CustomerEvent, DomainEvent};
use crate::domain::value_objects::{Email, EntityId, Phone, Spending};

/// Reference to the campaign a customer is assigned to.
///
/// Carries the denormalized fields the audience filters need (name and
/// audience size) so filtering never reaches back to the campaign list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CampaignRef {
    id: EntityId,
    name: String,
    audience_size: u64,
}

impl CampaignRef {
    pub fn new(id: EntityId, name: impl Into<String>, audience_size: u64) -> Self {
        Self {
            id,
            name: name.into(),
            audience_size,
        }
    }

    pub fn id(&self) -> &EntityId { &self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn audience_size(&self) -> u64 { self.audience_size }
}

/// Customer aggregate root
#[derive(Clone, Debug)]
pub struct Customer {
    id: EntityId,
    name: String,
    email: Email,
    phone: Phone,
    total_spending: Spending,
    last_visit: DateTime<Utc>,
    campaign: Option<CampaignRef>,
    // Domain events accumulated during operations
    events: Vec<DomainEvent>,
}

impl Customer {
    /// Create a new customer (factory method)
    pub fn create(
        name: impl Into<String>,
        email: Email,
        phone: Phone,
        total_spending: Spending,
        last_visit: DateTime<Utc>,
    ) -> Self {
        let id = EntityId::new();

        let mut customer = Self {
            id: id.clone(),
            name: name.into(),
            email: email.clone(),
            phone,
            total_spending,
            last_visit,
            campaign: None,
            events: vec![],
        };

        customer.raise_event(DomainEvent::Customer(CustomerEvent::Created {
            customer_id: id,
            email,
            created_at: Utc::now(),
        }));

        customer
    }

    /// Rebuild a customer from an already-validated API record.
    ///
    /// No events are raised: the record exists on the server already.
    pub fn restore(
        id: EntityId,
        name: impl Into<String>,
        email: Email,
        phone: Phone,
        total_spending: Spending,
        last_visit: DateTime<Utc>,
        campaign: Option<CampaignRef>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email,
            phone,
            total_spending,
            last_visit,
            campaign,
            events: vec![],
        }
    }

    // =========================================================================
    // Getters (immutable access to internal state)
    // =========================================================================

    pub fn id(&self) -> &EntityId { &self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn email(&self) -> &Email { &self.email }
    pub fn phone(&self) -> &Phone { &self.phone }
    pub fn total_spending(&self) -> Spending { self.total_spending }
    pub fn last_visit(&self) -> DateTime<Utc> { self.last_visit }
    pub fn campaign(&self) -> Option<&CampaignRef> { self.campaign.as_ref() }

    /// Whole days elapsed since the last recorded visit
    pub fn days_since_last_visit(&self, now: DateTime<Utc>) -> i64 {
        (now - self.last_visit).num_days()
    }

    // =========================================================================
    // Business Operations (encapsulated behavior)
    // =========================================================================

    /// Assign the customer to a campaign
    pub fn assign_to_campaign(&mut self, campaign: CampaignRef) {
        let campaign_id = campaign.id().clone();
        self.campaign = Some(campaign);

        self.raise_event(DomainEvent::Customer(CustomerEvent::CampaignAssigned {
            customer_id: self.id.clone(),
            campaign_id,
            assigned_at: Utc::now(),
        }));
    }

    /// Record a store visit, moving the last-visit timestamp forward
    pub fn record_visit(&mut self, visited_at: DateTime<Utc>) {
        if visited_at > self.last_visit {
            self.last_visit = visited_at;
        }

        self.raise_event(DomainEvent::Customer(CustomerEvent::VisitRecorded {
            customer_id: self.id.clone(),
            visited_at,
        }));
    }

    /// Add an amount to the customer's lifetime spend
    pub fn record_spending(&mut self, amount: Spending) {
        self.total_spending = self.total_spending.add(amount);

        self.raise_event(DomainEvent::Customer(CustomerEvent::SpendingRecorded {
            customer_id: self.id.clone(),
            amount: amount.amount(),
            new_total: self.total_spending.amount(),
        }));
    }

    // =========================================================================
    // Domain Events
    // =========================================================================

    /// Get and clear accumulated domain events
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    fn raise_event(&mut self, event: DomainEvent) {
        self.events.push(event);
    }
}
