//! Domain Events
//!
//! Events raised by aggregates to communicate state changes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::value_objects::{Email, EntityId};

/// All domain events in the CRM bounded context
#[derive(Clone, Debug)]
pub enum DomainEvent {
    Customer(CustomerEvent),
    Campaign(CampaignEvent),
}

/// Customer-related domain events
#[derive(Clone, Debug)]
pub enum CustomerEvent {
    Created {
        customer_id: EntityId,
        email: Email,
        created_at: DateTime<Utc>,
    },

    CampaignAssigned {
        customer_id: EntityId,
        campaign_id: EntityId,
        assigned_at: DateTime<Utc>,
    },

    SpendingRecorded {
        customer_id: EntityId,
        amount: Decimal,
        new_total: Decimal,
    },

    VisitRecorded {
        customer_id: EntityId,
        visited_at: DateTime<Utc>,
    },
}

/// Campaign-related domain events
#[derive(Clone, Debug)]
pub enum CampaignEvent {
    Created {
        campaign_id: EntityId,
        name: String,
        created_at: DateTime<Utc>,
    },

    SpendingRecorded {
        campaign_id: EntityId,
        amount: Decimal,
        new_total: Decimal,
    },

    AudienceExpanded {
        campaign_id: EntityId,
        added: u64,
        new_size: u64,
    },
}

impl DomainEvent {
    /// Get the aggregate ID this event belongs to
    pub fn aggregate_id(&self) -> &EntityId {
        match self {
            DomainEvent::Customer(e) => match e {
                CustomerEvent::Created { customer_id, .. } => customer_id,
                CustomerEvent::CampaignAssigned { customer_id, .. } => customer_id,
                CustomerEvent::SpendingRecorded { customer_id, .. } => customer_id,
                CustomerEvent::VisitRecorded { customer_id, .. } => customer_id,
            },
            DomainEvent::Campaign(e) => match e {
                CampaignEvent::Created { campaign_id, .. } => campaign_id,
                CampaignEvent::SpendingRecorded { campaign_id, .. } => campaign_id,
                CampaignEvent::AudienceExpanded { campaign_id, .. } => campaign_id,
            },
        }
    }

    /// Get event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            DomainEvent::Customer(e) => match e {
                CustomerEvent::Created { .. } => "customer.created",
                CustomerEvent::CampaignAssigned { .. } => "customer.campaign_assigned",
                CustomerEvent::SpendingRecorded { .. } => "customer.spending_recorded",
                CustomerEvent::VisitRecorded { .. } => "customer.visit_recorded",
            },
            DomainEvent::Campaign(e) => match e {
                CampaignEvent::Created { .. } => "campaign.created",
                CampaignEvent::SpendingRecorded { .. } => "campaign.spending_recorded",
                CampaignEvent::AudienceExpanded { .. } => "campaign.audience_expanded",
            },
        }
    }
}
