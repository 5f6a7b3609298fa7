//! Data Transfer Objects (DTOs)
//!
//! Commands coming in from the view layer and read models going back out.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analytics::Segment;
use crate::domain::aggregates::{Campaign, CommunicationLog, Customer};

// =============================================================================
// Commands
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateCustomerCommand {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub total_spending: Decimal,
    pub last_visit: DateTime<Utc>,
    pub campaign_id: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateCampaignCommand {
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub audience_size: u64,
    pub total_spending: Decimal,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SendMessageCommand {
    pub campaign_id: String,
    pub message: String,
}

// =============================================================================
// Views (Read Models)
// =============================================================================

/// Customer table row
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CustomerView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub campaign_name: Option<String>,
    pub total_spending: Decimal,
    pub last_visit: DateTime<Utc>,
    pub days_since_last_visit: i64,
}

impl CustomerView {
    pub fn from_customer(customer: &Customer, now: DateTime<Utc>) -> Self {
        Self {
            id: customer.id().to_string(),
            name: customer.name().to_string(),
            email: customer.email().to_string(),
            phone: customer.phone().to_string(),
            campaign_name: customer.campaign().map(|c| c.name().to_string()),
            total_spending: customer.total_spending().rounded(),
            last_visit: customer.last_visit(),
            days_since_last_visit: customer.days_since_last_visit(now),
        }
    }
}

/// Campaign history card
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CampaignView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub audience_size: u64,
    pub total_spending: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Campaign> for CampaignView {
    fn from(campaign: &Campaign) -> Self {
        Self {
            id: campaign.id().to_string(),
            name: campaign.name().to_string(),
            description: campaign.description().to_string(),
            start_date: campaign.start_date(),
            end_date: campaign.end_date(),
            audience_size: campaign.audience_size(),
            total_spending: campaign.total_spending().rounded(),
            created_at: campaign.created_at(),
            updated_at: campaign.updated_at(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecipientView {
    pub name: String,
    pub email: String,
}

/// Sent-message history card
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CommunicationLogView {
    pub id: String,
    pub campaign_name: String,
    pub message: String,
    pub recipient_count: usize,
    pub recipients: Vec<RecipientView>,
    pub sent_at: DateTime<Utc>,
}

impl From<&CommunicationLog> for CommunicationLogView {
    fn from(log: &CommunicationLog) -> Self {
        Self {
            id: log.id.to_string(),
            campaign_name: log.campaign_name.clone(),
            message: log.message.clone(),
            recipient_count: log.recipient_count(),
            recipients: log
                .recipients
                .iter()
                .map(|r| RecipientView {
                    name: r.name.clone(),
                    email: r.email.to_string(),
                })
                .collect(),
            sent_at: log.created_at,
        }
    }
}

/// Confirmation returned right after a broadcast is accepted
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SendReceipt {
    pub campaign_name: String,
    pub message: String,
    pub recipient_count: usize,
    pub recipients: Vec<RecipientView>,
}

/// Headline numbers for the dashboard landing card
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DashboardOverview {
    pub total_customers: usize,
    pub total_spend: Decimal,
    pub most_recent_visit: Option<DateTime<Utc>>,
}

/// Headline numbers for the campaign card
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CampaignOverview {
    pub total_campaigns: usize,
    pub average_audience_size: Decimal,
    pub total_audience_size: u64,
    pub total_budget: Decimal,
}

/// A spending segment with its members rendered as table rows
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SegmentView {
    pub name: String,
    pub size: usize,
    pub customers: Vec<CustomerView>,
}

impl SegmentView {
    pub fn from_segment(segment: &Segment, now: DateTime<Utc>) -> Self {
        Self {
            name: segment.name().to_string(),
            size: segment.size(),
            customers: segment
                .customers()
                .iter()
                .map(|c| CustomerView::from_customer(c, now))
                .collect(),
        }
    }
}
