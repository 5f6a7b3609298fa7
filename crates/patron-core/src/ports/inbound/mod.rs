//! Inbound ports (Use case traits)
//!
//! Hexagonal architecture: application service interfaces the view layer
//! calls into.

use async_trait::async_trait;

use crate::analytics::{FilterCriteria, SegmentThresholds};
use crate::application::dto::*;
use crate::domain::aggregates::{Campaign, Customer};
use crate::domain::value_objects::EntityId;

/// Customer management use cases
#[async_trait]
pub trait CustomerUseCases: Send + Sync {
    /// Create a new customer
    async fn create_customer(&self, command: CreateCustomerCommand) -> Result<Customer, UseCaseError>;

    /// List all customers as table rows
    async fn list_customers(&self) -> Result<Vec<CustomerView>, UseCaseError>;
}

/// Campaign management use cases
#[async_trait]
pub trait CampaignUseCases: Send + Sync {
    /// Create a new campaign
    async fn create_campaign(&self, command: CreateCampaignCommand) -> Result<Campaign, UseCaseError>;

    /// List campaign history
    async fn list_campaigns(&self) -> Result<Vec<CampaignView>, UseCaseError>;
}

/// Message broadcast use cases
#[async_trait]
pub trait MessagingUseCases: Send + Sync {
    /// Customers eligible for a broadcast: the selected campaign's audience,
    /// or everyone when no campaign is selected
    async fn recipients_for(&self, campaign_id: Option<&EntityId>)
        -> Result<Vec<CustomerView>, UseCaseError>;

    /// Compose and submit a broadcast message
    async fn send_message(&self, command: SendMessageCommand) -> Result<SendReceipt, UseCaseError>;

    /// Previously sent messages, for the history panel
    async fn message_history(&self) -> Result<Vec<CommunicationLogView>, UseCaseError>;
}

/// Dashboard reporting use cases
#[async_trait]
pub trait ReportingUseCases: Send + Sync {
    /// Headline customer numbers
    async fn dashboard_overview(&self) -> Result<DashboardOverview, UseCaseError>;

    /// Headline campaign numbers
    async fn campaign_overview(&self) -> Result<CampaignOverview, UseCaseError>;

    /// Low/high spender segments at the given thresholds
    async fn spending_segments(&self, thresholds: SegmentThresholds)
        -> Result<Vec<SegmentView>, UseCaseError>;

    /// Audience filtered by the segment screen's criteria
    async fn filter_audience(&self, criteria: &FilterCriteria)
        -> Result<Vec<CustomerView>, UseCaseError>;
}

#[derive(Debug, Clone)]
pub enum UseCaseError {
    NotFound(String),
    ValidationError(String),
    InvalidCriteria(String),
    DomainError(String),
    RepositoryError(String),
}

impl std::error::Error for UseCaseError {}

impl std::fmt::Display for UseCaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(e) => write!(f, "Not found: {}", e),
            Self::ValidationError(e) => write!(f, "Validation error: {}", e),
            Self::InvalidCriteria(e) => write!(f, "Invalid criteria: {}", e),
            Self::DomainError(e) => write!(f, "Domain error: {}", e),
            Self::RepositoryError(e) => write!(f, "Repository error: {}", e),
        }
    }
}
