//! Outbound ports (Repository traits)
//!
//! Hexagonal architecture: the interfaces the data-access adapters must
//! implement. In production these are backed by the remote REST API; tests
//! use the in-memory implementations.

use async_trait::async_trait;

use crate::domain::aggregates::{Campaign, CommunicationLog, Customer, MessageDraft};
use crate::domain::value_objects::EntityId;

/// Customer repository port
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Fetch the full customer list in server order
    async fn list(&self) -> Result<Vec<Customer>, RepositoryError>;

    /// Save a customer (create on the backing store)
    async fn save(&self, customer: &Customer) -> Result<(), RepositoryError>;
}

/// Campaign repository port
#[async_trait]
pub trait CampaignRepository: Send + Sync {
    /// Fetch the full campaign list in server order
    async fn list(&self) -> Result<Vec<Campaign>, RepositoryError>;

    /// Find campaign by ID
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Campaign>, RepositoryError>;

    /// Save a campaign (create on the backing store)
    async fn save(&self, campaign: &Campaign) -> Result<(), RepositoryError>;
}

/// Communication log port
#[async_trait]
pub trait CommunicationLogRepository: Send + Sync {
    /// Fetch sent-message history
    async fn list(&self) -> Result<Vec<CommunicationLog>, RepositoryError>;

    /// Submit a composed message; the backing store owns the resulting record
    async fn record(&self, draft: MessageDraft) -> Result<(), RepositoryError>;
}

/// Event publisher port
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish domain events
    async fn publish(&self, events: Vec<crate::domain::DomainEvent>) -> Result<(), RepositoryError>;
}

/// Repository error type
#[derive(Debug, Clone)]
pub enum RepositoryError {
    NotFound,
    Unauthenticated,
    ConnectionError(String),
    QueryError(String),
    SerializationError(String),
}

impl std::error::Error for RepositoryError {}

impl std::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "Entity not found"),
            Self::Unauthenticated => write!(f, "No session token"),
            Self::ConnectionError(e) => write!(f, "Connection error: {}", e),
            Self::QueryError(e) => write!(f, "Query error: {}", e),
            Self::SerializationError(e) => write!(f, "Serialization error: {}", e),
        }
    }
}
