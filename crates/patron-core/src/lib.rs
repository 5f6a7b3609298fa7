//! Patron CRM & Campaign Analytics Core
//!
//! Domain model and client-side analytics pipeline for a CRM/campaign
//! dashboard, following Domain-Driven Design (DDD) with hexagonal ports.
//!
//! ## Architecture
//!
//! - **Domain Layer**: Aggregates, value objects, domain events
//! - **Analytics Layer**: Pure filtering/segmentation/aggregation over
//!   fetched datasets
//! - **Application Layer**: Use case orchestration, DTOs
//! - **Ports Layer**: Hexagonal architecture interfaces
//! - **Infrastructure Layer**: In-memory adapters for tests
//!
//! ## Key Aggregates
//!
//! - **Customer**: Contact record with lifetime spend and campaign link
//! - **Campaign**: Marketing campaign with audience reach and budget
//! - **CommunicationLog**: API-owned broadcast-message history
//!
//! ## Features
//!
//! - Audience filtering with AND-composed per-field criteria
//! - Low/high spender segmentation with independent thresholds
//! - Chart-ready series and overview aggregates for the dashboard

pub mod analytics;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-exports for convenience
pub use analytics::{
    aggregate_total, average_of, build_series, filter_customers, segment_by_spending,
    segment_size_series, CampaignField, CriteriaError, CustomerField, CustomerPredicate,
    FilterCriteria, Segment, SegmentThresholds, SeriesPoint, SeriesSource, SpendingComparison,
    SpendingSegments,
};
pub use application::{CampaignService, CustomerService, MessagingService, ReportingService};
pub use domain::aggregates::{Campaign, CampaignRef, CommunicationLog, Customer, MessageDraft, Recipient};
pub use domain::value_objects::{Email, EntityId, Phone, Spending};
pub use domain::{CampaignEvent, CustomerEvent, DomainEvent};
pub use ports::inbound::{
    CampaignUseCases, CustomerUseCases, MessagingUseCases, ReportingUseCases, UseCaseError,
};
pub use ports::outbound::{
    CampaignRepository, CommunicationLogRepository, CustomerRepository, EventPublisher,
    RepositoryError,
};
