//! Command handlers
//!
//! Application services that orchestrate use cases.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::analytics::{
    self, aggregate_total, average_of, segment_by_spending, CampaignField, CustomerField,
    FilterCriteria, SegmentThresholds,
};
use crate::application::dto::*;
use crate::domain::aggregates::{
    Campaign, CampaignRef, Customer, MessageDraft, Recipient,
};
use crate::domain::value_objects::{Email, EntityId, Phone, Spending};
use crate::ports::inbound::{
    CampaignUseCases, CustomerUseCases, MessagingUseCases, ReportingUseCases, UseCaseError,
};
use crate::ports::outbound::{
    CampaignRepository, CommunicationLogRepository, CustomerRepository, EventPublisher,
};

/// Customer application service
pub struct CustomerService {
    customer_repo: Arc<dyn CustomerRepository>,
    campaign_repo: Arc<dyn CampaignRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CustomerService {
    pub fn new(
        customer_repo: Arc<dyn CustomerRepository>,
        campaign_repo: Arc<dyn CampaignRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            customer_repo,
            campaign_repo,
            event_publisher,
        }
    }
}

#[async_trait]
impl CustomerUseCases for CustomerService {
    async fn create_customer(&self, command: CreateCustomerCommand) -> Result<Customer, UseCaseError> {
        let email = Email::new(&command.email)
            .map_err(|e| UseCaseError::ValidationError(e.to_string()))?;
        let phone = Phone::new(&command.phone)
            .map_err(|e| UseCaseError::ValidationError(e.to_string()))?;
        let spending = Spending::new(command.total_spending)
            .map_err(|e| UseCaseError::ValidationError(e.to_string()))?;

        let mut customer = Customer::create(command.name, email, phone, spending, command.last_visit);

        // Resolve the campaign selection into a denormalized reference
        if let Some(campaign_id) = command.campaign_id {
            let id = EntityId::from_string(&campaign_id);
            let campaign = self.campaign_repo.find_by_id(&id).await
                .map_err(|e| UseCaseError::RepositoryError(e.to_string()))?
                .ok_or_else(|| UseCaseError::NotFound("Campaign not found".into()))?;

            customer.assign_to_campaign(CampaignRef::new(
                campaign.id().clone(),
                campaign.name(),
                campaign.audience_size(),
            ));
        }

        self.customer_repo.save(&customer).await
            .map_err(|e| UseCaseError::RepositoryError(e.to_string()))?;

        let events = customer.take_events();
        self.event_publisher.publish(events).await
            .map_err(|e| UseCaseError::RepositoryError(e.to_string()))?;

        info!(customer_id = %customer.id(), "customer created");
        Ok(customer)
    }

    async fn list_customers(&self) -> Result<Vec<CustomerView>, UseCaseError> {
        let customers = self.customer_repo.list().await
            .map_err(|e| UseCaseError::RepositoryError(e.to_string()))?;

        let now = Utc::now();
        Ok(customers
            .iter()
            .map(|c| CustomerView::from_customer(c, now))
            .collect())
    }
}

/// Campaign application service
pub struct CampaignService {
    campaign_repo: Arc<dyn CampaignRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CampaignService {
    pub fn new(
        campaign_repo: Arc<dyn CampaignRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            campaign_repo,
            event_publisher,
        }
    }
}

#[async_trait]
impl CampaignUseCases for CampaignService {
    async fn create_campaign(&self, command: CreateCampaignCommand) -> Result<Campaign, UseCaseError> {
        let budget = Spending::new(command.total_spending)
            .map_err(|e| UseCaseError::ValidationError(e.to_string()))?;

        let mut campaign = Campaign::create(
            command.name,
            command.description,
            command.start_date,
            command.end_date,
            command.audience_size,
            budget,
        )
        .map_err(|e| UseCaseError::DomainError(e.to_string()))?;

        self.campaign_repo.save(&campaign).await
            .map_err(|e| UseCaseError::RepositoryError(e.to_string()))?;

        let events = campaign.take_events();
        self.event_publisher.publish(events).await
            .map_err(|e| UseCaseError::RepositoryError(e.to_string()))?;

        info!(campaign_id = %campaign.id(), "campaign created");
        Ok(campaign)
    }

    async fn list_campaigns(&self) -> Result<Vec<CampaignView>, UseCaseError> {
        let campaigns = self.campaign_repo.list().await
            .map_err(|e| UseCaseError::RepositoryError(e.to_string()))?;

        Ok(campaigns.iter().map(CampaignView::from).collect())
    }
}

/// Message broadcast application service
pub struct MessagingService {
    customer_repo: Arc<dyn CustomerRepository>,
    campaign_repo: Arc<dyn CampaignRepository>,
    log_repo: Arc<dyn CommunicationLogRepository>,
}

impl MessagingService {
    pub fn new(
        customer_repo: Arc<dyn CustomerRepository>,
        campaign_repo: Arc<dyn CampaignRepository>,
        log_repo: Arc<dyn CommunicationLogRepository>,
    ) -> Self {
        Self {
            customer_repo,
            campaign_repo,
            log_repo,
        }
    }

    async fn campaign_audience(&self, campaign_id: Option<&EntityId>)
        -> Result<Vec<Customer>, UseCaseError>
    {
        let customers = self.customer_repo.list().await
            .map_err(|e| UseCaseError::RepositoryError(e.to_string()))?;

        Ok(match campaign_id {
            Some(id) => customers
                .into_iter()
                .filter(|c| c.campaign().map(|r| r.id() == id).unwrap_or(false))
                .collect(),
            None => customers,
        })
    }
}

#[async_trait]
impl MessagingUseCases for MessagingService {
    async fn recipients_for(&self, campaign_id: Option<&EntityId>)
        -> Result<Vec<CustomerView>, UseCaseError>
    {
        let now = Utc::now();
        Ok(self
            .campaign_audience(campaign_id)
            .await?
            .iter()
            .map(|c| CustomerView::from_customer(c, now))
            .collect())
    }

    async fn send_message(&self, command: SendMessageCommand) -> Result<SendReceipt, UseCaseError> {
        if command.message.trim().is_empty() {
            return Err(UseCaseError::ValidationError("Message must not be empty".into()));
        }
        if command.campaign_id.trim().is_empty() {
            return Err(UseCaseError::ValidationError("A campaign must be selected".into()));
        }

        let campaign_id = EntityId::from_string(&command.campaign_id);
        let campaign = self.campaign_repo.find_by_id(&campaign_id).await
            .map_err(|e| UseCaseError::RepositoryError(e.to_string()))?
            .ok_or_else(|| UseCaseError::NotFound("Campaign not found".into()))?;

        let recipients: Vec<Recipient> = self
            .campaign_audience(Some(&campaign_id))
            .await?
            .iter()
            .map(|c| Recipient {
                id: c.id().clone(),
                name: c.name().to_string(),
                email: c.email().clone(),
            })
            .collect();

        let receipt = SendReceipt {
            campaign_name: campaign.name().to_string(),
            message: command.message.clone(),
            recipient_count: recipients.len(),
            recipients: recipients
                .iter()
                .map(|r| RecipientView {
                    name: r.name.clone(),
                    email: r.email.to_string(),
                })
                .collect(),
        };

        self.log_repo
            .record(MessageDraft {
                campaign_id,
                campaign_name: campaign.name().to_string(),
                message: command.message,
                recipients,
            })
            .await
            .map_err(|e| UseCaseError::RepositoryError(e.to_string()))?;

        info!(
            campaign = %receipt.campaign_name,
            recipients = receipt.recipient_count,
            "broadcast message recorded"
        );
        Ok(receipt)
    }

    async fn message_history(&self) -> Result<Vec<CommunicationLogView>, UseCaseError> {
        let logs = self.log_repo.list().await
            .map_err(|e| UseCaseError::RepositoryError(e.to_string()))?;

        Ok(logs.iter().map(CommunicationLogView::from).collect())
    }
}

/// Dashboard reporting application service
pub struct ReportingService {
    customer_repo: Arc<dyn CustomerRepository>,
    campaign_repo: Arc<dyn CampaignRepository>,
}

impl ReportingService {
    pub fn new(
        customer_repo: Arc<dyn CustomerRepository>,
        campaign_repo: Arc<dyn CampaignRepository>,
    ) -> Self {
        Self {
            customer_repo,
            campaign_repo,
        }
    }
}

#[async_trait]
impl ReportingUseCases for ReportingService {
    async fn dashboard_overview(&self) -> Result<DashboardOverview, UseCaseError> {
        let customers = self.customer_repo.list().await
            .map_err(|e| UseCaseError::RepositoryError(e.to_string()))?;

        Ok(DashboardOverview {
            total_customers: customers.len(),
            total_spend: aggregate_total(&customers, CustomerField::TotalSpending),
            most_recent_visit: customers.iter().map(|c| c.last_visit()).max(),
        })
    }

    async fn campaign_overview(&self) -> Result<CampaignOverview, UseCaseError> {
        let campaigns = self.campaign_repo.list().await
            .map_err(|e| UseCaseError::RepositoryError(e.to_string()))?;

        Ok(CampaignOverview {
            total_campaigns: campaigns.len(),
            average_audience_size: average_of(&campaigns, CampaignField::AudienceSize),
            total_audience_size: campaigns.iter().map(|c| c.audience_size()).sum(),
            total_budget: aggregate_total(&campaigns, CampaignField::TotalSpending),
        })
    }

    async fn spending_segments(&self, thresholds: SegmentThresholds)
        -> Result<Vec<SegmentView>, UseCaseError>
    {
        let customers = self.customer_repo.list().await
            .map_err(|e| UseCaseError::RepositoryError(e.to_string()))?;

        let segments = segment_by_spending(&customers, thresholds);
        let now = Utc::now();
        Ok(vec![
            SegmentView::from_segment(&segments.low, now),
            SegmentView::from_segment(&segments.high, now),
        ])
    }

    async fn filter_audience(&self, criteria: &FilterCriteria)
        -> Result<Vec<CustomerView>, UseCaseError>
    {
        let customers = self.customer_repo.list().await
            .map_err(|e| UseCaseError::RepositoryError(e.to_string()))?;

        let matched = analytics::filter_customers(&customers, criteria)
            .map_err(|e| UseCaseError::InvalidCriteria(e.to_string()))?;

        let now = Utc::now();
        Ok(matched
            .iter()
            .map(|c| CustomerView::from_customer(c, now))
            .collect())
    }
}
