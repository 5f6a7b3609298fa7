//! API Client
//!
//! Typed REST access to the CRM backend with bearer-token auth. Wire
//! payloads are deserialized into DTOs here and validated into domain types
//! at this boundary; nothing downstream ever sees a shape-free record.
//! The client implements the core's outbound repository ports, so the
//! application services run unchanged against HTTP or in-memory adapters.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

use patron_core::domain::aggregates::{
    Campaign, CampaignRef, CommunicationLog, Customer, MessageDraft, Recipient,
};
use patron_core::domain::value_objects::{Email, EntityId, Phone, Spending};
use patron_core::ports::outbound::{
    CampaignRepository, CommunicationLogRepository, CustomerRepository, RepositoryError,
};

use crate::config::Config;
use crate::session::{SessionError, SessionStore};

pub struct ApiClient {
    base_url: Url,
    http: reqwest::Client,
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// Build a client from explicit configuration and session state
    pub fn new(config: &Config, session: Arc<SessionStore>) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(&config.server.url)
            .map_err(|e| ApiError::InvalidBaseUrl(e.to_string()))?;

        // Url::join treats a path without a trailing slash as a file
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http.timeout_secs))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            base_url,
            http,
            session,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidBaseUrl(e.to_string()))
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Exchange credentials for a server-issued bearer token and store it
    /// in the session
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.endpoint("api/auth/login")?)
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::AuthFailed(format!(
                "Server returned {}",
                response.status()
            )));
        }

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        if !body.success {
            return Err(ApiError::AuthFailed("Login rejected".to_string()));
        }

        self.session.set_token(body.token);
        info!("session established");
        Ok(())
    }

    // =========================================================================
    // Fetches
    // =========================================================================

    pub async fn fetch_customers(&self) -> Result<Vec<Customer>, ApiError> {
        let token = self.session.require_token()?;

        let response = self
            .http
            .get(self.endpoint("api/customers")?)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }

        let records: Vec<CustomerDto> = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        let customers = records
            .into_iter()
            .map(CustomerDto::into_domain)
            .collect::<Result<Vec<_>, _>>()?;

        info!(count = customers.len(), "fetched customers");
        Ok(customers)
    }

    pub async fn fetch_campaigns(&self) -> Result<Vec<Campaign>, ApiError> {
        let token = self.session.require_token()?;

        let response = self
            .http
            .get(self.endpoint("api/campaigns")?)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }

        // Campaign list arrives wrapped in an envelope
        let envelope: CampaignsEnvelope = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        let campaigns = envelope
            .campaigns
            .into_iter()
            .map(CampaignDto::into_domain)
            .collect::<Result<Vec<_>, _>>()?;

        info!(count = campaigns.len(), "fetched campaigns");
        Ok(campaigns)
    }

    pub async fn fetch_communication_logs(&self) -> Result<Vec<CommunicationLog>, ApiError> {
        let token = self.session.require_token()?;

        let response = self
            .http
            .get(self.endpoint("api/communicationLogs")?)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }

        let records: Vec<CommunicationLogDto> = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        records
            .into_iter()
            .map(CommunicationLogDto::into_domain)
            .collect()
    }

    // =========================================================================
    // Writes
    // =========================================================================

    pub async fn create_customer(&self, customer: &Customer) -> Result<(), ApiError> {
        let token = self.session.require_token()?;

        let response = self
            .http
            .post(self.endpoint("api/customers")?)
            .bearer_auth(&token)
            .json(&NewCustomerDto::from(customer))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }

        Ok(())
    }

    pub async fn create_campaign(&self, campaign: &Campaign) -> Result<(), ApiError> {
        let token = self.session.require_token()?;

        let response = self
            .http
            .post(self.endpoint("api/campaigns")?)
            .bearer_auth(&token)
            .json(&NewCampaignDto::from(campaign))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }

        Ok(())
    }

    pub async fn send_message(&self, draft: &MessageDraft) -> Result<(), ApiError> {
        let token = self.session.require_token()?;

        let response = self
            .http
            .post(self.endpoint("api/communicationLogs")?)
            .bearer_auth(&token)
            .json(&SendMessageDto::from(draft))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }

        info!(recipients = draft.recipients.len(), "broadcast submitted");
        Ok(())
    }
}

// =============================================================================
// Repository port implementations
// =============================================================================

#[async_trait]
impl CustomerRepository for ApiClient {
    async fn list(&self) -> Result<Vec<Customer>, RepositoryError> {
        self.fetch_customers().await.map_err(RepositoryError::from)
    }

    async fn save(&self, customer: &Customer) -> Result<(), RepositoryError> {
        self.create_customer(customer)
            .await
            .map_err(RepositoryError::from)
    }
}

#[async_trait]
impl CampaignRepository for ApiClient {
    async fn list(&self) -> Result<Vec<Campaign>, RepositoryError> {
        self.fetch_campaigns().await.map_err(RepositoryError::from)
    }

    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Campaign>, RepositoryError> {
        // The API exposes no single-campaign endpoint; scan the list
        let campaigns = self.fetch_campaigns().await.map_err(RepositoryError::from)?;
        Ok(campaigns.into_iter().find(|c| c.id() == id))
    }

    async fn save(&self, campaign: &Campaign) -> Result<(), RepositoryError> {
        self.create_campaign(campaign)
            .await
            .map_err(RepositoryError::from)
    }
}

#[async_trait]
impl CommunicationLogRepository for ApiClient {
    async fn list(&self) -> Result<Vec<CommunicationLog>, RepositoryError> {
        self.fetch_communication_logs()
            .await
            .map_err(RepositoryError::from)
    }

    async fn record(&self, draft: MessageDraft) -> Result<(), RepositoryError> {
        self.send_message(&draft).await.map_err(RepositoryError::from)
    }
}

// =============================================================================
// Wire DTOs
// =============================================================================

#[derive(Debug, Serialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    success: bool,
    #[serde(default)]
    token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CustomerDto {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    email: String,
    phone: String,
    total_spending: Decimal,
    last_visit: DateTime<Utc>,
    #[serde(rename = "campaignId", default)]
    campaign: Option<CampaignRefDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CampaignRefDto {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    #[serde(default)]
    audience_size: u64,
}

impl CustomerDto {
    fn into_domain(self) -> Result<Customer, ApiError> {
        let id = self.id;

        let email = Email::new(&self.email)
            .map_err(|e| ApiError::InvalidPayload(format!("customer {}: {}", id, e)))?;
        let phone = Phone::new(&self.phone)
            .map_err(|e| ApiError::InvalidPayload(format!("customer {}: {}", id, e)))?;
        let spending = Spending::new(self.total_spending)
            .map_err(|e| ApiError::InvalidPayload(format!("customer {}: {}", id, e)))?;

        let campaign = self.campaign.map(|c| {
            CampaignRef::new(EntityId::from_string(c.id), c.name, c.audience_size)
        });

        Ok(Customer::restore(
            EntityId::from_string(id),
            self.name,
            email,
            phone,
            spending,
            self.last_visit,
            campaign,
        ))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CampaignDto {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    audience_size: u64,
    total_spending: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct CampaignsEnvelope {
    campaigns: Vec<CampaignDto>,
}

impl CampaignDto {
    fn into_domain(self) -> Result<Campaign, ApiError> {
        let id = self.id;

        let start = self.start_date.date_naive();
        let end = self.end_date.date_naive();
        if start > end {
            return Err(ApiError::InvalidPayload(format!(
                "campaign {}: start date after end date",
                id
            )));
        }

        let spending = Spending::new(self.total_spending)
            .map_err(|e| ApiError::InvalidPayload(format!("campaign {}: {}", id, e)))?;

        Ok(Campaign::restore(
            EntityId::from_string(id),
            self.name,
            self.description,
            start,
            end,
            self.audience_size,
            spending,
            self.created_at,
            self.updated_at,
        ))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommunicationLogDto {
    #[serde(rename = "_id")]
    id: String,
    campaign_id: LogCampaignDto,
    message: String,
    customer_ids: Vec<LogRecipientDto>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct LogCampaignDto {
    #[serde(rename = "_id")]
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct LogRecipientDto {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    email: String,
}

impl CommunicationLogDto {
    fn into_domain(self) -> Result<CommunicationLog, ApiError> {
        let recipients = self
            .customer_ids
            .into_iter()
            .map(|r| {
                let email = Email::new(&r.email).map_err(|e| {
                    ApiError::InvalidPayload(format!("recipient {}: {}", r.id, e))
                })?;
                Ok(Recipient {
                    id: EntityId::from_string(r.id),
                    name: r.name,
                    email,
                })
            })
            .collect::<Result<Vec<_>, ApiError>>()?;

        Ok(CommunicationLog {
            id: EntityId::from_string(self.id),
            campaign_id: EntityId::from_string(self.campaign_id.id),
            campaign_name: self.campaign_id.name,
            message: self.message,
            recipients,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewCustomerDto {
    name: String,
    email: String,
    phone: String,
    total_spending: Decimal,
    last_visit: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    campaign_id: Option<String>,
}

impl From<&Customer> for NewCustomerDto {
    fn from(customer: &Customer) -> Self {
        Self {
            name: customer.name().to_string(),
            email: customer.email().to_string(),
            phone: customer.phone().to_string(),
            total_spending: customer.total_spending().amount(),
            last_visit: customer.last_visit(),
            campaign_id: customer.campaign().map(|c| c.id().to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewCampaignDto {
    name: String,
    description: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    audience_size: u64,
    total_spending: Decimal,
}

impl From<&Campaign> for NewCampaignDto {
    fn from(campaign: &Campaign) -> Self {
        Self {
            name: campaign.name().to_string(),
            description: campaign.description().to_string(),
            start_date: campaign.start_date(),
            end_date: campaign.end_date(),
            audience_size: campaign.audience_size(),
            total_spending: campaign.total_spending().amount(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendMessageDto {
    campaign_id: String,
    message: String,
    customers: Vec<String>,
}

impl From<&MessageDraft> for SendMessageDto {
    fn from(draft: &MessageDraft) -> Self {
        Self {
            campaign_id: draft.campaign_id.to_string(),
            message: draft.message.clone(),
            customers: draft.recipients.iter().map(|r| r.id.to_string()).collect(),
        }
    }
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server returned status {0}")]
    Status(u16),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid record in payload: {0}")]
    InvalidPayload(String),

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl From<ApiError> for RepositoryError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Session(_) => RepositoryError::Unauthenticated,
            ApiError::Network(e) => RepositoryError::ConnectionError(e),
            ApiError::Parse(e) | ApiError::InvalidPayload(e) => {
                RepositoryError::SerializationError(e)
            }
            other => RepositoryError::QueryError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> ApiClient {
        let config = Config {
            server: crate::config::ServerConfig {
                url: "http://localhost:5000".into(),
            },
            http: Default::default(),
        };
        ApiClient::new(&config, Arc::new(SessionStore::new())).unwrap()
    }

    #[test]
    fn test_endpoint_joins_base_path() {
        let client = test_client();
        let url = client.endpoint("api/customers").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/customers");
    }

    #[tokio::test]
    async fn test_fetch_without_token_fails_before_any_request() {
        let client = test_client();
        let result = client.fetch_customers().await;
        assert!(matches!(
            result,
            Err(ApiError::Session(SessionError::NotAuthenticated))
        ));
    }

    #[test]
    fn test_customer_dto_into_domain() {
        let json = r#"{
            "_id": "662f0c1e",
            "name": "Ana Lee",
            "email": "Ana@Example.com",
            "phone": "555-123-4567",
            "totalSpending": 2500.5,
            "lastVisit": "2024-05-01T10:00:00Z",
            "campaignId": { "_id": "c-1", "name": "Summer Sale", "audienceSize": 1200 }
        }"#;

        let dto: CustomerDto = serde_json::from_str(json).unwrap();
        let customer = dto.into_domain().unwrap();

        assert_eq!(customer.id().as_str(), "662f0c1e");
        assert_eq!(customer.email().as_str(), "ana@example.com");
        assert_eq!(customer.total_spending().amount(), Decimal::new(25005, 1));
        assert_eq!(customer.campaign().unwrap().name(), "Summer Sale");
        assert_eq!(customer.campaign().unwrap().audience_size(), 1200);
    }

    #[test]
    fn test_customer_dto_without_campaign() {
        let json = r#"{
            "_id": "662f0c1f",
            "name": "Bob",
            "email": "bob@example.com",
            "phone": "444-111-2222",
            "totalSpending": 600,
            "lastVisit": "2024-05-02T09:30:00Z"
        }"#;

        let dto: CustomerDto = serde_json::from_str(json).unwrap();
        let customer = dto.into_domain().unwrap();
        assert!(customer.campaign().is_none());
    }

    #[test]
    fn test_customer_dto_rejects_bad_email() {
        let json = r#"{
            "_id": "662f0c20",
            "name": "Eve",
            "email": "nope",
            "phone": "444-111-2222",
            "totalSpending": 0,
            "lastVisit": "2024-05-02T09:30:00Z"
        }"#;

        let dto: CustomerDto = serde_json::from_str(json).unwrap();
        assert!(matches!(dto.into_domain(), Err(ApiError::InvalidPayload(_))));
    }

    #[test]
    fn test_campaign_envelope_into_domain() {
        let json = r#"{
            "campaigns": [{
                "_id": "c-1",
                "name": "Summer Sale",
                "description": "Seasonal discount push",
                "startDate": "2024-06-01T00:00:00Z",
                "endDate": "2024-06-30T00:00:00Z",
                "audienceSize": 1200,
                "totalSpending": 5000,
                "createdAt": "2024-05-20T08:00:00Z",
                "updatedAt": "2024-05-21T08:00:00Z"
            }]
        }"#;

        let envelope: CampaignsEnvelope = serde_json::from_str(json).unwrap();
        let campaign = envelope.campaigns.into_iter().next().unwrap().into_domain().unwrap();

        assert_eq!(campaign.name(), "Summer Sale");
        assert_eq!(campaign.audience_size(), 1200);
        assert_eq!(
            campaign.start_date(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
    }

    #[test]
    fn test_campaign_dto_rejects_inverted_dates() {
        let json = r#"{
            "_id": "c-2",
            "name": "Backwards",
            "startDate": "2024-07-01T00:00:00Z",
            "endDate": "2024-06-01T00:00:00Z",
            "audienceSize": 0,
            "totalSpending": 0,
            "createdAt": "2024-05-20T08:00:00Z",
            "updatedAt": "2024-05-20T08:00:00Z"
        }"#;

        let dto: CampaignDto = serde_json::from_str(json).unwrap();
        assert!(matches!(dto.into_domain(), Err(ApiError::InvalidPayload(_))));
    }

    #[test]
    fn test_communication_log_dto_into_domain() {
        let json = r#"{
            "_id": "log-1",
            "campaignId": { "_id": "c-1", "name": "Summer Sale" },
            "message": "20% off this week",
            "customerIds": [
                { "_id": "cu-1", "name": "Ana Lee", "email": "ana@example.com" }
            ],
            "createdAt": "2024-06-02T12:00:00Z"
        }"#;

        let dto: CommunicationLogDto = serde_json::from_str(json).unwrap();
        let log = dto.into_domain().unwrap();

        assert_eq!(log.campaign_name, "Summer Sale");
        assert_eq!(log.recipient_count(), 1);
        assert_eq!(log.recipients[0].name, "Ana Lee");
    }

    #[test]
    fn test_send_message_wire_shape() {
        let draft = MessageDraft {
            campaign_id: EntityId::from_string("c-1"),
            campaign_name: "Summer Sale".into(),
            message: "20% off".into(),
            recipients: vec![Recipient {
                id: EntityId::from_string("cu-1"),
                name: "Ana Lee".into(),
                email: Email::new("ana@example.com").unwrap(),
            }],
        };

        let body = serde_json::to_value(SendMessageDto::from(&draft)).unwrap();
        assert_eq!(body["campaignId"], "c-1");
        assert_eq!(body["message"], "20% off");
        assert_eq!(body["customers"][0], "cu-1");
    }

    #[test]
    fn test_new_customer_wire_shape_uses_camel_case() {
        let customer = Customer::restore(
            EntityId::from_string("cu-1"),
            "Ana Lee",
            Email::new("ana@example.com").unwrap(),
            Phone::new("555-123-4567").unwrap(),
            Spending::new(Decimal::new(100, 0)).unwrap(),
            Utc::now(),
            None,
        );

        let body = serde_json::to_value(NewCustomerDto::from(&customer)).unwrap();
        assert!(body.get("totalSpending").is_some());
        assert!(body.get("lastVisit").is_some());
        assert!(body.get("campaignId").is_none());
    }
}
