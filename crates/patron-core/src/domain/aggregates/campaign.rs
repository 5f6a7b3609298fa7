//! Campaign Aggregate
//!
//! Marketing campaign with audience reach and budget tracking.

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::events::{CampaignEvent, DomainEvent};
use crate::domain::value_objects::{EntityId, Spending};

/// Campaign aggregate root
#[derive(Clone, Debug)]
pub struct Campaign {
    id: EntityId,
    name: String,
    description: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    audience_size: u64,
    total_spending: Spending,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    events: Vec<DomainEvent>,
}

impl Campaign {
    /// Create a new campaign (factory method)
    ///
    /// The running period must be well-formed: start_date <= end_date.
    pub fn create(
        name: impl Into<String>,
        description: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        audience_size: u64,
        total_spending: Spending,
    ) -> Result<Self, CampaignError> {
        if start_date > end_date {
            return Err(CampaignError::InvalidDateRange);
        }

        let now = Utc::now();
        let id = EntityId::new();

        let mut campaign = Self {
            id: id.clone(),
            name: name.into(),
            description: description.into(),
            start_date,
            end_date,
            audience_size,
            total_spending,
            created_at: now,
            updated_at: now,
            events: vec![],
        };

        let name = campaign.name.clone();
        campaign.raise_event(DomainEvent::Campaign(CampaignEvent::Created {
            campaign_id: id,
            name,
            created_at: now,
        }));

        Ok(campaign)
    }

    /// Rebuild a campaign from an already-validated API record.
    ///
    /// Server-side records are trusted on the date invariant; no events raised.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: EntityId,
        name: impl Into<String>,
        description: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        audience_size: u64,
        total_spending: Spending,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            start_date,
            end_date,
            audience_size,
            total_spending,
            created_at,
            updated_at,
            events: vec![],
        }
    }

    pub fn id(&self) -> &EntityId { &self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn description(&self) -> &str { &self.description }
    pub fn start_date(&self) -> NaiveDate { self.start_date }
    pub fn end_date(&self) -> NaiveDate { self.end_date }
    pub fn audience_size(&self) -> u64 { self.audience_size }
    pub fn total_spending(&self) -> Spending { self.total_spending }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
    pub fn updated_at(&self) -> DateTime<Utc> { self.updated_at }

    /// Add an amount to the campaign budget spend
    pub fn record_spending(&mut self, amount: Spending) {
        self.total_spending = self.total_spending.add(amount);
        self.touch();

        self.raise_event(DomainEvent::Campaign(CampaignEvent::SpendingRecorded {
            campaign_id: self.id.clone(),
            amount: amount.amount(),
            new_total: self.total_spending.amount(),
        }));
    }

    /// Grow the audience counter as customers are assigned
    pub fn expand_audience(&mut self, added: u64) {
        self.audience_size += added;
        self.touch();

        self.raise_event(DomainEvent::Campaign(CampaignEvent::AudienceExpanded {
            campaign_id: self.id.clone(),
            added,
            new_size: self.audience_size,
        }));
    }

    /// Get and clear accumulated domain events
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    fn raise_event(&mut self, event: DomainEvent) {
        self.events.push(event);
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CampaignError {
    InvalidDateRange,
}

impl std::error::Error for CampaignError {}

impl std::fmt::Display for CampaignError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDateRange => write!(f, "Campaign start date must not be after end date"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_campaign() -> Campaign {
        Campaign::create(
            "Summer Sale",
            "Seasonal discount push",
            date(2024, 6, 1),
            date(2024, 6, 30),
            1200,
            Spending::new(Decimal::new(5000, 0)).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_campaign_creation() {
        let campaign = create_test_campaign();
        assert_eq!(campaign.name(), "Summer Sale");
        assert_eq!(campaign.audience_size(), 1200);
    }

    #[test]
    fn test_campaign_created_event() {
        let mut campaign = create_test_campaign();
        let events = campaign.take_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            DomainEvent::Campaign(CampaignEvent::Created { .. })
        ));
    }

    #[test]
    fn test_rejects_inverted_date_range() {
        let result = Campaign::create(
            "Backwards",
            "",
            date(2024, 7, 1),
            date(2024, 6, 1),
            0,
            Spending::zero(),
        );
        assert!(matches!(result, Err(CampaignError::InvalidDateRange)));
    }

    #[test]
    fn test_single_day_campaign_allowed() {
        let result = Campaign::create(
            "Flash Sale",
            "",
            date(2024, 6, 1),
            date(2024, 6, 1),
            0,
            Spending::zero(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_record_spending() {
        let mut campaign = create_test_campaign();
        campaign.record_spending(Spending::new(Decimal::new(250, 0)).unwrap());
        assert_eq!(campaign.total_spending().amount(), Decimal::new(5250, 0));
    }

    #[test]
    fn test_expand_audience() {
        let mut campaign = create_test_campaign();
        campaign.expand_audience(300);
        assert_eq!(campaign.audience_size(), 1500);
    }
}
