//! Aggregation / Chart-Series Builder
//!
//! Pure reductions over an already-fetched dataset: scalar totals and
//! averages for the overview cards, and labeled (label, value) series the
//! chart widgets consume directly. Nothing here mutates its input; every
//! call returns freshly built output and is deterministic for a given
//! dataset.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analytics::segments::Segment;
use crate::domain::aggregates::{Campaign, Customer};

/// One chart datum: a label drawn from a display field, a numeric value
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: Decimal,
}

/// An entity that can feed a chart series: a label plus a choice of
/// numeric fields.
pub trait SeriesSource {
    type Field: Copy;

    fn series_label(&self) -> &str;
    fn series_value(&self, field: Self::Field) -> Decimal;
}

/// Numeric fields a customer contributes to charts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CustomerField {
    TotalSpending,
}

impl SeriesSource for Customer {
    type Field = CustomerField;

    fn series_label(&self) -> &str {
        self.name()
    }

    fn series_value(&self, field: CustomerField) -> Decimal {
        match field {
            CustomerField::TotalSpending => self.total_spending().amount(),
        }
    }
}

/// Numeric fields a campaign contributes to charts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CampaignField {
    AudienceSize,
    TotalSpending,
}

impl SeriesSource for Campaign {
    type Field = CampaignField;

    fn series_label(&self) -> &str {
        self.name()
    }

    fn series_value(&self, field: CampaignField) -> Decimal {
        match field {
            CampaignField::AudienceSize => Decimal::from(self.audience_size()),
            CampaignField::TotalSpending => self.total_spending().amount(),
        }
    }
}

/// Sum a numeric field across the dataset, rounded to two decimal places
/// for currency display. An empty dataset sums to zero.
pub fn aggregate_total<S: SeriesSource>(items: &[S], field: S::Field) -> Decimal {
    items
        .iter()
        .map(|item| item.series_value(field))
        .sum::<Decimal>()
        .round_dp(2)
}

/// Arithmetic mean of a numeric field, defined as zero for an empty
/// dataset so the overview cards never divide by zero.
pub fn average_of<S: SeriesSource>(items: &[S], field: S::Field) -> Decimal {
    if items.is_empty() {
        return Decimal::ZERO;
    }

    let sum: Decimal = items.iter().map(|item| item.series_value(field)).sum();
    sum / Decimal::from(items.len() as u64)
}

/// Build a labeled series, one point per entity, preserving dataset order.
pub fn build_series<S: SeriesSource>(items: &[S], field: S::Field) -> Vec<SeriesPoint> {
    items
        .iter()
        .map(|item| SeriesPoint {
            label: item.series_label().to_string(),
            value: item.series_value(field),
        })
        .collect()
}

/// Series for the audience-segments pie chart: segment name against
/// member count.
pub fn segment_size_series(segments: &[Segment]) -> Vec<SeriesPoint> {
    segments
        .iter()
        .map(|segment| SeriesPoint {
            label: segment.name().to_string(),
            value: Decimal::from(segment.size() as u64),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::segments::{segment_by_spending, SegmentThresholds};
    use crate::domain::value_objects::{Email, EntityId, Phone, Spending};
    use chrono::{NaiveDate, Utc};

    fn customer(name: &str, spending: Decimal) -> Customer {
        Customer::restore(
            EntityId::new(),
            name,
            Email::new(&format!("{}@example.com", name.to_lowercase())).unwrap(),
            Phone::new("555-000-1111").unwrap(),
            Spending::new(spending).unwrap(),
            Utc::now(),
            None,
        )
    }

    fn campaign(name: &str, audience: u64, spending: i64) -> Campaign {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        Campaign::create(
            name,
            "",
            start,
            end,
            audience,
            Spending::new(Decimal::new(spending, 0)).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_aggregate_total_sums_fractional_amounts() {
        // [100, 50.5] sums to 150.5
        let data = vec![
            customer("a", Decimal::new(100, 0)),
            customer("b", Decimal::new(505, 1)),
        ];
        assert_eq!(
            aggregate_total(&data, CustomerField::TotalSpending),
            Decimal::new(1505, 1)
        );
    }

    #[test]
    fn test_aggregate_total_empty_is_zero() {
        let data: Vec<Customer> = vec![];
        assert_eq!(
            aggregate_total(&data, CustomerField::TotalSpending),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_aggregate_total_rounds_to_cents() {
        let data = vec![
            customer("a", Decimal::new(10333, 3)), // 10.333
            customer("b", Decimal::new(10333, 3)),
        ];
        assert_eq!(
            aggregate_total(&data, CustomerField::TotalSpending),
            Decimal::new(2067, 2) // 20.67
        );
    }

    #[test]
    fn test_average_of_empty_is_zero() {
        let campaigns: Vec<Campaign> = vec![];
        assert_eq!(
            average_of(&campaigns, CampaignField::AudienceSize),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_average_of_audience_size() {
        let campaigns = vec![campaign("a", 100, 0), campaign("b", 300, 0)];
        assert_eq!(
            average_of(&campaigns, CampaignField::AudienceSize),
            Decimal::from(200)
        );
    }

    #[test]
    fn test_build_series_length_and_order() {
        let data = vec![
            customer("Ana Lee", Decimal::new(100, 0)),
            customer("Dana Cruz", Decimal::new(2500, 0)),
            customer("Bob", Decimal::new(600, 0)),
        ];
        let series = build_series(&data, CustomerField::TotalSpending);

        assert_eq!(series.len(), data.len());
        let labels: Vec<&str> = series.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Ana Lee", "Dana Cruz", "Bob"]);
        assert_eq!(series[1].value, Decimal::from(2500));
    }

    #[test]
    fn test_campaign_budget_series() {
        let campaigns = vec![campaign("Summer Sale", 1200, 5000), campaign("Winter Push", 300, 750)];
        let series = build_series(&campaigns, CampaignField::TotalSpending);

        assert_eq!(series[0].label, "Summer Sale");
        assert_eq!(series[0].value, Decimal::from(5000));
        assert_eq!(series[1].value, Decimal::from(750));
    }

    #[test]
    fn test_segment_size_series() {
        let data = vec![
            customer("a", Decimal::from(100)),
            customer("b", Decimal::from(2500)),
            customer("c", Decimal::from(600)),
        ];
        let segments = segment_by_spending(&data, SegmentThresholds::default());
        let series = segment_size_series(&[segments.low, segments.high]);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "Low Spenders");
        assert_eq!(series[0].value, Decimal::from(2));
        assert_eq!(series[1].label, "High Spenders");
        assert_eq!(series[1].value, Decimal::from(2));
    }

    #[test]
    fn test_build_series_does_not_mutate_input() {
        let data = vec![customer("Ana Lee", Decimal::from(100))];
        let before: Vec<Decimal> = data.iter().map(|c| c.total_spending().amount()).collect();

        let _ = build_series(&data, CustomerField::TotalSpending);
        let _ = aggregate_total(&data, CustomerField::TotalSpending);

        let after: Vec<Decimal> = data.iter().map(|c| c.total_spending().amount()).collect();
        assert_eq!(before, after);
    }
}
