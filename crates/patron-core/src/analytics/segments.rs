//! Spending Segmentation
//!
//! Partitions the customer dataset into the two dashboard segments by
//! spending thresholds. The thresholds are independent knobs: when
//! low >= high the segments overlap, and when low < high customers between
//! the two fall into neither. Both outcomes are accepted behavior, not
//! defects; the dashboard exposes both sliders separately.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::aggregates::Customer;

pub const LOW_SPENDERS: &str = "Low Spenders";
pub const HIGH_SPENDERS: &str = "High Spenders";

/// The two independent spending cutoffs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentThresholds {
    /// Customers spending at most this land in "Low Spenders"
    pub low: Decimal,
    /// Customers spending strictly more than this land in "High Spenders"
    pub high: Decimal,
}

impl SegmentThresholds {
    pub fn new(low: Decimal, high: Decimal) -> Self {
        Self { low, high }
    }
}

impl Default for SegmentThresholds {
    fn default() -> Self {
        // Dashboard defaults
        Self {
            low: Decimal::from(2000),
            high: Decimal::from(500),
        }
    }
}

/// A derived, named subset of customers. Recomputed from scratch on every
/// dataset refresh; never persisted or mutated in place.
#[derive(Clone, Debug)]
pub struct Segment {
    name: String,
    customers: Vec<Customer>,
}

impl Segment {
    pub fn name(&self) -> &str { &self.name }
    pub fn size(&self) -> usize { self.customers.len() }
    pub fn customers(&self) -> &[Customer] { &self.customers }
}

/// The dashboard's segment pair
#[derive(Clone, Debug)]
pub struct SpendingSegments {
    pub low: Segment,
    pub high: Segment,
}

/// Split a dataset into low and high spenders.
///
/// Membership: low takes `totalSpending <= thresholds.low`, high takes
/// `totalSpending > thresholds.high`. Each segment preserves dataset order.
pub fn segment_by_spending(
    customers: &[Customer],
    thresholds: SegmentThresholds,
) -> SpendingSegments {
    let low = customers
        .iter()
        .filter(|c| c.total_spending().amount() <= thresholds.low)
        .cloned()
        .collect();

    let high = customers
        .iter()
        .filter(|c| c.total_spending().amount() > thresholds.high)
        .cloned()
        .collect();

    SpendingSegments {
        low: Segment {
            name: LOW_SPENDERS.to_string(),
            customers: low,
        },
        high: Segment {
            name: HIGH_SPENDERS.to_string(),
            customers: high,
        },
    }
}
