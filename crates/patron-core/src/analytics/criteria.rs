//! Audience Filter Criteria
//!
//! Composes the per-field constraints of the audience-segments screen into a
//! single predicate applied in one pass over the customer dataset. Criteria
//! arrive as raw form text; an empty field means the constraint is off.
//! Compilation parses the numeric fields up front so malformed input fails
//! loudly instead of silently matching nothing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::aggregates::Customer;

/// Direction for the total-spending comparison.
///
/// When the form leaves the direction unset, `Less` applies: the threshold
/// reads as "spending below this amount".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpendingComparison {
    Greater,
    #[default]
    Less,
}

/// Raw per-field audience constraints, combined with logical AND.
///
/// Fields hold the form input verbatim; whitespace-only input is treated as
/// an absent constraint.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring on the customer name
    pub name: String,
    /// Case-insensitive substring on the email address
    pub email: String,
    /// Raw substring on the phone number, no normalization
    pub phone: String,
    /// Spending threshold, compared per `spending_comparison`
    pub total_spending: String,
    pub spending_comparison: SpendingComparison,
    /// Case-insensitive substring on the assigned campaign's name
    pub campaign_name: String,
    /// Assigned campaign's audience size must exceed this
    pub min_audience_size: String,
}

impl FilterCriteria {
    /// True when no constraint is active
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty()
            && self.email.trim().is_empty()
            && self.phone.trim().is_empty()
            && self.total_spending.trim().is_empty()
            && self.campaign_name.trim().is_empty()
            && self.min_audience_size.trim().is_empty()
    }

    /// Parse the criteria into an applicable predicate.
    ///
    /// Malformed numeric input is an error, not an ignored constraint.
    pub fn compile(&self) -> Result<CustomerPredicate, CriteriaError> {
        let spending = match trimmed(&self.total_spending) {
            None => None,
            Some(raw) => {
                let threshold: Decimal =
                    raw.parse().map_err(|_| CriteriaError::InvalidNumber {
                        field: "totalSpending",
                        value: raw.to_string(),
                    })?;
                Some((self.spending_comparison, threshold))
            }
        };

        let min_audience_size = match trimmed(&self.min_audience_size) {
            None => None,
            Some(raw) => Some(raw.parse::<u64>().map_err(|_| CriteriaError::InvalidNumber {
                field: "audienceSize",
                value: raw.to_string(),
            })?),
        };

        Ok(CustomerPredicate {
            name: trimmed(&self.name).map(str::to_lowercase),
            email: trimmed(&self.email).map(str::to_lowercase),
            phone: trimmed(&self.phone).map(str::to_string),
            spending,
            campaign_name: trimmed(&self.campaign_name).map(str::to_lowercase),
            min_audience_size,
        })
    }
}

fn trimmed(raw: &str) -> Option<&str> {
    let raw = raw.trim();
    if raw.is_empty() {
        None
    } else {
        Some(raw)
    }
}

/// Compiled, ready-to-apply form of [`FilterCriteria`]
#[derive(Clone, Debug)]
pub struct CustomerPredicate {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    spending: Option<(SpendingComparison, Decimal)>,
    campaign_name: Option<String>,
    min_audience_size: Option<u64>,
}

impl CustomerPredicate {
    /// Evaluate every active constraint against one customer.
    ///
    /// Campaign-derived constraints fail for customers without a campaign.
    pub fn matches(&self, customer: &Customer) -> bool {
        if let Some(needle) = &self.name {
            if !customer.name().to_lowercase().contains(needle) {
                return false;
            }
        }

        if let Some(needle) = &self.email {
            // Emails are stored lowercased already
            if !customer.email().as_str().contains(needle) {
                return false;
            }
        }

        if let Some(fragment) = &self.phone {
            if !customer.phone().contains_fragment(fragment) {
                return false;
            }
        }

        if let Some((comparison, threshold)) = self.spending {
            let spending = customer.total_spending().amount();
            let hit = match comparison {
                SpendingComparison::Greater => spending > threshold,
                SpendingComparison::Less => spending < threshold,
            };
            if !hit {
                return false;
            }
        }

        if let Some(needle) = &self.campaign_name {
            match customer.campaign() {
                Some(campaign) if campaign.name().to_lowercase().contains(needle) => {}
                _ => return false,
            }
        }

        if let Some(min) = self.min_audience_size {
            match customer.campaign() {
                Some(campaign) if campaign.audience_size() > min => {}
                _ => return false,
            }
        }

        true
    }
}

/// Filter a dataset down to the customers matching every active criterion.
///
/// The result is a stable subsequence: input order is preserved and nothing
/// is re-sorted. An empty dataset yields an empty result.
pub fn filter_customers(
    customers: &[Customer],
    criteria: &FilterCriteria,
) -> Result<Vec<Customer>, CriteriaError> {
    let predicate = criteria.compile()?;
    Ok(customers
        .iter()
        .filter(|c| predicate.matches(c))
        .cloned()
        .collect())
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriteriaError {
    #[error("invalid number for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Email, EntityId, Phone, Spending};
    use crate::domain::aggregates::CampaignRef;
    use chrono::Utc;

    fn customer(name: &str, email: &str, phone: &str, spending: i64) -> Customer {
        Customer::restore(
            EntityId::new(),
            name,
            Email::new(email).unwrap(),
            Phone::new(phone).unwrap(),
            Spending::new(Decimal::new(spending, 0)).unwrap(),
            Utc::now(),
            None,
        )
    }

    fn customer_in_campaign(
        name: &str,
        spending: i64,
        campaign_name: &str,
        audience_size: u64,
    ) -> Customer {
        Customer::restore(
            EntityId::new(),
            name,
            Email::new(&format!("{}@example.com", name.to_lowercase().replace(' ', "."))).unwrap(),
            Phone::new("555-000-1111").unwrap(),
            Spending::new(Decimal::new(spending, 0)).unwrap(),
            Utc::now(),
            Some(CampaignRef::new(EntityId::new(), campaign_name, audience_size)),
        )
    }

    fn names(customers: &[Customer]) -> Vec<&str> {
        customers.iter().map(|c| c.name()).collect()
    }

    fn fixture() -> Vec<Customer> {
        vec![
            customer("Ana Lee", "ana@example.com", "555-123-4567", 100),
            customer("Dana Cruz", "dana@example.com", "555-765-4321", 2500),
            customer("Bob", "bob@example.com", "444-111-2222", 600),
        ]
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        let data = fixture();
        let result = filter_customers(&data, &FilterCriteria::default()).unwrap();
        assert_eq!(names(&result), names(&data));
    }

    #[test]
    fn test_empty_dataset_is_not_an_error() {
        let criteria = FilterCriteria {
            name: "ana".into(),
            ..Default::default()
        };
        let result = filter_customers(&[], &criteria).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_name_substring_is_case_insensitive() {
        let data = fixture();
        let criteria = FilterCriteria {
            name: "ana".into(),
            ..Default::default()
        };
        // "ana" hits both "Ana Lee" and "Dana Cruz"
        let result = filter_customers(&data, &criteria).unwrap();
        assert_eq!(names(&result), vec!["Ana Lee", "Dana Cruz"]);
    }

    #[test]
    fn test_result_preserves_input_order() {
        let data = fixture();
        let criteria = FilterCriteria {
            phone: "555".into(),
            ..Default::default()
        };
        let result = filter_customers(&data, &criteria).unwrap();
        assert_eq!(names(&result), vec!["Ana Lee", "Dana Cruz"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let data = fixture();
        let criteria = FilterCriteria {
            name: "ana".into(),
            total_spending: "3000".into(),
            ..Default::default()
        };
        let once = filter_customers(&data, &criteria).unwrap();
        let twice = filter_customers(&once, &criteria).unwrap();
        assert_eq!(names(&once), names(&twice));
    }

    #[test]
    fn test_spending_default_direction_is_less() {
        let data = fixture();
        let criteria = FilterCriteria {
            total_spending: "700".into(),
            ..Default::default()
        };
        let result = filter_customers(&data, &criteria).unwrap();
        assert_eq!(names(&result), vec!["Ana Lee", "Bob"]);
    }

    #[test]
    fn test_spending_greater_than() {
        let data = fixture();
        let criteria = FilterCriteria {
            total_spending: "700".into(),
            spending_comparison: SpendingComparison::Greater,
            ..Default::default()
        };
        let result = filter_customers(&data, &criteria).unwrap();
        assert_eq!(names(&result), vec!["Dana Cruz"]);
    }

    #[test]
    fn test_criteria_combine_with_and() {
        let data = fixture();
        let criteria = FilterCriteria {
            name: "ana".into(),
            total_spending: "700".into(),
            ..Default::default()
        };
        // "ana" alone matches two customers, the spending cut leaves one
        let result = filter_customers(&data, &criteria).unwrap();
        assert_eq!(names(&result), vec!["Ana Lee"]);
    }

    #[test]
    fn test_campaign_name_substring() {
        let data = vec![
            customer_in_campaign("Ana Lee", 100, "Summer Sale", 1200),
            customer_in_campaign("Bob", 600, "Winter Push", 300),
            customer("Carol", "carol@example.com", "555-222-3333", 50),
        ];
        let criteria = FilterCriteria {
            campaign_name: "summer".into(),
            ..Default::default()
        };
        let result = filter_customers(&data, &criteria).unwrap();
        assert_eq!(names(&result), vec!["Ana Lee"]);
    }

    #[test]
    fn test_audience_size_strictly_greater() {
        let data = vec![
            customer_in_campaign("Ana Lee", 100, "Summer Sale", 1200),
            customer_in_campaign("Bob", 600, "Winter Push", 300),
        ];
        let criteria = FilterCriteria {
            min_audience_size: "300".into(),
            ..Default::default()
        };
        // 300 is not > 300, so only the 1200-person campaign qualifies
        let result = filter_customers(&data, &criteria).unwrap();
        assert_eq!(names(&result), vec!["Ana Lee"]);
    }

    #[test]
    fn test_unassigned_customer_fails_campaign_criteria() {
        let data = vec![customer("Carol", "carol@example.com", "555-222-3333", 50)];
        let criteria = FilterCriteria {
            min_audience_size: "0".into(),
            ..Default::default()
        };
        let result = filter_customers(&data, &criteria).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_malformed_spending_fails_loudly() {
        let criteria = FilterCriteria {
            total_spending: "lots".into(),
            ..Default::default()
        };
        let err = filter_customers(&fixture(), &criteria).unwrap_err();
        assert_eq!(
            err,
            CriteriaError::InvalidNumber {
                field: "totalSpending",
                value: "lots".into(),
            }
        );
    }

    #[test]
    fn test_malformed_audience_size_fails_loudly() {
        let criteria = FilterCriteria {
            min_audience_size: "-3".into(),
            ..Default::default()
        };
        assert!(matches!(
            filter_customers(&fixture(), &criteria),
            Err(CriteriaError::InvalidNumber { field: "audienceSize", .. })
        ));
    }

    #[test]
    fn test_whitespace_only_field_is_inactive() {
        let data = fixture();
        let criteria = FilterCriteria {
            total_spending: "   ".into(),
            ..Default::default()
        };
        assert!(criteria.is_empty());
        let result = filter_customers(&data, &criteria).unwrap();
        assert_eq!(result.len(), data.len());
    }
}
