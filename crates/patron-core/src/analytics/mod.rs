//! Analytics layer
//!
//! The synchronous filtering/segmentation/aggregation pipeline: pure
//! transformations over datasets the client has already fetched. Runs in a
//! single O(n) pass per operation, holds no state, performs no I/O.

pub mod criteria;
pub mod segments;
pub mod series;

pub use criteria::{
    filter_customers, CriteriaError, CustomerPredicate, FilterCriteria, SpendingComparison,
};
pub use segments::{
    segment_by_spending, Segment, SegmentThresholds, SpendingSegments, HIGH_SPENDERS,
    LOW_SPENDERS,
};
pub use series::{
    aggregate_total, average_of, build_series, segment_size_series, CampaignField,
    CustomerField, SeriesPoint, SeriesSource,
};
