pub use error::MError;
pub use metrics::{metric_column, AGGREGATE_HEADER, EMPTY_SET_METRICS, METRIC_NAMES};

mod error;
mod metrics;
