use crate::core::MError;

/// Names of the quality metrics reported by the external evaluator, in the column order it
/// prints them.
pub static METRIC_NAMES: [&str; 6] = [
    "Hypervolume",
    "GenerationalDistance",
    "InvertedGenerationalDistance",
    "Spacing",
    "EpsilonIndicator",
    "MaximumParetoFrontError",
];

/// Header line of an aggregate metrics file. Every data row carries the seed identifier and the
/// 0-based solution-set index, then the six metric values.
pub static AGGREGATE_HEADER: &str = "Seed Set Hypervolume GenerationalDistance \
    InvertedGenerationalDistance Spacing EpsilonIndicator MaximumParetoFrontError";

/// Metric values written in place of a solution set with no solutions. An empty set covers no
/// hypervolume and lies infinitely far from the reference set, so it compares as maximally bad
/// on every metric. The infinities propagate predictably through min/max/quantile statistics but
/// poison mean and variance; this is a documented trade-off of the study design.
pub static EMPTY_SET_METRICS: &str = "0.0 Inf Inf 0.0 Inf Inf";

/// Find the position of a metric column in a space-separated header line.
///
/// # Arguments
///
/// * `header`: The header line to search.
/// * `name`: The metric name to look for.
///
/// returns: `Result<usize, MError>` The 0-based column index, or an error when the header has no
/// column with that name.
pub fn metric_column(header: &str, name: &str) -> Result<usize, MError> {
    header
        .split_whitespace()
        .position(|field| field == name)
        .ok_or_else(|| MError::NonExistingMetric(name.to_string(), header.trim().to_string()))
}
