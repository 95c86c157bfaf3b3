use serde::{Deserialize, Serialize};

use crate::core::MError;

/// Arithmetic mean. This returns `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance with the `n - 1` denominator. This returns `NaN` when there are fewer than
/// two values.
pub fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let centre = mean(values);
    values.iter().map(|value| (value - centre).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

/// Smallest value, `NaN` for an empty slice.
pub fn minimum(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NAN, f64::min)
}

/// Largest value, `NaN` for an empty slice.
pub fn maximum(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NAN, f64::max)
}

/// Quantile with linear interpolation between order statistics. `fraction` is in `[0, 1]`.
pub fn quantile(values: &[f64], fraction: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let position = fraction * (sorted.len() - 1) as f64;
    let below = position.floor() as usize;
    let above = position.ceil() as usize;
    if below == above {
        return sorted[below];
    }
    let weight = position - below as f64;
    sorted[below] + (sorted[above] - sorted[below]) * weight
}

/// A summary statistic over one group of metric values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statistic {
    Mean,
    Variance,
    Min,
    Max,
    /// Interpolated quantile at the given percent, 0 to 100. `Quantile(0)` is the minimum and
    /// `Quantile(100)` the maximum.
    Quantile(u8),
}

impl Statistic {
    /// Parse a statistic from its name: `mean`, `variance`, `min`, `max` or `qNN` with one or
    /// two digits (plus `q100`).
    pub fn from_name(name: &str) -> Result<Self, MError> {
        match name {
            "mean" => return Ok(Statistic::Mean),
            "variance" => return Ok(Statistic::Variance),
            "min" => return Ok(Statistic::Min),
            "max" => return Ok(Statistic::Max),
            "q100" => return Ok(Statistic::Quantile(100)),
            _ => (),
        }
        if let Some(digits) = name.strip_prefix('q') {
            let plausible = (1..=2).contains(&digits.len())
                && digits.chars().all(|c| c.is_ascii_digit());
            if plausible {
                if let Ok(percent) = digits.parse::<u8>() {
                    return Ok(Statistic::Quantile(percent));
                }
            }
        }
        Err(MError::InvalidStatistic(name.to_string()))
    }

    /// The name of the statistic, as used in summary-file tags.
    pub fn name(&self) -> String {
        match self {
            Statistic::Mean => "mean".to_string(),
            Statistic::Variance => "variance".to_string(),
            Statistic::Min => "min".to_string(),
            Statistic::Max => "max".to_string(),
            Statistic::Quantile(percent) => format!("q{}", percent),
        }
    }

    /// Compute the statistic over a group of values. Infinities from empty-set placeholders
    /// propagate untouched: they pin min/max/quantile and poison mean/variance.
    pub fn compute(&self, values: &[f64]) -> f64 {
        match self {
            Statistic::Mean => mean(values),
            Statistic::Variance => sample_variance(values),
            Statistic::Min | Statistic::Quantile(0) => minimum(values),
            Statistic::Max | Statistic::Quantile(100) => maximum(values),
            Statistic::Quantile(percent) => quantile(values, f64::from(*percent) / 100.0),
        }
    }
}
