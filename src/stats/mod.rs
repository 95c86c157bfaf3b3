pub use parameters::{read_parameters, Parameter, ParameterSamples};
pub use statistic::{maximum, mean, minimum, quantile, sample_variance, Statistic};
pub use table::{AggregateRow, AggregateTable, SummaryRow, SummaryTable};

mod parameters;
mod statistic;
mod table;
