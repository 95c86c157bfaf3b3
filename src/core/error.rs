use thiserror::Error;

#[derive(Error, Debug)]
/// Errors raised by the library.
pub enum MError {
    #[error("The following error occurred: {0}")]
    Generic(String),
    #[error("Unknown line format '{0}'")]
    LineFormat(String),
    #[error("The data row '{0}' has {1} fields but {2} are required")]
    ShortDataRow(String, usize, usize),
    #[error("{0} exists, specify explicitly to clobber")]
    ExistingFile(String),
    #[error("No metric {0} in '{1}'")]
    NonExistingMetric(String, String),
    #[error("The {0} named '{1}' does not exist")]
    NonExistingName(String, String),
    #[error("The {0} index {1} does not exist")]
    NonExistingIndex(String, usize),
    #[error("The header '{0}' must start with '{1}'")]
    WrongHeader(String, String),
    #[error("Invalid statistic {0}")]
    InvalidStatistic(String),
    #[error("Cannot parse '{0}' as a {1}")]
    Parse(String, String),
    #[error("The report entry '{0}' appears before any effects section")]
    OrphanEntry(String),
    #[error("Cannot merge extremes over {0} objectives with extremes over {1} objectives")]
    ExtremesMismatch(usize, usize),
    #[error("An error occurred while reading {0}: {1}")]
    Read(String, String),
    #[error("An error occurred while writing {0}: {1}")]
    Write(String, String),
}
