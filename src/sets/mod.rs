pub use classify::{LineClassifier, LineKind};
pub use extremes::{scan_extremes, ObjectiveExtremes};
pub use reduce::SetReducer;
pub use scan::{SetScan, SetScanner};

mod classify;
mod extremes;
mod reduce;
mod scan;
