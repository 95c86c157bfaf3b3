use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::core::MError;
use crate::sets::classify::{LineClassifier, LineKind};

/// The result of scanning one solution-sets stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScan {
    /// The 0-based indices of the sets that contain no solution rows, in increasing order. The
    /// external evaluator prints no metrics row for these sets, so the aggregation step must
    /// re-insert a placeholder at each of these indices to keep seeds index-aligned.
    pub empty_sets: Vec<usize>,
    /// The total number of set boundaries crossed, empty sets included.
    pub total_sets: usize,
}

/// Scanner that finds empty solution sets in a sets stream.
///
/// A sets file holds blocks of solution rows separated by `#` boundary lines. Two boundaries
/// with no solution row between them denote a set that converged to nothing; the evaluator
/// silently skips such sets, which would desynchronise set indices across seeds if they were
/// not tracked. The scan is a single forward pass: separator lines increment the set counter
/// once scanning has started (a banner or separator before the first solution row is preamble,
/// not a set), and a separator directly following another separator flags the current counter
/// value as an empty set.
pub struct SetScanner {
    classifier: LineClassifier,
}

impl SetScanner {
    pub fn new() -> Self {
        SetScanner {
            classifier: LineClassifier::new(),
        }
    }

    /// Scan a sets stream for empty sets. The full stream is consumed; a line matching no known
    /// class aborts the scan with no partial result.
    ///
    /// # Arguments
    ///
    /// * `stream`: The sets stream to scan.
    ///
    /// returns: `Result<SetScan, MError>` The empty-set indices and the total set count.
    pub fn scan<R: BufRead>(&self, stream: R) -> Result<SetScan, MError> {
        let mut empty_sets = Vec::new();
        let mut counter: usize = 0;
        let mut started = false;
        let mut separator_last = false;

        for line in stream.lines() {
            let line =
                line.map_err(|e| MError::Read("the sets stream".to_string(), e.to_string()))?;
            match self.classifier.classify(&line)? {
                LineKind::Separator => {
                    if started {
                        if separator_last {
                            empty_sets.push(counter);
                        }
                        counter += 1;
                        separator_last = true;
                    }
                }
                LineKind::Data => {
                    started = true;
                    separator_last = false;
                }
                LineKind::Informational | LineKind::Blank => (),
            }
        }

        Ok(SetScan {
            empty_sets,
            total_sets: counter,
        })
    }
}

impl Default for SetScanner {
    fn default() -> Self {
        Self::new()
    }
}
