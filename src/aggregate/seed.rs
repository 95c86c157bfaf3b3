use std::io::{BufRead, Write};

use crate::core::{MError, EMPTY_SET_METRICS};

/// Counters describing one seed's pass through [`append_seed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppendOutcome {
    /// Metrics rows copied from the evaluator stream.
    pub real_rows: usize,
    /// Placeholder rows written for empty sets.
    pub placeholder_rows: usize,
    /// Empty-set indices at or beyond the index reached when the evaluator stream ran out.
    /// The merge is driven by the evaluator stream, so trailing empty sets are never flushed;
    /// this count lets a caller surface that instead of truncating silently.
    pub unreached_empties: usize,
}

impl AppendOutcome {
    /// Total rows written for the seed, placeholders included.
    pub fn rows_written(&self) -> usize {
        self.real_rows + self.placeholder_rows
    }
}

/// Append one seed's metrics to an aggregate stream, re-inserting placeholder rows for the sets
/// the external evaluator skipped.
///
/// The evaluator prints one metrics row per *non-empty* set, after a header line. Walking its
/// rows in order while catching up on the empty-set indices found by the scanner yields one
/// output row per set index, each prefixed with the seed identifier and the index. Metric text
/// is passed through verbatim; no validation is performed here. If the evaluator stream yields
/// fewer rows than the scan implies, the merge stops early without error.
///
/// # Arguments
///
/// * `output`: The aggregate sink. The header is the caller's responsibility.
/// * `metrics`: The evaluator output stream for this seed.
/// * `seed`: The seed identifier to prefix on every row.
/// * `empty_sets`: The seed's empty-set indices, as found by [`crate::sets::SetScanner`].
///
/// returns: `Result<AppendOutcome, MError>`
pub fn append_seed<R: BufRead, W: Write>(
    output: &mut W,
    metrics: R,
    seed: &str,
    empty_sets: &[usize],
) -> Result<AppendOutcome, MError> {
    let read_err = |e: std::io::Error| MError::Read("the metrics stream".to_string(), e.to_string());
    let write_err =
        |e: std::io::Error| MError::Write("the aggregate stream".to_string(), e.to_string());

    let mut lines = metrics.lines();
    // discard the evaluator's header
    if let Some(header) = lines.next() {
        header.map_err(read_err)?;
    }

    let mut outcome = AppendOutcome::default();
    let mut counter: usize = 0;
    for line in lines {
        let line = line.map_err(read_err)?;
        while empty_sets.contains(&counter) {
            writeln!(output, "{} {} {}", seed, counter, EMPTY_SET_METRICS).map_err(write_err)?;
            outcome.placeholder_rows += 1;
            counter += 1;
        }
        writeln!(output, "{} {} {}", seed, counter, line).map_err(write_err)?;
        outcome.real_rows += 1;
        counter += 1;
    }

    outcome.unreached_empties = empty_sets.iter().filter(|&&index| index >= counter).count();
    Ok(outcome)
}
