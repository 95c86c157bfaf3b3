use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::aggregate::seed::append_seed;
use crate::core::{MError, AGGREGATE_HEADER};
use crate::sets::SetScanner;

/// The input files for one seed of an aggregation run.
#[derive(Debug, Clone)]
pub struct SeedInput {
    /// The seed identifier written on every output row.
    pub seed: String,
    /// The (reduced) sets file scanned for empty sets.
    pub sets_file: PathBuf,
    /// The evaluator output for this seed.
    pub metrics_file: PathBuf,
}

impl SeedInput {
    /// Build an input by recovering the seed identifier from the sets file name.
    pub fn from_files(sets_file: PathBuf, metrics_file: PathBuf) -> Result<Self, MError> {
        let seed = seed_from_path(&sets_file).ok_or_else(|| {
            MError::Generic(format!(
                "Cannot recover a seed identifier from {:?}",
                sets_file
            ))
        })?;
        Ok(SeedInput {
            seed,
            sets_file,
            metrics_file,
        })
    }
}

/// Recover the seed identifier from a sets file name: the last `_`-separated component of the
/// name, up to the first `.` (`Borg_27_10_1.0_47.sets` gives `47`).
pub fn seed_from_path(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let last = name.rsplit('_').next()?;
    let seed = last.split('.').next()?;
    if seed.is_empty() {
        None
    } else {
        Some(seed.to_string())
    }
}

/// Per-seed counters collected while aggregating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedReport {
    pub seed: String,
    /// Sets found in the seed's sets file, empty ones included.
    pub total_sets: usize,
    /// Empty sets found by the scanner.
    pub empty_sets: usize,
    /// Rows written to the aggregate stream for this seed.
    pub rows_written: usize,
    /// Empty sets past the last evaluator row, which the merge never reaches.
    pub unreached_empties: usize,
}

/// The outcome of an aggregation run over all seeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationReport {
    pub seeds: Vec<SeedReport>,
    pub exported_on: DateTime<Utc>,
}

impl AggregationReport {
    /// Total rows written across all seeds, header excluded.
    pub fn rows_written(&self) -> usize {
        self.seeds.iter().map(|seed| seed.rows_written).sum()
    }

    /// Save the report to a JSON file. This returns an error if the file cannot be saved.
    ///
    /// # Arguments
    ///
    /// * `destination`: The path to the JSON file.
    ///
    /// return `Result<(), MError>`
    pub fn save_to_json(&self, destination: &Path) -> Result<(), MError> {
        let data = serde_json::to_string_pretty(self).map_err(|e| {
            MError::Generic(format!(
                "The following error occurred while converting the report struct: {e}"
            ))
        })?;
        info!("Saving JSON file {:?}", destination);
        fs::write(destination, data)
            .map_err(|e| MError::Write(format!("{:?}", destination), e.to_string()))?;
        Ok(())
    }
}

/// Aggregate the metrics of several seeds into one stream. The header is written first; seeds
/// are then processed strictly in turn, each one's files opened, consumed to the end and
/// dropped before the next seed starts. Disagreements between a seed's scanned set count and
/// the rows actually written are logged as warnings, never raised as errors.
///
/// # Arguments
///
/// * `output`: The aggregate sink.
/// * `inputs`: The per-seed input files, in the order the seeds should appear.
///
/// returns: `Result<AggregationReport, MError>`
pub fn aggregate_seeds<W: Write>(
    output: &mut W,
    inputs: &[SeedInput],
) -> Result<AggregationReport, MError> {
    let scanner = SetScanner::new();
    writeln!(output, "{}", AGGREGATE_HEADER)
        .map_err(|e| MError::Write("the aggregate stream".to_string(), e.to_string()))?;

    let mut seeds = Vec::with_capacity(inputs.len());
    for input in inputs {
        info!("Scanning {:?} for empty sets", input.sets_file);
        let sets_file = File::open(&input.sets_file)
            .map_err(|e| MError::Read(format!("{:?}", input.sets_file), e.to_string()))?;
        let scan = scanner.scan(BufReader::new(sets_file))?;
        if !scan.empty_sets.is_empty() {
            info!(
                "Seed {} has {} empty sets out of {}",
                input.seed,
                scan.empty_sets.len(),
                scan.total_sets
            );
        }

        info!("Appending seed {} from {:?}", input.seed, input.metrics_file);
        let metrics_file = File::open(&input.metrics_file)
            .map_err(|e| MError::Read(format!("{:?}", input.metrics_file), e.to_string()))?;
        let outcome = append_seed(
            output,
            BufReader::new(metrics_file),
            &input.seed,
            &scan.empty_sets,
        )?;

        if outcome.rows_written() != scan.total_sets {
            warn!(
                "Seed {} wrote {} rows but its sets file holds {} sets",
                input.seed,
                outcome.rows_written(),
                scan.total_sets
            );
        }
        if outcome.unreached_empties > 0 {
            warn!(
                "Seed {} has {} empty sets past the last evaluator row; no placeholder was \
                written for them",
                input.seed, outcome.unreached_empties
            );
        }

        seeds.push(SeedReport {
            seed: input.seed.clone(),
            total_sets: scan.total_sets,
            empty_sets: scan.empty_sets.len(),
            rows_written: outcome.rows_written(),
            unreached_empties: outcome.unreached_empties,
        });
    }

    Ok(AggregationReport {
        seeds,
        exported_on: Utc::now(),
    })
}

/// Aggregate seeds into a new file. This refuses to overwrite an existing aggregate; delete the
/// file first to redo a run.
///
/// # Arguments
///
/// * `destination`: The path of the aggregate file to create.
/// * `inputs`: The per-seed input files.
///
/// returns: `Result<AggregationReport, MError>`
pub fn aggregate_to_file(
    destination: &Path,
    inputs: &[SeedInput],
) -> Result<AggregationReport, MError> {
    if destination.exists() {
        return Err(MError::ExistingFile(destination.display().to_string()));
    }
    let file = File::create(destination)
        .map_err(|e| MError::Write(format!("{:?}", destination), e.to_string()))?;
    let mut output = BufWriter::new(file);
    let report = aggregate_seeds(&mut output, inputs)?;
    output
        .flush()
        .map_err(|e| MError::Write(format!("{:?}", destination), e.to_string()))?;
    Ok(report)
}

#[cfg(test)]
mod test {
    use std::fs;
    use std::path::{Path, PathBuf};

    use crate::aggregate::pipeline::{aggregate_seeds, aggregate_to_file, seed_from_path, SeedInput};
    use crate::core::AGGREGATE_HEADER;

    fn fixture_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join("moeastats_tests")
            .join(format!("{}_{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_seed_files(dir: &Path, seed: &str, sets: &str, metrics: &str) -> SeedInput {
        let sets_file = dir.join(format!("Borg_27_10_1.0_{}.sets", seed));
        let metrics_file = dir.join(format!("hyper_Borg_27_10_1.0_{}.sets", seed));
        fs::write(&sets_file, sets).unwrap();
        fs::write(&metrics_file, metrics).unwrap();
        SeedInput::from_files(sets_file, metrics_file).unwrap()
    }

    #[test]
    fn test_seed_from_path() {
        assert_eq!(
            seed_from_path(Path::new("/tmp/sets/Borg_27_10_1.0_47.sets")).unwrap(),
            "47"
        );
        assert_eq!(seed_from_path(Path::new("12.sets")).unwrap(), "12");
        assert!(seed_from_path(Path::new("/tmp/")).is_none());
    }

    #[test]
    fn test_aggregate_two_seeds() {
        let dir = fixture_dir("two_seeds");
        let metrics_header = "Hypervolume GenerationalDistance InvertedGenerationalDistance \
            Spacing EpsilonIndicator MaximumParetoFrontError";
        let first = write_seed_files(
            &dir,
            "1",
            "1 2\n#\n#\n3 4\n#\n",
            &format!("{}\n0.5 0.1 0.1 0.2 0.3 0.4\n0.9 0.0 0.0 0.1 0.2 0.3\n", metrics_header),
        );
        let second = write_seed_files(
            &dir,
            "2",
            "1 2\n#\n3 4\n#\n5 6\n#\n",
            &format!(
                "{}\n0.1 0.2 0.2 0.1 0.4 0.5\n0.2 0.1 0.1 0.1 0.3 0.4\n0.3 0.1 0.1 0.0 0.2 0.3\n",
                metrics_header
            ),
        );

        let mut output = Vec::new();
        let report = aggregate_seeds(&mut output, &[first, second]).unwrap();
        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], AGGREGATE_HEADER);
        assert_eq!(lines[1], "1 0 0.5 0.1 0.1 0.2 0.3 0.4");
        assert_eq!(lines[2], "1 1 0.0 Inf Inf 0.0 Inf Inf");
        assert_eq!(lines[3], "1 2 0.9 0.0 0.0 0.1 0.2 0.3");
        assert_eq!(lines[4], "2 0 0.1 0.2 0.2 0.1 0.4 0.5");
        assert_eq!(lines.len(), 7);

        // both seeds are index-aligned: one row per set
        assert_eq!(report.seeds[0].total_sets, 3);
        assert_eq!(report.seeds[0].rows_written, 3);
        assert_eq!(report.seeds[0].empty_sets, 1);
        assert_eq!(report.seeds[1].rows_written, 3);
        assert_eq!(report.rows_written(), 6);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_short_metrics_stream_is_reported_not_raised() {
        let dir = fixture_dir("short_metrics");
        let input = write_seed_files(
            &dir,
            "4",
            "1 2\n#\n3 4\n#\n#\n",
            "Hypervolume GenerationalDistance InvertedGenerationalDistance Spacing \
             EpsilonIndicator MaximumParetoFrontError\n0.5 0.1 0.1 0.2 0.3 0.4\n",
        );
        let mut output = Vec::new();
        let report = aggregate_seeds(&mut output, &[input]).unwrap();
        assert_eq!(report.seeds[0].total_sets, 3);
        assert_eq!(report.seeds[0].rows_written, 1);
        assert_eq!(report.seeds[0].unreached_empties, 1);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_refuses_to_clobber() {
        let dir = fixture_dir("clobber");
        let destination = dir.join("combined.hv");
        fs::write(&destination, "already here\n").unwrap();
        let err = aggregate_to_file(&destination, &[]).unwrap_err();
        assert!(err.to_string().contains("specify explicitly to clobber"));
        fs::remove_dir_all(&dir).unwrap();
    }
}
