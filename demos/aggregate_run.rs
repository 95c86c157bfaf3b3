use std::error::Error;
use std::fs::{self, File};
use std::io::{self, BufReader, Cursor};
use std::path::PathBuf;

use log::LevelFilter;

use moeastats::aggregate::{aggregate_to_file, SeedInput};
use moeastats::sets::SetReducer;
use moeastats::stats::{AggregateTable, Statistic};

/// Run the whole per-seed pipeline on two tiny seeds of a fictional study: reduce the raw sets
/// files to their objective columns, aggregate the evaluator output with placeholder rows for
/// the empty sets, then summarise the combined table by set index.
///
/// Seed 47's second set is empty (two consecutive boundaries), so the evaluator skipped it; the
/// aggregate keeps both seeds aligned at three rows each.
///
/// `cargo run --example aggregate_run`
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::builder().filter_level(LevelFilter::Info).init();

    // two decision variables, two objectives
    let raw_sets = [
        (
            "Borg_2_2_1.0_47.sets",
            "# NFE 100\n\
             0.11 0.62 1.5 2.5\n\
             0.09 0.70 1.8 2.2\n\
             #\n\
             #\n\
             0.10 0.64 1.2 2.6\n\
             #\n",
        ),
        (
            "Borg_2_2_1.0_48.sets",
            "0.21 0.52 1.6 2.4\n\
             #\n\
             0.20 0.55 1.4 2.7\n\
             #\n\
             0.19 0.58 1.1 2.9\n\
             #\n",
        ),
    ];
    // what the evaluator would print for the non-empty sets of each seed
    let metrics = [
        (
            "hyper_Borg_2_2_1.0_47.sets",
            "Hypervolume GenerationalDistance InvertedGenerationalDistance Spacing \
             EpsilonIndicator MaximumParetoFrontError\n\
             0.51 0.10 0.12 0.20 0.30 0.40\n\
             0.56 0.08 0.10 0.18 0.27 0.36\n",
        ),
        (
            "hyper_Borg_2_2_1.0_48.sets",
            "Hypervolume GenerationalDistance InvertedGenerationalDistance Spacing \
             EpsilonIndicator MaximumParetoFrontError\n\
             0.48 0.12 0.14 0.22 0.33 0.44\n\
             0.52 0.11 0.12 0.20 0.30 0.41\n\
             0.58 0.07 0.09 0.16 0.25 0.33\n",
        ),
    ];

    let work_dir = std::env::temp_dir().join("moeastats_demo");
    fs::create_dir_all(&work_dir)?;

    // strip the decision variables, as would happen before invoking the evaluator
    let reducer = SetReducer::new(2, 2);
    let mut inputs = Vec::new();
    for (&(sets_name, sets_text), &(metrics_name, metrics_text)) in raw_sets.iter().zip(&metrics) {
        let reduced_file = work_dir.join(format!("reduced_{}", sets_name));
        let mut reduced = File::create(&reduced_file)?;
        reducer.reduce(Cursor::new(sets_text), &mut reduced)?;

        let metrics_file = work_dir.join(metrics_name);
        fs::write(&metrics_file, metrics_text)?;
        inputs.push(SeedInput::from_files(reduced_file, metrics_file)?);
    }

    // aggregate both seeds into one gap-filled table
    let aggregate_file: PathBuf = work_dir.join("Borg_2_2_1.0.hv");
    if aggregate_file.exists() {
        fs::remove_file(&aggregate_file)?;
    }
    let report = aggregate_to_file(&aggregate_file, &inputs)?;
    report.save_to_json(&work_dir.join("Borg_2_2_1.0_report.json"))?;

    println!("{}", fs::read_to_string(&aggregate_file)?);

    // summarise each set index across the two seeds
    let table = AggregateTable::read(BufReader::new(File::open(&aggregate_file)?))?;
    let summaries = table.summarise_by_set(&[
        Statistic::Mean,
        Statistic::Quantile(50),
        Statistic::Min,
        Statistic::Max,
    ]);
    let mut stdout = io::stdout();
    for summary in &summaries {
        println!("--- {}", summary.tag);
        summary.write(&mut stdout)?;
    }

    Ok(())
}
