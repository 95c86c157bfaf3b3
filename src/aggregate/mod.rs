pub use pipeline::{
    aggregate_seeds, aggregate_to_file, seed_from_path, AggregationReport, SeedInput, SeedReport,
};
pub use seed::{append_seed, AppendOutcome};

mod pipeline;
mod seed;
