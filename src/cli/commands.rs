// ============================================================
// Layer 1 — CLI Arguments
// ============================================================
// All flags of the `mol-loader` command.
//
// clap's derive macros generate --help text, error messages
// for missing/invalid values, and string → number conversion.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::Args;
use std::path::PathBuf;

use crate::application::iterate_use_case::IterateConfig;
use crate::data::dataset::{DatasetConfig, DEFAULT_MAX_NUM_ATOMS};

#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Directory containing .sdf structure files (scanned non-recursively)
    #[arg(long)]
    pub data_dir: PathBuf,

    /// Worker threads used by the data loader; 0 loads on the main thread
    #[arg(long, default_value_t = 0)]
    pub num_workers: usize,

    /// Molecules per batch
    #[arg(long, default_value_t = 1)]
    pub batch_size: usize,

    /// Standard deviation of Gaussian noise added to every coordinate
    #[arg(long, default_value_t = 0.0)]
    pub coord_jitter_std: f64,

    /// Every molecule is zero-padded to this many atoms
    #[arg(long, default_value_t = DEFAULT_MAX_NUM_ATOMS)]
    pub max_num_atoms: usize,

    /// Total batches to print, cycling over the dataset as needed
    #[arg(long, default_value_t = 100)]
    pub num_batches: usize,

    /// Shuffle seed
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Iterate in directory order instead of shuffling
    #[arg(long)]
    pub no_shuffle: bool,

    /// Keep the short trailing batch of each epoch
    #[arg(long)]
    pub keep_last: bool,

    /// Parse each file once and keep it in memory
    #[arg(long)]
    pub cache_parsed: bool,
}

/// The application layer never sees clap types.
impl From<LoadArgs> for IterateConfig {
    fn from(a: LoadArgs) -> Self {
        let dataset = DatasetConfig::new(a.data_dir, a.coord_jitter_std)
            .with_max_num_atoms(a.max_num_atoms)
            .with_cache_parsed(a.cache_parsed);

        IterateConfig {
            dataset,
            batch_size:  a.batch_size,
            num_workers: a.num_workers,
            shuffle:     !a.no_shuffle,
            seed:        a.seed,
            drop_last:   !a.keep_last,
            num_batches: a.num_batches,
        }
    }
}
