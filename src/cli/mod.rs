// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap, hands a config to Layer 2, and prints what comes back.
// All the actual loading is delegated to the application layer.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use commands::LoadArgs;

use crate::application::iterate_use_case::{IterateConfig, IterateUseCase};

#[derive(Parser, Debug)]
#[command(
    name = "mol-loader",
    version,
    about = "Load .sdf molecules from a directory, pad them, and print batch shapes."
)]
pub struct Cli {
    #[command(flatten)]
    pub args: LoadArgs,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let config: IterateConfig = self.args.into();

        let rendered = serde_json::to_string_pretty(&config)
            .context("cannot render configuration")?;
        println!("Configuration:\n{rendered}");

        let use_case = IterateUseCase::new(config);
        let summary  = use_case.execute(|i, batch| {
            println!(
                "batch {:>3}: atomic_numbers={:?} positions={:?}",
                i,
                batch.atomic_numbers.dims(),
                batch.positions.dims(),
            );
        })?;

        println!(
            "Done: {} batches from {} molecules over {} epoch(s).",
            summary.batches, summary.dataset_len, summary.epochs
        );
        Ok(())
    }
}
