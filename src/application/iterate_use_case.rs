// ============================================================
// Layer 2 — IterateUseCase
// ============================================================
// Orchestrates the demo pipeline in order:
//
//   Step 1: Build the molecule dataset    (Layer 4 - data)
//   Step 2: Build Burn's DataLoader       (Layer 4 - batcher)
//   Step 3: Cycle batches epoch by epoch  (here)
//           until num_batches have been visited
//
// With num_workers > 0 Burn splits the dataset between worker
// threads and each one flushes its own short tail batch. In
// that mode the workers only fetch items and this layer
// regroups the merged stream into batch_size chunks, so an
// epoch has at most one short batch:
//
//   worker 0 ─┐
//   worker 1 ─┼─► items ─► chunks of batch_size ─► MoleculeBatcher
//   worker N ─┘
//
// Cycling over a loader that yields nothing (empty directory,
// or every batch dropped by drop_last) stops after the first
// empty epoch with a warning instead of spinning forever.
//
// Reference: Burn Book §4 (DataLoader)

use anyhow::{Context, Result};
use burn::{
    data::dataloader::{batcher::Batcher, DataLoader, DataLoaderBuilder},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::data::{
    batcher::{BatchResult, ItemBatcher, MoleculeBatch, MoleculeBatcher},
    dataset::{DatasetConfig, MoleculeDataset, MoleculeItem},
};
use crate::domain::error::DatasetError;

/// CPU backend used by the command line tool
pub type LoadBackend = burn::backend::NdArray;

// ─── Iteration Configuration ─────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterateConfig {
    #[serde(flatten)]
    pub dataset: DatasetConfig,

    pub batch_size: usize,

    /// 0 = load on the calling thread
    pub num_workers: usize,

    pub shuffle: bool,
    pub seed:    u64,

    /// Skip the trailing batch of each epoch if it is short
    pub drop_last: bool,

    /// How many batches to visit in total, cycling epochs as needed
    pub num_batches: usize,
}

impl Default for IterateConfig {
    fn default() -> Self {
        Self {
            dataset:     DatasetConfig::new("data", 0.0),
            batch_size:  1,
            num_workers: 0,
            shuffle:     true,
            seed:        42,
            drop_last:   true,
            num_batches: 100,
        }
    }
}

/// What a run did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IterateSummary {
    pub dataset_len: usize,
    pub batches:     usize,
    pub epochs:      usize,
}

// ─── IterateUseCase ───────────────────────────────────────────────────────────
pub struct IterateUseCase {
    config: IterateConfig,
}

impl IterateUseCase {
    pub fn new(config: IterateConfig) -> Self {
        Self { config }
    }

    /// Run on the default CPU backend.
    pub fn execute<F>(&self, visit: F) -> Result<IterateSummary>
    where
        F: FnMut(usize, &MoleculeBatch<LoadBackend>),
    {
        self.run::<LoadBackend, F>(Default::default(), visit)
    }

    /// Run on any backend/device. `visit` is called with the running
    /// batch number and each batch that survives drop_last.
    pub fn run<B, F>(&self, device: B::Device, visit: F) -> Result<IterateSummary>
    where
        B: Backend,
        F: FnMut(usize, &MoleculeBatch<B>),
    {
        let cfg = &self.config;
        if cfg.batch_size == 0 {
            anyhow::bail!("invalid iteration settings: batch_size must be at least 1");
        }

        // ── Step 1: Dataset ───────────────────────────────────────────────────
        let dataset = MoleculeDataset::new(cfg.dataset.clone()).with_context(|| {
            format!("cannot open dataset at '{}'", cfg.dataset.data_dir.display())
        })?;
        let dataset_len = dataset.file_count();
        tracing::info!("Dataset contains {} molecules", dataset_len);

        // ── Step 2: DataLoader ────────────────────────────────────────────────
        let loader = MoleculeLoader::<B>::build(dataset, cfg, device);

        // ── Step 3: Cycle ─────────────────────────────────────────────────────
        let plan = CyclePlan::from(cfg);
        let (batches, epochs) = cycle_batches(&loader, &plan, visit)
            .context("batch iteration failed")?;

        tracing::info!("Visited {} batches over {} epochs", batches, epochs);
        Ok(IterateSummary { dataset_len, batches, epochs })
    }
}

// ─── Loader ───────────────────────────────────────────────────────────────────
enum MoleculeLoader<B: Backend> {
    /// Single-threaded: Burn stacks the batches itself
    Direct(Arc<dyn DataLoader<BatchResult<B>>>),

    /// Multi-threaded: workers yield raw items, regrouped here
    Regrouped {
        loader:     Arc<dyn DataLoader<Vec<MoleculeItem>>>,
        batcher:    MoleculeBatcher<B>,
        batch_size: usize,
    },
}

impl<B: Backend> MoleculeLoader<B> {
    fn build(dataset: MoleculeDataset, cfg: &IterateConfig, device: B::Device) -> Self {
        // num_workers(0) would give Burn a pool with no threads
        if cfg.num_workers == 0 {
            let mut builder = DataLoaderBuilder::new(MoleculeBatcher::<B>::new(device))
                .batch_size(cfg.batch_size);
            if cfg.shuffle {
                builder = builder.shuffle(cfg.seed);
            }
            return Self::Direct(builder.build(dataset));
        }

        let mut builder = DataLoaderBuilder::new(ItemBatcher)
            .batch_size(cfg.batch_size)
            .num_workers(cfg.num_workers);
        if cfg.shuffle {
            builder = builder.shuffle(cfg.seed);
        }
        Self::Regrouped {
            loader:     builder.build(dataset),
            batcher:    MoleculeBatcher::new(device),
            batch_size: cfg.batch_size,
        }
    }

    /// One pass over the dataset
    fn epoch(&self) -> Box<dyn Iterator<Item = BatchResult<B>> + '_> {
        match self {
            Self::Direct(loader) => Box::new(loader.iter()),
            Self::Regrouped { loader, batcher, batch_size } => {
                let batch_size = *batch_size;
                let mut items  = loader.iter().flatten();
                Box::new(std::iter::from_fn(move || {
                    let chunk: Vec<MoleculeItem> = items.by_ref().take(batch_size).collect();
                    (!chunk.is_empty()).then(|| batcher.batch(chunk))
                }))
            }
        }
    }
}

// ─── Cycling ──────────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy)]
struct CyclePlan {
    limit:      usize,
    batch_size: usize,
    drop_last:  bool,
}

impl From<&IterateConfig> for CyclePlan {
    fn from(cfg: &IterateConfig) -> Self {
        Self {
            limit:      cfg.num_batches,
            batch_size: cfg.batch_size,
            drop_last:  cfg.drop_last,
        }
    }
}

/// Returns (batches visited, epochs started).
fn cycle_batches<B, F>(
    loader:    &MoleculeLoader<B>,
    plan:      &CyclePlan,
    mut visit: F,
) -> Result<(usize, usize), Arc<DatasetError>>
where
    B: Backend,
    F: FnMut(usize, &MoleculeBatch<B>),
{
    let mut batches = 0usize;
    let mut epochs  = 0usize;

    while batches < plan.limit {
        epochs += 1;
        let mut yielded = 0usize;

        for result in loader.epoch() {
            let batch = result?;
            if plan.drop_last && batch.len() < plan.batch_size {
                tracing::debug!("Dropping short batch of {} molecules", batch.len());
                continue;
            }

            visit(batches, &batch);
            batches += 1;
            yielded += 1;
            if batches >= plan.limit {
                break;
            }
        }

        if yielded == 0 {
            tracing::warn!(
                "Epoch {} produced no batches (batch_size={}, drop_last={}); stopping",
                epochs,
                plan.batch_size,
                plan.drop_last,
            );
            break;
        }
    }

    Ok((batches, epochs))
}
