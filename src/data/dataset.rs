// ============================================================
// Layer 4 — MoleculeDataset
// ============================================================
// Implements Burn's Dataset trait over a directory of
// structure files. Each access runs the whole per-item
// pipeline:
//
//   get(i)
//     │
//     ▼
//   parse file i          (StructureParser, or cached copy)
//     │
//     ▼
//   jitter coordinates    (fresh N(0, σ) noise, skipped if σ = 0)
//     │
//     ▼
//   zero-pad              (→ exactly max_num_atoms entries,
//                            Overflow if the molecule is longer)
//
// Nothing here is mutable after construction except the
// optional parse cache, whose cells are written at most once.
// That keeps the dataset safe to share between the loader's
// worker threads.
//
// Reference: Burn Book §4 (Datasets)

use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    sync::{Arc, OnceLock},
};

use crate::data::{
    augment::CoordJitter,
    file_index::FileIndex,
    padding::pad_molecule,
    sdf::SdfParser,
};
use crate::domain::{
    error::DatasetError,
    molecule::{MoleculeRecord, ParsedMolecule},
    traits::StructureParser,
};

/// Default padded length when none is given
pub const DEFAULT_MAX_NUM_ATOMS: usize = 50;

/// What the data loader receives per index. Errors travel
/// through the loader to the caller instead of being dropped.
pub type MoleculeItem = Result<MoleculeRecord, Arc<DatasetError>>;

// ─── Dataset Configuration ───────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Directory to scan; relative paths are resolved against the cwd
    pub data_dir: PathBuf,

    /// σ of the Gaussian coordinate noise, 0 disables it
    pub coord_jitter_std: f64,

    /// Every record is padded to exactly this many atoms
    pub max_num_atoms: usize,

    /// Keep parsed molecules in memory after the first access.
    /// Jitter is still re-sampled on every access.
    pub cache_parsed: bool,
}

impl DatasetConfig {
    pub fn new(data_dir: impl Into<PathBuf>, coord_jitter_std: f64) -> Self {
        Self {
            data_dir: data_dir.into(),
            coord_jitter_std,
            max_num_atoms: DEFAULT_MAX_NUM_ATOMS,
            cache_parsed: false,
        }
    }

    pub fn with_max_num_atoms(mut self, max_num_atoms: usize) -> Self {
        self.max_num_atoms = max_num_atoms;
        self
    }

    pub fn with_cache_parsed(mut self, cache_parsed: bool) -> Self {
        self.cache_parsed = cache_parsed;
        self
    }

    fn validate(&self) -> Result<(), DatasetError> {
        if self.max_num_atoms == 0 {
            return Err(DatasetError::config("max_num_atoms must be at least 1"));
        }
        Ok(())
    }
}

// ─── MoleculeDataset ──────────────────────────────────────────────────────────
pub struct MoleculeDataset<P: StructureParser = SdfParser> {
    config: DatasetConfig,
    parser: P,
    files:  FileIndex,
    jitter: CoordJitter,
    /// One cell per file; empty unless cache_parsed is on
    cache:  Vec<OnceLock<ParsedMolecule>>,
}

impl MoleculeDataset<SdfParser> {
    /// Build a dataset over the `.sdf` files in `config.data_dir`.
    pub fn new(config: DatasetConfig) -> Result<Self, DatasetError> {
        Self::with_parser(config, SdfParser)
    }
}

impl<P: StructureParser> MoleculeDataset<P> {
    /// Build a dataset using any structure parser. The directory
    /// is scanned for files with `parser.extension()`.
    pub fn with_parser(config: DatasetConfig, parser: P) -> Result<Self, DatasetError> {
        config.validate()?;
        let jitter = CoordJitter::new(config.coord_jitter_std)?;

        let data_dir = resolve(&config.data_dir)?;
        let files    = FileIndex::scan(&data_dir, parser.extension())?;

        let cache = if config.cache_parsed {
            (0..files.len()).map(|_| OnceLock::new()).collect()
        } else {
            Vec::new()
        };

        tracing::debug!(
            "MoleculeDataset ready: {} files, max_num_atoms={}, jitter_std={} (enabled={})",
            files.len(),
            config.max_num_atoms,
            config.coord_jitter_std,
            jitter.is_enabled(),
        );

        Ok(Self { config, parser, files, jitter, cache })
    }

    /// Number of discovered structure files
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Produce the padded (and possibly jittered) record for `index`.
    pub fn try_get(&self, index: usize) -> Result<MoleculeRecord, DatasetError> {
        let path = self.files.get(index).ok_or(DatasetError::IndexOutOfRange {
            index,
            len: self.files.len(),
        })?;

        let mut molecule = self.load(index, path)?;
        self.jitter.apply(&mut molecule.positions, &mut rand::thread_rng());
        pad_molecule(path, &molecule, self.config.max_num_atoms)
    }

    /// Parse the file, going through the cache when it is enabled
    fn load(&self, index: usize, path: &Path) -> Result<ParsedMolecule, DatasetError> {
        let Some(cell) = self.cache.get(index) else {
            return self.parse(path);
        };

        if let Some(cached) = cell.get() {
            return Ok(cached.clone());
        }
        let parsed = self.parse(path)?;
        // Another worker may have filled the cell meanwhile; both copies are equal
        let _ = cell.set(parsed.clone());
        Ok(parsed)
    }

    fn parse(&self, path: &Path) -> Result<ParsedMolecule, DatasetError> {
        let molecule = self.parser.parse(path)?;
        if molecule.atomic_numbers.len() != molecule.positions.len() {
            return Err(DatasetError::parse(
                path,
                format!(
                    "parser returned {} atomic numbers but {} positions",
                    molecule.atomic_numbers.len(),
                    molecule.positions.len()
                ),
            ));
        }
        tracing::debug!("Parsed '{}' ({} atoms)", path.display(), molecule.atom_count());
        Ok(molecule)
    }
}

// ─── Burn Dataset Trait Implementation ────────────────────────────────────────
// The DataLoader only ever calls these two methods.
impl<P: StructureParser> Dataset<MoleculeItem> for MoleculeDataset<P> {
    fn get(&self, index: usize) -> Option<MoleculeItem> {
        if index >= self.files.len() {
            return None;
        }
        Some(self.try_get(index).map_err(Arc::new))
    }

    fn len(&self) -> usize {
        self.files.len()
    }
}

fn resolve(dir: &Path) -> Result<PathBuf, DatasetError> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|e| DatasetError::io(dir, e))?;
    Ok(cwd.join(dir))
}
