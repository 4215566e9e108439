// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from .sdf files on disk to tensor batches.
//
//   data_dir/*.sdf
//       │
//       ▼
//   FileIndex         → scans the directory once, fixes index order
//       │
//       ▼
//   SdfParser         → atomic numbers + xyz per file, on demand
//       │
//       ▼
//   CoordJitter       → optional Gaussian noise on coordinates
//       │
//       ▼
//   padding           → zero-pad to max_num_atoms
//       │
//       ▼
//   MoleculeDataset   → implements Burn's Dataset trait
//       │
//       ▼
//   MoleculeBatcher   → stacks records into tensor batches
//       │
//       ▼
//   DataLoader        → shuffling, workers (owned by Burn)
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// SDF reader, backed by bio_files
pub mod sdf;

/// Directory scan for structure files
pub mod file_index;

/// Gaussian coordinate noise
pub mod augment;

/// Zero padding to a fixed atom count
pub mod padding;

/// Implements Burn's Dataset trait for molecules
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

#[cfg(test)]
pub mod fixtures;
