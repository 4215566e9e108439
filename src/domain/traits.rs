// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The dataset only needs one capability from the outside world:
// turn a file path into atomic numbers and positions.
//
// Implementations:
//   - SdfParser → MDL SDF / MOL V2000 files (data layer)
//
// The dataset is generic over this trait, so the directory
// scan picks up whatever extension the parser declares.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use std::path::Path;

use crate::domain::{error::DatasetError, molecule::ParsedMolecule};

// ─── StructureParser ──────────────────────────────────────────────────────────
/// Any component that can read one molecule from one file.
///
/// Must be `Send + Sync`: the data loader may call it from
/// several worker threads at once.
pub trait StructureParser: Send + Sync {
    /// File extension (without the dot) this parser understands,
    /// matched case-insensitively during the directory scan.
    fn extension(&self) -> &'static str;

    /// Read the file and return one atomic number and one
    /// position per atom, in file order.
    fn parse(&self, path: &Path) -> Result<ParsedMolecule, DatasetError>;
}
