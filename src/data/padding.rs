// ============================================================
// Layer 4 — Fixed-Length Padding
// ============================================================
// Extends a variable-length molecule to exactly max_num_atoms
// entries along the atom axis, filling the tail with zeros:
//
//   atomic_numbers  [8, 1, 1]            → [8, 1, 1, 0, 0, ..., 0]
//   positions       [[x,y,z] × 3]        → [[x,y,z] × 3, [0,0,0] × (max-3)]
//
// The trailing xyz dimension is never touched.
// A molecule longer than max_num_atoms is an Overflow error,
// never a silent truncation.

use std::path::Path;

use crate::domain::{
    error::DatasetError,
    molecule::{MoleculeRecord, ParsedMolecule},
};

/// Copy `values` and append `T::default()` until the length is `len`.
/// Callers must have checked `values.len() <= len`.
fn pad_to<T: Copy + Default>(values: &[T], len: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(len);
    out.extend_from_slice(values);
    out.resize(len, T::default());
    out
}

/// Turn an (already augmented) parsed molecule into a padded record.
/// This is the only place the atom count is checked against the limit.
///
/// `path` is only used to name the file in an Overflow error.
pub fn pad_molecule(
    path:          &Path,
    molecule:      &ParsedMolecule,
    max_num_atoms: usize,
) -> Result<MoleculeRecord, DatasetError> {
    let num_atoms = molecule.atom_count();
    if num_atoms > max_num_atoms {
        return Err(DatasetError::Overflow {
            path:  path.to_path_buf(),
            atoms: num_atoms,
            max:   max_num_atoms,
        });
    }

    // f64 → f32: burn's default float element
    let positions: Vec<[f32; 3]> = molecule
        .positions
        .iter()
        .map(|&[x, y, z]| [x as f32, y as f32, z as f32])
        .collect();

    Ok(MoleculeRecord {
        atomic_numbers: pad_to(&molecule.atomic_numbers, max_num_atoms),
        positions:      pad_to(&positions, max_num_atoms),
        num_atoms,
    })
}
