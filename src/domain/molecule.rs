// ============================================================
// Layer 3 — Molecule Domain Types
// ============================================================
// Two shapes of the same molecule:
//
//   ParsedMolecule  → exactly what the structure file says,
//                     variable length, f64 coordinates
//   MoleculeRecord  → after augmentation and padding,
//                     fixed length (max_num_atoms), f32 coordinates
//
// Only MoleculeRecord ever reaches the batcher.
//
// Reference: Rust Book §5 (Structs and Methods)

/// One molecule as read from a structure file, before any
/// augmentation or padding. Atom order matches the file.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMolecule {
    /// Atomic number per atom (H = 1, C = 6, ...)
    pub atomic_numbers: Vec<u32>,

    /// Cartesian coordinates per atom, in the file's units (Å for SDF)
    pub positions: Vec<[f64; 3]>,
}

impl ParsedMolecule {
    pub fn new(atomic_numbers: Vec<u32>, positions: Vec<[f64; 3]>) -> Self {
        Self { atomic_numbers, positions }
    }

    /// Number of atoms in the molecule
    pub fn atom_count(&self) -> usize {
        self.atomic_numbers.len()
    }
}

/// One fixed-size sample ready for batching.
///
/// Both sequences have length exactly `max_num_atoms`.
/// Everything from `num_atoms` onwards is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct MoleculeRecord {
    /// Atomic numbers, zero-padded
    pub atomic_numbers: Vec<u32>,

    /// Coordinates, zero-padded along the atom axis
    pub positions: Vec<[f32; 3]>,

    /// How many leading entries are real atoms
    pub num_atoms: usize,
}

impl MoleculeRecord {
    /// The padded length (max_num_atoms the record was built with)
    pub fn padded_len(&self) -> usize {
        self.atomic_numbers.len()
    }
}
