// ============================================================
// Layer 4 — Molecule Batcher
// ============================================================
// Implements Burn's Batcher trait to stack padded molecule
// records into tensors.
//
// How batching works here:
//   Input:  Vec of N MoleculeItems, each padded to A atoms
//   Output: MoleculeBatch with
//             atomic_numbers [N, A]
//             positions      [N, A, 3]
//             atom_counts    [N]
//
//   All records are already padded to the same A, so stacking
//   is a flatten followed by a reshape:
//   [m1_a1, m1_a2, ..., m1_aA, m2_a1, ..., mN_aA] → [N, A]
//
// If any item in the mini-batch failed (parse error, overflow)
// the whole batch is that error.
//
// ItemBatcher is the multi-worker variant: it hands the raw
// items back so they can be regrouped before stacking.
//
// Reference: Burn Book §4 (Batcher)

use burn::{data::dataloader::batcher::Batcher, prelude::*};
use std::sync::Arc;

use crate::data::dataset::MoleculeItem;
use crate::domain::{error::DatasetError, molecule::MoleculeRecord};

/// What the data loader yields per iteration step
pub type BatchResult<B> = Result<MoleculeBatch<B>, Arc<DatasetError>>;

// ─── MoleculeBatch ────────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct MoleculeBatch<B: Backend> {
    /// Atomic numbers, zero where padded — shape: [batch_size, max_num_atoms]
    pub atomic_numbers: Tensor<B, 2, Int>,

    /// Coordinates, zero where padded — shape: [batch_size, max_num_atoms, 3]
    pub positions: Tensor<B, 3>,

    /// Real atom count per molecule — shape: [batch_size]
    pub atom_counts: Tensor<B, 1, Int>,
}

impl<B: Backend> MoleculeBatch<B> {
    /// Number of molecules in this batch
    pub fn len(&self) -> usize {
        self.atomic_numbers.dims()[0]
    }
}

// ─── MoleculeBatcher ──────────────────────────────────────────────────────────
/// Holds the target device so tensors are created on the right CPU/GPU.
#[derive(Clone, Debug)]
pub struct MoleculeBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> MoleculeBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }

    /// Stack records that are known to be valid.
    pub fn stack(&self, records: &[MoleculeRecord]) -> MoleculeBatch<B> {
        let batch_size = records.len();
        let max_atoms  = records.first().map(MoleculeRecord::padded_len).unwrap_or(0);

        // Burn uses i32 for Int tensor input
        let numbers_flat: Vec<i32> = records
            .iter()
            .flat_map(|r| r.atomic_numbers.iter().map(|&z| z as i32))
            .collect();

        let positions_flat: Vec<f32> = records
            .iter()
            .flat_map(|r| r.positions.iter().flatten().copied())
            .collect();

        let counts: Vec<i32> = records.iter().map(|r| r.num_atoms as i32).collect();

        let atomic_numbers = Tensor::<B, 1, Int>::from_ints(
            numbers_flat.as_slice(), &self.device
        ).reshape([batch_size, max_atoms]);

        let positions = Tensor::<B, 1>::from_floats(
            positions_flat.as_slice(), &self.device
        ).reshape([batch_size, max_atoms, 3]);

        let atom_counts = Tensor::<B, 1, Int>::from_ints(counts.as_slice(), &self.device);

        MoleculeBatch { atomic_numbers, positions, atom_counts }
    }
}

// ─── Burn Batcher Trait Implementation ────────────────────────────────────────
// The DataLoader calls .batch(items) with each mini-batch of samples.
impl<B: Backend> Batcher<MoleculeItem, BatchResult<B>> for MoleculeBatcher<B> {
    fn batch(&self, items: Vec<MoleculeItem>) -> BatchResult<B> {
        let records = items.into_iter().collect::<Result<Vec<_>, _>>()?;

        // Records from one dataset share max_num_atoms; anything else is a bug upstream
        if let Some(first) = records.first() {
            let expected = first.padded_len();
            if let Some(bad) = records.iter().find(|r| r.padded_len() != expected) {
                return Err(Arc::new(DatasetError::config(format!(
                    "cannot stack records padded to {} and {} atoms",
                    expected,
                    bad.padded_len()
                ))));
            }
        }

        tracing::debug!("Stacking batch of {} molecules", records.len());
        Ok(self.stack(&records))
    }
}

// ─── ItemBatcher ──────────────────────────────────────────────────────────────
/// Pass-through batcher for multi-worker loading. Workers only fetch
/// items; the iteration driver regroups and stacks them.
#[derive(Clone, Copy, Debug, Default)]
pub struct ItemBatcher;

impl Batcher<MoleculeItem, Vec<MoleculeItem>> for ItemBatcher {
    fn batch(&self, items: Vec<MoleculeItem>) -> Vec<MoleculeItem> {
        items
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    fn record(numbers: &[u32], max: usize) -> MoleculeRecord {
        let mut atomic_numbers = numbers.to_vec();
        atomic_numbers.resize(max, 0);
        let mut positions: Vec<[f32; 3]> = (0..numbers.len())
            .map(|i| [i as f32 + 1.0, 2.0, 3.0])
            .collect();
        positions.resize(max, [0.0; 3]);
        MoleculeRecord { atomic_numbers, positions, num_atoms: numbers.len() }
    }

    #[test]
    fn test_batch_shapes() {
        let batcher = MoleculeBatcher::<TestBackend>::new(Default::default());
        let items   = vec![Ok(record(&[6, 8], 4)), Ok(record(&[1], 4)), Ok(record(&[7, 7, 7], 4))];

        let batch = batcher.batch(items).unwrap();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.atomic_numbers.dims(), [3, 4]);
        assert_eq!(batch.positions.dims(), [3, 4, 3]);
        assert_eq!(batch.atom_counts.dims(), [3]);
    }

    #[test]
    fn test_values_land_in_the_right_rows() {
        let batcher = MoleculeBatcher::<TestBackend>::new(Default::default());
        let batch   = batcher.batch(vec![Ok(record(&[6, 8], 3)), Ok(record(&[1], 3))]).unwrap();

        // Row 1 = [1, 0, 0] → sum 1; row 0 = [6, 8, 0] → sum 14
        let row0: i64 = batch.atomic_numbers.clone().slice([0..1, 0..3]).sum().into_scalar().elem();
        let row1: i64 = batch.atomic_numbers.clone().slice([1..2, 0..3]).sum().into_scalar().elem();
        assert_eq!(row0, 14);
        assert_eq!(row1, 1);

        let counts: i64 = batch.atom_counts.sum().into_scalar().elem();
        assert_eq!(counts, 3);

        // Padded positions of molecule 1 (atoms 1..3) are zero
        let tail: f32 = batch.positions.slice([1..2, 1..3, 0..3]).abs().sum().into_scalar().elem();
        assert_eq!(tail, 0.0);
    }

    #[test]
    fn test_failed_item_fails_the_batch() {
        let batcher = MoleculeBatcher::<TestBackend>::new(Default::default());
        let err     = Arc::new(DatasetError::config("boom"));
        let result  = batcher.batch(vec![Ok(record(&[6], 2)), Err(err)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_mismatched_padding_is_rejected() {
        let batcher = MoleculeBatcher::<TestBackend>::new(Default::default());
        let result  = batcher.batch(vec![Ok(record(&[6], 2)), Ok(record(&[6], 5))]);
        assert!(result.is_err());
    }
}
