// ============================================================
// Layer 4 — Coordinate Jitter
// ============================================================
// Adds independent zero-mean Gaussian noise to every
// coordinate component:
//
//   x' = x + ε_x,   ε_x ~ N(0, σ²)   (same for y, z)
//
// σ = 0 disables the augmentation entirely; positions are
// then returned bit-for-bit as parsed.
//
// The RNG is passed in by the caller, so this module never
// decides how (or whether) noise is seeded.
//
// Reference: rand_distr crate documentation (Normal)

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::domain::error::DatasetError;

#[derive(Debug, Clone, Copy)]
pub struct CoordJitter {
    /// None when σ = 0
    noise: Option<Normal<f64>>,
}

impl CoordJitter {
    /// Build a jitter with standard deviation `std`.
    /// Negative, NaN or infinite values are rejected.
    pub fn new(std: f64) -> Result<Self, DatasetError> {
        if !std.is_finite() || std < 0.0 {
            return Err(DatasetError::config(format!(
                "coord_jitter_std must be a finite value >= 0, got {std}"
            )));
        }
        if std == 0.0 {
            return Ok(Self { noise: None });
        }

        let normal = Normal::new(0.0, std).map_err(|e| DatasetError::config(e.to_string()))?;
        Ok(Self { noise: Some(normal) })
    }

    pub fn is_enabled(&self) -> bool {
        self.noise.is_some()
    }

    /// Perturb `positions` in place, drawing fresh noise from `rng`.
    pub fn apply<R: Rng + ?Sized>(&self, positions: &mut [[f64; 3]], rng: &mut R) {
        let Some(normal) = &self.noise else {
            return;
        };

        for component in positions.iter_mut().flatten() {
            *component += normal.sample(rng);
        }
    }
}
