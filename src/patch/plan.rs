//! Context weight normalization and precomputed patch plans.

use crate::util::{UpscaleError, UpscaleResult};

/// Scales a raw ring weight so rings with more pixels do not dominate.
///
/// Ring `i` of a square patch contains `8 * i` pixels (one for the center).
/// The multiplier is `((diameter - 1) * 4) / max(1, 8 * i)` in integer
/// arithmetic, so the outermost ring gets `1` and the center gets the full
/// outer ring pixel count.
pub fn ring_multiplier(ring: usize, diameter: usize) -> u32 {
    let ring_pixels = (((ring * 2 + 1) - 1) * 4).max(1);
    (((diameter.saturating_sub(1)) * 4) / ring_pixels) as u32
}

/// Normalized per-ring weights, indexed by Chebyshev distance from the center.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextWeights {
    diameter: usize,
    weights: Vec<u32>,
}

impl ContextWeights {
    /// Normalizes raw weights for a patch of `diameter` pixels.
    ///
    /// Exactly `diameter / 2 + 1` raw weights are used; extra entries are
    /// ignored.
    pub fn normalized(raw: &[u32], diameter: usize) -> UpscaleResult<Self> {
        if diameter % 2 == 0 {
            return Err(UpscaleError::EvenContextDiameter { diameter });
        }
        let rings = diameter / 2 + 1;
        if raw.len() < rings {
            return Err(UpscaleError::MissingContextWeights {
                needed: rings,
                got: raw.len(),
            });
        }
        let weights = raw[..rings]
            .iter()
            .enumerate()
            .map(|(ring, &w)| w.saturating_mul(ring_multiplier(ring, diameter)))
            .collect();
        Ok(Self { diameter, weights })
    }

    /// Uniform raw weights (`1` per ring), normalized.
    pub fn uniform(diameter: usize) -> UpscaleResult<Self> {
        Self::normalized(&vec![1; diameter / 2 + 1], diameter)
    }

    /// Returns the patch diameter these weights were normalized for.
    pub fn diameter(&self) -> usize {
        self.diameter
    }

    /// Returns the normalized weight of each ring, center first.
    pub fn as_slice(&self) -> &[u32] {
        &self.weights
    }
}

/// Precomputed offset-to-weight table for one patch geometry.
#[derive(Clone, Debug)]
pub struct PatchPlan {
    diameter: usize,
    padding: usize,
    weights: ContextWeights,
    table: Vec<u32>,
}

impl PatchPlan {
    /// Expands ring weights into a row-major `diameter x diameter` table.
    pub fn new(weights: ContextWeights) -> Self {
        let diameter = weights.diameter();
        let padding = diameter / 2;
        let mut table = Vec::with_capacity(diameter * diameter);
        for ty in 0..diameter {
            for tx in 0..diameter {
                let ring = ty.abs_diff(padding).max(tx.abs_diff(padding));
                table.push(weights.as_slice()[ring]);
            }
        }
        Self {
            diameter,
            padding,
            weights,
            table,
        }
    }

    /// Returns the patch diameter in pixels.
    pub fn diameter(&self) -> usize {
        self.diameter
    }

    /// Returns the patch radius (`diameter / 2`).
    pub fn padding(&self) -> usize {
        self.padding
    }

    /// Returns the normalized ring weights.
    pub fn weights(&self) -> &ContextWeights {
        &self.weights
    }

    /// Returns the per-offset weight table in row-major order.
    pub fn table(&self) -> &[u32] {
        &self.table
    }
}
