//! Run configuration and validation.

use crate::patch::ContextWeights;
use crate::util::{UpscaleError, UpscaleResult};

/// How output blocks for the uncomputed border band are filled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BorderPolicy {
    /// Replicate the source pixel over its whole output block.
    #[default]
    Nearest,
    /// Leave border blocks at the zero-initialized value (black).
    Leave,
}

/// Hyperparameters for one upscaling run.
#[derive(Clone, Debug, PartialEq)]
pub struct UpscaleConfig {
    /// Patch diameter in pixels; must be odd.
    pub context_diameter: usize,
    /// Number of candidates averaged per output block.
    pub top_k: usize,
    /// Raw per-ring weights, center first. `None` means uniform weights.
    pub context_weights: Option<Vec<u32>>,
    /// Search window half extent in full-resolution pixels.
    pub area_size: usize,
    /// Integer upscale factor.
    pub scale: usize,
    /// Strength of the local color correction in `[0, 1]`.
    pub color_preservation: f64,
    /// Center color difference at which a candidate is skipped.
    pub stop_threshold: u32,
    /// Fill policy for the border band.
    pub border: BorderPolicy,
    /// Use the rayon row scheduler when the `rayon` feature is enabled.
    pub parallel: bool,
}

impl Default for UpscaleConfig {
    fn default() -> Self {
        Self {
            context_diameter: 5,
            top_k: 1,
            context_weights: None,
            area_size: 30,
            scale: 2,
            color_preservation: 0.0,
            stop_threshold: 50,
            border: BorderPolicy::Nearest,
            parallel: true,
        }
    }
}

impl UpscaleConfig {
    /// Checks every parameter and returns the normalized context weights.
    pub fn validate(&self) -> UpscaleResult<ContextWeights> {
        if self.scale == 0 {
            return Err(UpscaleError::InvalidScale { scale: self.scale });
        }
        if self.context_diameter % 2 == 0 {
            return Err(UpscaleError::EvenContextDiameter {
                diameter: self.context_diameter,
            });
        }
        if self.top_k == 0 {
            return Err(UpscaleError::InvalidTopK);
        }
        if !(0.0..=1.0).contains(&self.color_preservation) {
            return Err(UpscaleError::ColorPreservationOutOfRange {
                value: self.color_preservation,
            });
        }
        match &self.context_weights {
            Some(raw) => ContextWeights::normalized(raw, self.context_diameter),
            None => ContextWeights::uniform(self.context_diameter),
        }
    }

    /// Patch radius, i.e. the width of the uncomputed border band.
    pub fn padding(&self) -> usize {
        self.context_diameter / 2
    }

    /// Search window half extent converted to reference pixels.
    pub fn half_extent(&self) -> usize {
        self.area_size / self.scale.max(1)
    }
}
