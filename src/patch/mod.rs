//! Patch geometry, context weights and the weighted patch distance.

mod distance;
mod plan;

pub use distance::{center_difference, patch_distance};
pub use plan::{ring_multiplier, ContextWeights, PatchPlan};
