//! Low-level building blocks for custom upscaling pipelines.
//!
//! These expose the individual stages (reference construction, patch
//! distance, windowed candidate search, block synthesis) for callers that
//! want to inspect or recombine them. Most users should prefer
//! [`Upscaler`](crate::Upscaler).

pub use crate::candidate::set::{Candidate, CandidateSet, SENTINEL_DISTANCE};
pub use crate::image::reference::build_reference;
pub use crate::patch::{center_difference, patch_distance, ring_multiplier};
pub use crate::search::scan::{scan_window, search_candidates};
pub use crate::search::window::SearchWindow;
pub use crate::search::SearchParams;
pub use crate::synth::{corrector, synthesize_block};
pub use crate::upscale::{fill_border, is_border};
