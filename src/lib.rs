//! Patchscale is a CPU self-similarity image upscaler.
//!
//! For every source pixel the crate searches a box-filtered, downscaled copy
//! of the same image for patches resembling the pixel's neighborhood, then
//! synthesizes the pixel's high-resolution block from the full-resolution
//! blocks behind the best matches, optionally corrected to keep the local
//! color. Row-parallel execution is available via the `rayon` feature and
//! file I/O via `image-io`.

mod candidate;
pub mod image;
pub mod lowlevel;
pub mod patch;
pub mod search;
pub mod synth;
mod trace;
pub mod upscale;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;
pub use crate::image::reference::build_reference;
pub use crate::image::{ImageView, OwnedImage, Rgb};
pub use patch::{ContextWeights, PatchPlan};
pub use upscale::{upscale, BorderPolicy, UpscaleConfig, Upscaler};
pub use util::{UpscaleError, UpscaleResult};

pub use crate::candidate::set::{Candidate, CandidateSet};
