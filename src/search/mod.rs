//! Windowed candidate search in the reference image.
//!
//! `window` clips the search region so every candidate patch lies inside the
//! reference image; `scan` walks that region, prunes by center color, and
//! ranks the survivors by weighted patch distance.

pub(crate) mod scan;
pub(crate) mod window;

/// Per-query search settings shared by all pixels of one run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchParams {
    /// Upscale factor mapping full-image coordinates to reference coordinates.
    pub scale: usize,
    /// Window half extent in reference pixels.
    pub half_extent: usize,
    /// Candidates whose center color differs by this much or more are skipped.
    pub stop_threshold: u32,
    /// Number of candidates to retain.
    pub top_k: usize,
}
