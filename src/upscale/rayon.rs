//! Rayon row scheduler (feature-gated).
//!
//! The output buffer is split into disjoint per-row bands with
//! `par_chunks_mut`, so every task writes only its own blocks and reads only
//! the immutable inputs. Results are identical to the sequential scheduler
//! for any thread count.

use crate::image::Rgb;
use crate::upscale::rows::RowJob;
use rayon::prelude::*;

/// Runs all rows across the rayon thread pool.
pub(crate) fn run_parallel(job: &RowJob<'_>, out: &mut [Rgb], on_row_done: impl Fn() + Sync) {
    out.par_chunks_mut(job.band_len())
        .enumerate()
        .for_each(|(y, band)| {
            job.run(y, band);
            on_row_done();
        });
}
