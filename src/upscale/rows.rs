//! Per-row work shared by the sequential and parallel schedulers.

use crate::image::{ImageView, Rgb, CHANNELS};
use crate::patch::PatchPlan;
use crate::search::scan::search_candidates;
use crate::search::SearchParams;
use crate::synth::synthesize_block;
use crate::upscale::border::{fill_block, is_border};
use crate::upscale::BorderPolicy;

/// Read-only inputs for one run; shared by reference across all row tasks.
#[derive(Clone, Copy)]
pub(crate) struct RowJob<'a> {
    pub full: ImageView<'a, Rgb>,
    pub reference: ImageView<'a, Rgb>,
    pub plan: &'a PatchPlan,
    pub params: SearchParams,
    pub color_preservation: f64,
    pub border: BorderPolicy,
}

impl RowJob<'_> {
    /// Number of output pixels owned by one source row.
    pub fn band_len(&self) -> usize {
        self.full.width() * self.params.scale * self.params.scale
    }

    /// Computes every output block of source row `y` into `band`.
    ///
    /// `band` is the `scale` output rows belonging to `y`; no other row task
    /// touches it.
    pub fn run(&self, y: usize, band: &mut [Rgb]) {
        let width = self.full.width();
        let height = self.full.height();
        let scale = self.params.scale;
        let padding = self.plan.padding();
        let out_stride = width * scale;
        let mut scratch: Vec<[f64; CHANNELS]> = Vec::with_capacity(scale * scale);

        for x in 0..width {
            if is_border(x, y, width, height, padding) {
                if self.border == BorderPolicy::Nearest {
                    fill_block(*self.full.at(x, y), scale, band, out_stride, x * scale);
                }
                continue;
            }
            let candidates =
                search_candidates(self.full, self.reference, (x, y), self.plan, self.params);
            synthesize_block(
                self.full,
                (x, y),
                &candidates,
                scale,
                self.color_preservation,
                band,
                out_stride,
                x * scale,
                &mut scratch,
            );
        }
    }
}

/// Runs all rows in order on the calling thread.
pub(crate) fn run_sequential(job: &RowJob<'_>, out: &mut [Rgb], on_row_done: impl Fn()) {
    for (y, band) in out.chunks_mut(job.band_len()).enumerate() {
        job.run(y, band);
        on_row_done();
    }
}
