//! Output block synthesis from ranked candidates.
//!
//! For each channel, the `scale x scale` block is the per-sub-pixel mean of
//! the full-resolution blocks behind the retained candidates. A multiplicative
//! corrector then pulls the block mean toward the query pixel's own value:
//!
//! ```text
//! corrector = query * scale^2 / sum(block)          (1 when sum == 0)
//! applied   = corrector * strength + (1 - strength)
//! out       = clamp(round(value * applied), 0, 255)
//! ```
//!
//! With `strength == 1` the block mean equals the query value up to rounding;
//! with `strength == 0` the averaged block is written unchanged.

use crate::candidate::set::CandidateSet;
use crate::image::{ImageView, Rgb, CHANNELS};

/// Computes the color corrector for one channel of a block.
///
/// `block_sum` is the sum of the synthesized (uncorrected) values over the
/// block. A zero sum yields `1.0` so an all-black block never divides by
/// zero.
pub fn corrector(query_value: u8, scale: usize, block_sum: f64, strength: f64) -> f64 {
    let raw = if block_sum == 0.0 {
        1.0
    } else {
        f64::from(query_value) * (scale * scale) as f64 / block_sum
    };
    raw * strength + (1.0 - strength)
}

/// Writes one `scale x scale` output block into `out`.
///
/// `out` holds `scale` rows of `out_stride` pixels each; the block starts at
/// column `block_x`. Candidates are reference coordinates, so their
/// full-resolution block begins at `(x * scale, y * scale)`. Empty candidate
/// slots are ignored; with no filled slot every sub-pixel falls back to the
/// query pixel. `scratch` is reused across calls to hold the per-sub-pixel
/// averages.
#[allow(clippy::too_many_arguments)]
pub fn synthesize_block(
    full: ImageView<'_, Rgb>,
    query: (usize, usize),
    candidates: &CandidateSet,
    scale: usize,
    color_preservation: f64,
    out: &mut [Rgb],
    out_stride: usize,
    block_x: usize,
    scratch: &mut Vec<[f64; CHANNELS]>,
) {
    let query_px = *full.at(query.0, query.1);
    let count = candidates.len();
    scratch.clear();
    scratch.resize(scale * scale, [0.0; CHANNELS]);
    let values = &mut scratch[..];

    for yy in 0..scale {
        for xx in 0..scale {
            let acc = &mut values[yy * scale + xx];
            if count == 0 {
                *acc = query_px.map(f64::from);
                continue;
            }
            for cand in candidates.filled() {
                let px = full.at(cand.x * scale + xx, cand.y * scale + yy);
                for c in 0..CHANNELS {
                    acc[c] += f64::from(px[c]);
                }
            }
            for v in acc.iter_mut() {
                *v /= count as f64;
            }
        }
    }

    let mut applied = [1.0f64; CHANNELS];
    for (c, factor) in applied.iter_mut().enumerate() {
        let sum: f64 = values.iter().map(|v| v[c]).sum();
        *factor = corrector(query_px[c], scale, sum, color_preservation);
    }

    for yy in 0..scale {
        let row = &mut out[yy * out_stride + block_x..yy * out_stride + block_x + scale];
        for (xx, dst) in row.iter_mut().enumerate() {
            let value = &values[yy * scale + xx];
            for c in 0..CHANNELS {
                dst[c] = (value[c] * applied[c]).round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}
