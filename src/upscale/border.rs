//! Nearest-neighbor fill for the border band.

use crate::image::{ImageView, OwnedImage, Rgb};

/// Returns true when `(x, y)` lies within `padding` of any image edge.
#[inline]
pub fn is_border(x: usize, y: usize, width: usize, height: usize, padding: usize) -> bool {
    x < padding || y < padding || x + padding >= width || y + padding >= height
}

/// Replicates `px` over one `scale x scale` block of `out`.
///
/// `out` holds `scale` rows of `out_stride` pixels; the block starts at
/// column `block_x`.
pub(crate) fn fill_block(px: Rgb, scale: usize, out: &mut [Rgb], out_stride: usize, block_x: usize) {
    for yy in 0..scale {
        let start = yy * out_stride + block_x;
        out[start..start + scale].fill(px);
    }
}

/// Fills every border block of an already upscaled image from `full`.
///
/// Interior blocks are left untouched. `out` must be exactly `scale` times
/// the size of `full` on both axes.
pub fn fill_border(full: ImageView<'_, Rgb>, out: &mut OwnedImage, scale: usize, padding: usize) {
    let width = full.width();
    let height = full.height();
    let out_stride = out.width();
    debug_assert_eq!(out_stride, width * scale);
    debug_assert_eq!(out.height(), height * scale);

    for (y, band) in out
        .data_mut()
        .chunks_mut(out_stride * scale)
        .enumerate()
        .take(height)
    {
        for x in 0..width {
            if is_border(x, y, width, height, padding) {
                fill_block(*full.at(x, y), scale, band, out_stride, x * scale);
            }
        }
    }
}
