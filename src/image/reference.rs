//! Reference image construction by area-average decimation.
//!
//! Each reference pixel is the per-channel mean of a `scale x scale` block of
//! the full image, rounded half up: `dst = (sum + n / 2) / n`. Trailing rows
//! and columns that do not fill a whole block are dropped, so every reference
//! pixel maps back onto a complete block of the full image.

use crate::image::{ImageView, OwnedImage, Rgb, CHANNELS};
use crate::trace::{trace_event, trace_span};
use crate::util::{UpscaleError, UpscaleResult};

/// Downscales `full` by an integer `scale` using a box filter.
///
/// The output is `floor(width / scale) x floor(height / scale)`. When a
/// dimension is not a multiple of `scale` this differs from an area resize
/// that rounds the size and weights the partial trailing block: here that
/// block is dropped instead. For divisible sizes the two agree.
///
/// `scale == 1` returns a contiguous copy of the input.
pub fn build_reference(full: ImageView<'_, Rgb>, scale: usize) -> UpscaleResult<OwnedImage> {
    if scale == 0 {
        return Err(UpscaleError::InvalidScale { scale });
    }
    let _span = trace_span!("build_reference", scale = scale).entered();

    if scale == 1 {
        return OwnedImage::from_view(full);
    }

    let dst_width = full.width() / scale;
    let dst_height = full.height() / scale;
    if dst_width == 0 || dst_height == 0 {
        return Err(UpscaleError::InvalidDimensions {
            width: dst_width,
            height: dst_height,
        });
    }

    let area = (scale * scale) as u32;
    let half = area / 2;
    let mut dst = Vec::with_capacity(dst_width * dst_height);
    let mut sums = vec![[0u32; CHANNELS]; dst_width];
    for y in 0..dst_height {
        sums.fill([0; CHANNELS]);
        for sy in y * scale..(y + 1) * scale {
            let row = full.row(sy).ok_or(UpscaleError::BufferTooSmall {
                needed: sy * full.stride() + full.width(),
                got: full.as_slice().len(),
            })?;
            for (x, acc) in sums.iter_mut().enumerate() {
                for px in &row[x * scale..(x + 1) * scale] {
                    for c in 0..CHANNELS {
                        acc[c] += u32::from(px[c]);
                    }
                }
            }
        }
        dst.extend(
            sums.iter()
                .map(|acc| acc.map(|sum| ((sum + half) / area) as u8)),
        );
    }

    trace_event!("reference_size", width = dst_width, height = dst_height);
    OwnedImage::new(dst, dst_width, dst_height)
}
