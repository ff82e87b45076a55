//! Image views, owned RGB buffers and the reference downsampler.
//!
//! `ImageView` is a borrowed 2D view into a 1D buffer with an explicit stride.
//! The stride counts elements (pixels) between the starts of consecutive rows,
//! so a stride larger than the width represents padded rows.

use crate::util::{UpscaleError, UpscaleResult};

#[cfg(feature = "image-io")]
pub mod io;
pub mod reference;

/// Three 8-bit channels in loader order.
pub type Rgb = [u8; 3];

/// Number of color channels per pixel.
pub const CHANNELS: usize = 3;

/// Borrowed 2D image view with an explicit stride.
#[derive(Copy, Clone)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> UpscaleResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(data: &'a [T], width: usize, height: usize, stride: usize) -> UpscaleResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(UpscaleError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Returns the element at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y.checked_mul(self.stride)?.checked_add(x)?;
        self.data.get(idx)
    }

    /// Returns a contiguous slice for row `y` with length `width`.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }

    /// Returns the element at `(x, y)` without the `Option` wrapper.
    ///
    /// Callers establish the bounds up front (see `SearchWindow`); an
    /// out-of-range coordinate here is a logic error and panics on the slice
    /// index.
    #[inline]
    pub(crate) fn at(&self, x: usize, y: usize) -> &'a T {
        debug_assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        &self.data[y * self.stride + x]
    }

    /// Row counterpart of [`ImageView::at`].
    #[inline]
    pub(crate) fn row_at(&self, y: usize) -> &'a [T] {
        debug_assert!(y < self.height, "row {y} out of bounds");
        let start = y * self.stride;
        &self.data[start..start + self.width]
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> UpscaleResult<usize> {
    if width == 0 || height == 0 {
        return Err(UpscaleError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(UpscaleError::InvalidStride { width, stride });
    }
    let needed = (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(UpscaleError::InvalidDimensions { width, height })?;
    Ok(needed)
}

/// Owned contiguous RGB image buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedImage {
    data: Vec<Rgb>,
    width: usize,
    height: usize,
}

impl OwnedImage {
    /// Wraps a row-major pixel buffer of exactly `width * height` pixels.
    pub fn new(data: Vec<Rgb>, width: usize, height: usize) -> UpscaleResult<Self> {
        if width == 0 || height == 0 {
            return Err(UpscaleError::InvalidDimensions { width, height });
        }
        let needed = width
            .checked_mul(height)
            .ok_or(UpscaleError::InvalidDimensions { width, height })?;
        if data.len() < needed {
            return Err(UpscaleError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(UpscaleError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Allocates a zero-filled (black) image.
    pub fn zeroed(width: usize, height: usize) -> UpscaleResult<Self> {
        let len = width
            .checked_mul(height)
            .ok_or(UpscaleError::InvalidDimensions { width, height })?;
        Self::new(vec![[0u8; CHANNELS]; len], width, height)
    }

    /// Builds an image from interleaved `RGBRGB...` bytes.
    pub fn from_interleaved(bytes: &[u8], width: usize, height: usize) -> UpscaleResult<Self> {
        let needed = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(CHANNELS))
            .ok_or(UpscaleError::InvalidDimensions { width, height })?;
        if bytes.len() != needed {
            return Err(UpscaleError::BufferTooSmall {
                needed,
                got: bytes.len(),
            });
        }
        let data = bytes
            .chunks_exact(CHANNELS)
            .map(|px| [px[0], px[1], px[2]])
            .collect();
        Self::new(data, width, height)
    }

    /// Copies a (possibly strided) view into a contiguous owned image.
    pub fn from_view(view: ImageView<'_, Rgb>) -> UpscaleResult<Self> {
        let width = view.width();
        let height = view.height();
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            let row = view.row(y).ok_or(UpscaleError::BufferTooSmall {
                needed: y * view.stride() + width,
                got: view.as_slice().len(),
            })?;
            data.extend_from_slice(row);
        }
        Self::new(data, width, height)
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, Rgb> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the pixel buffer in row-major order.
    pub fn data(&self) -> &[Rgb] {
        &self.data
    }

    /// Returns the pixel at `(x, y)` if it is within bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        self.view().get(x, y).copied()
    }

    /// Flattens the pixels into interleaved `RGBRGB...` bytes.
    pub fn to_interleaved(&self) -> Vec<u8> {
        self.data.iter().flat_map(|px| px.iter().copied()).collect()
    }

    pub(crate) fn data_mut(&mut self) -> &mut [Rgb] {
        &mut self.data
    }
}
