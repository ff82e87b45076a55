//! Convenience helpers for loading and saving images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Pixels are carried as
//! 8-bit RGB; alpha is discarded on load.

use crate::image::OwnedImage;
use crate::util::{UpscaleError, UpscaleResult};
use std::path::Path;

/// Creates an owned image from an RGB image buffer.
pub fn owned_from_rgb_image(img: &image::RgbImage) -> UpscaleResult<OwnedImage> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    OwnedImage::from_interleaved(img.as_raw(), width, height)
}

/// Creates an owned RGB image from a dynamic image.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> UpscaleResult<OwnedImage> {
    let rgb = img.to_rgb8();
    owned_from_rgb_image(&rgb)
}

/// Converts an owned image back into an `image::RgbImage`.
pub fn to_rgb_image(img: &OwnedImage) -> UpscaleResult<image::RgbImage> {
    let width = u32::try_from(img.width()).map_err(|_| UpscaleError::InvalidDimensions {
        width: img.width(),
        height: img.height(),
    })?;
    let height = u32::try_from(img.height()).map_err(|_| UpscaleError::InvalidDimensions {
        width: img.width(),
        height: img.height(),
    })?;
    image::RgbImage::from_raw(width, height, img.to_interleaved()).ok_or(
        UpscaleError::InvalidDimensions {
            width: img.width(),
            height: img.height(),
        },
    )
}

/// Loads an image from disk and converts it to an RGB owned image.
pub fn load_rgb_image<P: AsRef<Path>>(path: P) -> UpscaleResult<OwnedImage> {
    let img = image::open(path).map_err(|err| UpscaleError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}

/// Writes an image to disk; the format is chosen from the path extension.
pub fn save_rgb_image<P: AsRef<Path>>(img: &OwnedImage, path: P) -> UpscaleResult<()> {
    to_rgb_image(img)?
        .save(path)
        .map_err(|err| UpscaleError::ImageIo {
            reason: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::{owned_from_rgb_image, to_rgb_image};
    use crate::image::OwnedImage;

    #[test]
    fn rgb_image_conversion_preserves_pixels() {
        let img = OwnedImage::new(vec![[1, 2, 3], [4, 5, 6]], 1, 2).unwrap();
        let rgb = to_rgb_image(&img).unwrap();
        assert_eq!(rgb.get_pixel(0, 1).0, [4, 5, 6]);
        assert_eq!(owned_from_rgb_image(&rgb).unwrap(), img);
    }
}
