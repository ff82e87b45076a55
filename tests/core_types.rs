use patchscale::lowlevel::build_reference;
use patchscale::{ImageView, OwnedImage, Rgb, UpscaleError};

fn gray(values: impl IntoIterator<Item = u8>) -> Vec<Rgb> {
    values.into_iter().map(|v| [v, v, v]).collect()
}

#[test]
fn image_view_rejects_invalid_dimensions() {
    let data = gray([0u8; 4]);

    let err = ImageView::from_slice(&data, 0, 1).err().unwrap();
    assert_eq!(
        err,
        UpscaleError::InvalidDimensions {
            width: 0,
            height: 1,
        }
    );

    let err = ImageView::from_slice(&data, 1, 0).err().unwrap();
    assert_eq!(
        err,
        UpscaleError::InvalidDimensions {
            width: 1,
            height: 0,
        }
    );
}

#[test]
fn image_view_rejects_invalid_stride_and_small_buffer() {
    let data = gray([0u8; 8]);
    let err = ImageView::new(&data, 4, 1, 3).err().unwrap();
    assert_eq!(
        err,
        UpscaleError::InvalidStride {
            width: 4,
            stride: 3,
        }
    );

    let short = gray([0u8; 3]);
    let err = ImageView::new(&short, 2, 2, 2).err().unwrap();
    assert_eq!(err, UpscaleError::BufferTooSmall { needed: 4, got: 3 });
}

#[test]
fn strided_view_reads_padded_rows() {
    let data = gray(0u8..16);
    let view = ImageView::new(&data[5..], 2, 2, 4).unwrap();

    assert_eq!(view.width(), 2);
    assert_eq!(view.stride(), 4);
    assert_eq!(view.row(0).unwrap(), &gray([5, 6])[..]);
    assert_eq!(view.row(1).unwrap(), &gray([9, 10])[..]);
    assert_eq!(view.get(0, 0).copied(), Some([5; 3]));
    assert!(view.get(2, 0).is_none());
    assert!(view.row(2).is_none());
}

#[test]
fn owned_image_rejects_mismatched_buffers() {
    assert_eq!(
        OwnedImage::new(gray([1u8; 5]), 2, 3).unwrap_err(),
        UpscaleError::BufferTooSmall { needed: 6, got: 5 }
    );
    assert_eq!(
        OwnedImage::new(gray([1u8; 7]), 2, 3).unwrap_err(),
        UpscaleError::InvalidDimensions {
            width: 2,
            height: 3
        }
    );
}

#[test]
fn reference_downsamples_strided_view() {
    let data = gray(0u8..36);
    // Bottom-right 4x4 corner of a 6x6 image.
    let corner = ImageView::new(&data[14..], 4, 4, 6).unwrap();

    let reference = build_reference(corner, 2).unwrap();
    assert_eq!((reference.width(), reference.height()), (2, 2));
    // Block {14, 15, 20, 21} -> (70 + 2) / 4 = 18.
    assert_eq!(reference.pixel(0, 0), Some([18; 3]));
    // Block {28, 29, 34, 35} -> (126 + 2) / 4 = 32.
    assert_eq!(reference.pixel(1, 1), Some([32; 3]));
}

#[test]
fn reference_by_three_averages_nine_pixels() {
    let data = gray((0u8..9).map(|v| v * 10));
    let img = OwnedImage::new(data, 3, 3).unwrap();
    let reference = build_reference(img.view(), 3).unwrap();
    assert_eq!(reference.data(), &[[40; 3]]);
}
