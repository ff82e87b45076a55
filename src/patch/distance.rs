//! Weighted patch dissimilarity between the full and reference images.

use crate::image::{ImageView, Rgb, CHANNELS};
use crate::patch::PatchPlan;

/// Sum of absolute channel differences between two single pixels.
#[inline]
pub fn center_difference(a: Rgb, b: Rgb) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(&p, &q)| u32::from(p.abs_diff(q)))
        .sum()
}

/// Weighted L1 distance between the patch around `query` in `full` and the
/// patch around `candidate` in `reference`.
///
/// Every offset inside the square patch contributes
/// `weight[ring] * |reference - full|` per channel, with `ring` the Chebyshev
/// distance of the offset from the center.
///
/// Both centers must lie at least `plan.padding()` pixels away from every edge
/// of their image. This is not checked in release builds; `SearchWindow` and
/// the interior row range of the upscaler establish it before any call.
#[inline]
pub fn patch_distance(
    full: ImageView<'_, Rgb>,
    reference: ImageView<'_, Rgb>,
    query: (usize, usize),
    candidate: (usize, usize),
    plan: &PatchPlan,
) -> u64 {
    let pad = plan.padding();
    let diameter = plan.diameter();
    let (qx, qy) = query;
    let (cx, cy) = candidate;
    debug_assert!(qx >= pad && qy >= pad && qx + pad < full.width() && qy + pad < full.height());
    debug_assert!(
        cx >= pad && cy >= pad && cx + pad < reference.width() && cy + pad < reference.height()
    );

    let table = plan.table();
    let mut dist = 0u64;
    for ty in 0..diameter {
        let ref_row = &reference.row_at(cy + ty - pad)[cx - pad..cx - pad + diameter];
        let full_row = &full.row_at(qy + ty - pad)[qx - pad..qx - pad + diameter];
        let weights = &table[ty * diameter..(ty + 1) * diameter];
        for ((r, f), &w) in ref_row.iter().zip(full_row).zip(weights) {
            let mut d = 0u32;
            for c in 0..CHANNELS {
                d += u32::from(r[c].abs_diff(f[c]));
            }
            dist += u64::from(d) * u64::from(w);
        }
    }
    dist
}

#[cfg(test)]
mod tests {
    use super::{center_difference, patch_distance};
    use crate::image::OwnedImage;
    use crate::patch::{ContextWeights, PatchPlan};

    fn ramp(width: usize, height: usize) -> OwnedImage {
        let data = (0..width * height)
            .map(|i| {
                let v = (i * 7 % 251) as u8;
                [v, v / 2, 255 - v]
            })
            .collect();
        OwnedImage::new(data, width, height).unwrap()
    }

    #[test]
    fn center_difference_sums_channels() {
        assert_eq!(center_difference([10, 20, 30], [13, 18, 30]), 5);
        assert_eq!(center_difference([0, 0, 0], [255, 255, 255]), 765);
    }

    #[test]
    fn identical_patches_have_zero_distance() {
        let img = ramp(7, 6);
        let plan = PatchPlan::new(ContextWeights::uniform(5).unwrap());
        assert_eq!(patch_distance(img.view(), img.view(), (3, 2), (3, 2), &plan), 0);
    }

    #[test]
    fn distance_weights_offsets_by_ring() {
        let mut data = vec![[0u8; 3]; 9];
        let full = OwnedImage::new(data.clone(), 3, 3).unwrap();
        // One unit of difference at the center and one on the outer ring.
        data[4] = [1, 0, 0];
        data[0] = [0, 0, 2];
        let reference = OwnedImage::new(data, 3, 3).unwrap();
        let plan = PatchPlan::new(ContextWeights::normalized(&[3, 5], 3).unwrap());
        // center: 1 * (3 * 8), corner: 2 * (5 * 1)
        let dist = patch_distance(full.view(), reference.view(), (1, 1), (1, 1), &plan);
        assert_eq!(dist, 24 + 10);
    }

    #[test]
    fn distance_matches_direct_formula() {
        let full = ramp(9, 8);
        let reference = ramp(5, 4);
        let plan = PatchPlan::new(ContextWeights::normalized(&[2, 3], 3).unwrap());
        let weights = plan.weights().as_slice().to_vec();

        let (qx, qy, cx, cy) = (4usize, 5usize, 2usize, 2usize);
        let mut expected = 0u64;
        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                let ring = dy.unsigned_abs().max(dx.unsigned_abs()) as usize;
                let f = full
                    .pixel((qx as i64 + dx) as usize, (qy as i64 + dy) as usize)
                    .unwrap();
                let r = reference
                    .pixel((cx as i64 + dx) as usize, (cy as i64 + dy) as usize)
                    .unwrap();
                for c in 0..3 {
                    expected += u64::from(weights[ring]) * u64::from(f[c].abs_diff(r[c]));
                }
            }
        }
        let got = patch_distance(full.view(), reference.view(), (qx, qy), (cx, cy), &plan);
        assert_eq!(got, expected);
    }
}
