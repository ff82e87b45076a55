use patchscale::lowlevel::{
    build_reference, center_difference, patch_distance, search_candidates, SearchParams,
    SearchWindow,
};
use patchscale::{ContextWeights, OwnedImage, PatchPlan};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_image(rng: &mut StdRng, width: usize, height: usize) -> OwnedImage {
    let data = (0..width * height)
        .map(|_| {
            [
                rng.random_range(0..=255),
                rng.random_range(0..=255),
                rng.random_range(0..=255),
            ]
        })
        .collect();
    OwnedImage::new(data, width, height).unwrap()
}

/// Every admissible (in-window, not pruned) candidate with its distance.
fn brute_force(
    full: &OwnedImage,
    reference: &OwnedImage,
    query: (usize, usize),
    plan: &PatchPlan,
    params: SearchParams,
) -> Vec<(usize, usize, u64)> {
    let window = SearchWindow::for_query(
        query,
        params.scale,
        params.half_extent,
        plan.padding(),
        reference.width(),
        reference.height(),
    );
    let query_px = full.pixel(query.0, query.1).unwrap();
    let mut out = Vec::new();
    for (x, y) in window.iter() {
        let px = reference.pixel(x, y).unwrap();
        if center_difference(px, query_px) >= params.stop_threshold {
            continue;
        }
        let dist = patch_distance(full.view(), reference.view(), query, (x, y), plan);
        out.push((x, y, dist));
    }
    out
}

#[test]
fn retained_candidates_dominate_the_rest() {
    let mut rng = StdRng::seed_from_u64(7);
    let full = random_image(&mut rng, 28, 22);
    let reference = build_reference(full.view(), 2).unwrap();
    let plan = PatchPlan::new(ContextWeights::normalized(&[3, 2, 1], 5).unwrap());
    let params = SearchParams {
        scale: 2,
        half_extent: 4,
        stop_threshold: 300,
        top_k: 4,
    };

    let pad = plan.padding();
    for y in pad..full.height() - pad {
        for x in pad..full.width() - pad {
            let set = search_candidates(full.view(), reference.view(), (x, y), &plan, params);
            let all = brute_force(&full, &reference, (x, y), &plan, params);

            let kept: Vec<_> = set.filled().copied().collect();
            assert_eq!(kept.len(), all.len().min(params.top_k));

            let worst_kept = kept.iter().map(|c| c.distance).max().unwrap_or(0);
            for &(cx, cy, dist) in &all {
                let retained = kept.iter().any(|c| c.x == cx && c.y == cy);
                if retained {
                    assert_eq!(
                        kept.iter().find(|c| c.x == cx && c.y == cy).unwrap().distance,
                        dist
                    );
                } else {
                    assert!(worst_kept <= dist, "query ({x}, {y}): {worst_kept} > {dist}");
                }
            }
        }
    }
}

#[test]
fn ties_keep_the_first_candidate_in_scan_order() {
    // Flat image: every candidate has distance zero.
    let full = OwnedImage::new(vec![[90, 90, 90]; 16 * 16], 16, 16).unwrap();
    let reference = build_reference(full.view(), 2).unwrap();
    let plan = PatchPlan::new(ContextWeights::uniform(3).unwrap());
    let params = SearchParams {
        scale: 2,
        half_extent: 2,
        stop_threshold: 10,
        top_k: 1,
    };
    let set = search_candidates(full.view(), reference.view(), (8, 8), &plan, params);
    let best = set.filled().next().copied().unwrap();
    // Window around (4, 4) with extent 2 starts at (2, 2).
    assert_eq!((best.x, best.y, best.distance), (2, 2, 0));
}

#[test]
fn window_never_reaches_reference_edges() {
    let mut rng = StdRng::seed_from_u64(11);
    let full = random_image(&mut rng, 20, 14);
    let reference = build_reference(full.view(), 2).unwrap();
    let plan = PatchPlan::new(ContextWeights::uniform(5).unwrap());
    let pad = plan.padding();
    let params = SearchParams {
        scale: 2,
        half_extent: 100,
        stop_threshold: 800,
        top_k: 8,
    };
    for (x, y) in [(2, 2), (17, 2), (2, 11), (17, 11)] {
        let set = search_candidates(full.view(), reference.view(), (x, y), &plan, params);
        for c in set.filled() {
            assert!(c.x >= pad && c.x + pad < reference.width());
            assert!(c.y >= pad && c.y + pad < reference.height());
        }
    }
}
