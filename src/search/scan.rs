//! Pruned top-K scan over a search window.

use crate::candidate::set::CandidateSet;
use crate::image::{ImageView, Rgb};
use crate::patch::{center_difference, patch_distance, PatchPlan};
use crate::search::window::SearchWindow;
use crate::search::SearchParams;

/// Finds the `params.top_k` reference locations whose patches best match the
/// patch around `query` in `full`.
///
/// The window is centered on `query / scale`, extended by
/// `params.half_extent`, and clipped so every candidate patch fits inside
/// `reference`. Candidates whose center pixel differs from the query pixel by
/// `params.stop_threshold` or more (summed over channels) are skipped before
/// the weighted distance is computed.
///
/// `query` must be at least `plan.padding()` pixels from every edge of `full`.
pub fn search_candidates(
    full: ImageView<'_, Rgb>,
    reference: ImageView<'_, Rgb>,
    query: (usize, usize),
    plan: &PatchPlan,
    params: SearchParams,
) -> CandidateSet {
    let window = SearchWindow::for_query(
        query,
        params.scale,
        params.half_extent,
        plan.padding(),
        reference.width(),
        reference.height(),
    );
    scan_window(full, reference, query, &window, plan, params)
}

/// Scans an already clipped window.
pub fn scan_window(
    full: ImageView<'_, Rgb>,
    reference: ImageView<'_, Rgb>,
    query: (usize, usize),
    window: &SearchWindow,
    plan: &PatchPlan,
    params: SearchParams,
) -> CandidateSet {
    let mut set = CandidateSet::new(params.top_k);
    if window.is_empty() || params.top_k == 0 {
        return set;
    }

    let query_px = *full.at(query.0, query.1);
    for y in window.y_range() {
        let ref_row = reference.row_at(y);
        for x in window.x_range() {
            if center_difference(ref_row[x], query_px) >= params.stop_threshold {
                continue;
            }
            let dist = patch_distance(full, reference, query, (x, y), plan);
            set.offer(x, y, dist);
        }
    }
    set
}
