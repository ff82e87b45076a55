//! Search window construction and clipping.

/// Inclusive rectangle of admissible candidate centers in the reference image.
///
/// Around a center `c` the window spans `c - half_extent ..= c + half_extent - 1`
/// on each axis (the upper side is exclusive), so a zero extent yields an
/// empty window. Construction clips the rectangle so that a patch of radius `padding`
/// around any center inside it stays within the reference image. This is the
/// single bounds check for the distance loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchWindow {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
    empty: bool,
}

impl SearchWindow {
    /// Builds the window around `center` (already in reference coordinates).
    pub fn new(
        center: (usize, usize),
        half_extent: usize,
        padding: usize,
        ref_width: usize,
        ref_height: usize,
    ) -> Self {
        let (cx, cy) = center;
        let axis = |c: usize, dim: usize| -> Option<(usize, usize)> {
            let max = dim.checked_sub(padding + 1)?;
            let lo = c.saturating_sub(half_extent).max(padding);
            let hi = c.saturating_add(half_extent).checked_sub(1)?.min(max);
            (lo <= hi).then_some((lo, hi))
        };
        match (axis(cx, ref_width), axis(cy, ref_height)) {
            (Some((x0, x1)), Some((y0, y1))) => Self {
                x0,
                y0,
                x1,
                y1,
                empty: false,
            },
            _ => Self::empty(),
        }
    }

    /// Window around a full-image query pixel mapped down by `scale`.
    pub fn for_query(
        query: (usize, usize),
        scale: usize,
        half_extent: usize,
        padding: usize,
        ref_width: usize,
        ref_height: usize,
    ) -> Self {
        let center = (query.0 / scale, query.1 / scale);
        Self::new(center, half_extent, padding, ref_width, ref_height)
    }

    fn empty() -> Self {
        Self {
            x0: 1,
            y0: 1,
            x1: 0,
            y1: 0,
            empty: true,
        }
    }

    /// Returns true when no candidate center is admissible.
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Returns the number of candidate centers in the window.
    pub fn len(&self) -> usize {
        if self.empty {
            return 0;
        }
        (self.x1 - self.x0 + 1) * (self.y1 - self.y0 + 1)
    }

    /// Returns the inclusive column range.
    pub fn x_range(&self) -> std::ops::RangeInclusive<usize> {
        self.x0..=self.x1
    }

    /// Returns the inclusive row range.
    pub fn y_range(&self) -> std::ops::RangeInclusive<usize> {
        self.y0..=self.y1
    }

    /// Iterates over candidate centers in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> {
        let xs = self.x_range();
        self.y_range()
            .flat_map(move |y| xs.clone().map(move |x| (x, y)))
    }
}
