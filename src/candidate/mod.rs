//! Fixed-capacity candidate ranking for a single query pixel.

pub(crate) mod set;
