//! Top-K lowest-distance candidates with worst-slot replacement.
//!
//! Slots start at a sentinel distance above any reachable patch distance.
//! A new candidate replaces the tracked worst slot only when strictly
//! closer, then the worst slot is found again with a linear rescan. The scan
//! is `O(k)` per replacement, which is cheaper than heap bookkeeping for the
//! small `k` this is used with; a bounded max-heap would be the choice for
//! large `k`.

/// Distance stored in slots that were never filled.
pub const SENTINEL_DISTANCE: u64 = u64::MAX;

/// Reference-image location with its patch distance to the query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// X coordinate (column) in the reference image.
    pub x: usize,
    /// Y coordinate (row) in the reference image.
    pub y: usize,
    /// Weighted patch distance to the query pixel.
    pub distance: u64,
}

impl Candidate {
    const EMPTY: Candidate = Candidate {
        x: usize::MAX,
        y: usize::MAX,
        distance: SENTINEL_DISTANCE,
    };

    /// Returns true when this slot holds a real match.
    pub fn is_filled(&self) -> bool {
        self.distance != SENTINEL_DISTANCE
    }
}

/// Fixed-capacity set of the best candidates seen so far.
#[derive(Clone, Debug)]
pub struct CandidateSet {
    slots: Vec<Candidate>,
    worst: usize,
}

impl CandidateSet {
    /// Creates a set with `k` empty slots.
    pub fn new(k: usize) -> Self {
        Self {
            slots: vec![Candidate::EMPTY; k],
            worst: 0,
        }
    }

    /// Returns the number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Distance a candidate must beat to be admitted.
    pub fn worst_distance(&self) -> u64 {
        self.slots
            .get(self.worst)
            .map_or(SENTINEL_DISTANCE, |slot| slot.distance)
    }

    /// Offers a candidate; returns true if it was admitted.
    ///
    /// Ties with the current worst are rejected, so among equal distances
    /// the first one offered is kept. A zero-capacity set rejects everything.
    pub fn offer(&mut self, x: usize, y: usize, distance: u64) -> bool {
        if self.slots.is_empty() || distance >= self.worst_distance() {
            return false;
        }
        self.slots[self.worst] = Candidate { x, y, distance };
        let mut worst = self.worst;
        for (idx, slot) in self.slots.iter().enumerate() {
            if slot.distance > self.slots[worst].distance {
                worst = idx;
            }
        }
        self.worst = worst;
        true
    }

    /// Returns all slots, including empty ones.
    pub fn slots(&self) -> &[Candidate] {
        &self.slots
    }

    /// Iterates over the filled slots in slot order.
    pub fn filled(&self) -> impl Iterator<Item = &Candidate> + '_ {
        self.slots.iter().filter(|slot| slot.is_filled())
    }

    /// Returns the number of filled slots.
    pub fn len(&self) -> usize {
        self.filled().count()
    }

    /// Returns true when no candidate was admitted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
