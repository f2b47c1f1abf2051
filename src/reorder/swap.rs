//! In-flight column swaps and their completion queue.

use std::collections::VecDeque;

use serde::Serialize;

use crate::types::StorageCoordinate;

/// Unordered pair of grid column indices with a swap in flight.
///
/// Stored as `(min, max)` so `{a, b}` and `{b, a}` compare and hash equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SwapRecord {
    low: u32,
    high: u32,
}

impl SwapRecord {
    /// `None` for the degenerate pair `{a, a}`.
    pub fn new(a: u32, b: u32) -> Option<Self> {
        if a == b {
            return None;
        }
        Some(Self {
            low: a.min(b),
            high: a.max(b),
        })
    }

    pub fn first(&self) -> u32 {
        self.low
    }

    pub fn second(&self) -> u32 {
        self.high
    }

    /// Apply the transposition to a column index.
    pub fn apply(&self, index: u32) -> u32 {
        if index == self.low {
            self.high
        } else if index == self.high {
            self.low
        } else {
            index
        }
    }
}

/// A submitted visual swap awaiting its completion callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PendingSwap {
    /// Drag session that submitted the swap
    pub session: u64,
    pub record: SwapRecord,
    pub source: StorageCoordinate,
    pub destination: StorageCoordinate,
    /// Grid column of `source`
    pub source_column: u32,
    /// Grid column of `destination`
    pub destination_column: u32,
}

/// FIFO of submitted swaps; completions fire in submission order.
#[derive(Debug, Default)]
pub struct SwapQueue {
    pending: VecDeque<PendingSwap>,
}

impl SwapQueue {
    pub fn push(&mut self, swap: PendingSwap) {
        self.pending.push_back(swap);
    }

    pub fn pop(&mut self) -> Option<PendingSwap> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &PendingSwap> + '_ {
        self.pending.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_unordered_equality() {
        assert_eq!(SwapRecord::new(2, 4), SwapRecord::new(4, 2));
        assert_eq!(SwapRecord::new(3, 3), None);
    }

    #[test]
    fn test_no_collisions_past_single_digits() {
        // first * 10 + second would map {0, 22} and {1, 12} to the same bucket
        let mut set = HashSet::new();
        for a in 0..30 {
            for b in (a + 1)..30 {
                assert!(set.insert(SwapRecord::new(a, b)));
            }
        }
        assert!(!set.insert(SwapRecord::new(12, 1)));
    }

    #[test]
    fn test_apply_is_transposition() {
        let record = SwapRecord::new(1, 5).unwrap();
        assert_eq!(record.apply(1), 5);
        assert_eq!(record.apply(5), 1);
        assert_eq!(record.apply(3), 3);
    }
}
