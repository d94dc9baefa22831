//! Round-Robin Replacement Policy.
//!
//! Victim selection for the associative history table. Each set keeps a pointer
//! to the next way to evict; the pointer advances on every miss in that set,
//! independent of which entries were hit in between. It does not track recency.
//!
//! # Performance
//!
//! - **Time Complexity:** O(1) per miss
//! - **Space Complexity:** O(S) where S is the number of sets
//! - **Hardware Cost:** One log2(W)-bit counter per set

/// Round-robin policy state.
#[derive(Clone, Debug)]
pub struct RoundRobinPolicy {
    /// Next way to be evicted, per set.
    next_way: Vec<usize>,
    /// Number of ways per set.
    ways: usize,
}

impl RoundRobinPolicy {
    /// Creates a policy with every pointer at way 0.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the table.
    /// * `ways` - The associativity (number of ways) of the table.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            next_way: vec![0; sets],
            ways,
        }
    }

    /// Way that the next miss in `set` will evict.
    #[inline(always)]
    pub fn peek_victim(&self, set: usize) -> usize {
        self.next_way[set]
    }

    /// Selects the victim for a miss in `set` and advances the pointer.
    #[inline(always)]
    pub fn next_victim(&mut self, set: usize) -> usize {
        let victim = self.next_way[set];
        self.next_way[set] = (victim + 1) % self.ways;
        victim
    }
}
