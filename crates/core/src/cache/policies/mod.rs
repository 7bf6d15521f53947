//! Cache replacement policies.
//!
//! Victim selection over the per-line metadata the cache maintains
//! (`access_time`, `load_time`, `access_count`). The cache only consults a
//! policy when every way in the set is valid; an invalid way is always
//! preferred before eviction.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used.
//! - `Fifo`: First-In, First-Out.
//! - `Random`: Pseudo-random selection.
//! - `Lfu`: Least Frequently Used.

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Frequently Used replacement policy.
pub mod lfu;

/// Least Recently Used replacement policy.
pub mod lru;

/// Random replacement policy.
pub mod random;

pub use fifo::FifoPolicy;
pub use lfu::LfuPolicy;
pub use lru::LruPolicy;
pub use random::RandomPolicy;

use super::CacheLine;

/// Trait for cache replacement policies.
pub trait ReplacementPolicy {
    /// Selects the way to evict from a fully valid set.
    ///
    /// # Arguments
    ///
    /// * `lines` - The ways of one set; every line is valid when this is
    ///   called.
    ///
    /// # Returns
    ///
    /// The index of the way to evict.
    fn select_victim(&mut self, lines: &[CacheLine]) -> usize;
}
