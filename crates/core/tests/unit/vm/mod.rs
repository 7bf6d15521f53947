//! Unit tests for the virtual-memory simulator.


/// TLB lookup, update, eviction and invalidation.
pub mod tlb;
