//! Unit tests for the cache simulator.


/// Victim selection across the replacement policies.
pub mod policies;
