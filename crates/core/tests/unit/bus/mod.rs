//! Unit tests for the bus simulator.

/// The five arbitration strategies.
pub mod arbitration;
