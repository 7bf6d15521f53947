//! Unit tests for the pipeline simulator.


/// Load-use stalls and the forwarding paths.
pub mod hazards;

/// Branch predictor training properties.
pub mod predictor;

/// Whole-program runs and throughput metrics.
pub mod programs;
