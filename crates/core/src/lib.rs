//! Teaching simulators for a hypothetical 32-bit RISC machine.
//!
//! This crate implements the four subsystems studied in an undergraduate
//! computer-organization course, each self-contained and driven synchronously:
//! 1. **Cache:** Set-associative lookup, write policies, and victim selection.
//! 2. **Virtual memory:** TLB plus page table translation with FIFO/LRU/OPT/Clock
//!    page replacement.
//! 3. **Pipeline:** Five-stage in-order execution with hazard detection, data
//!    forwarding, and a two-bit branch predictor over a small MIPS-like subset.
//! 4. **Bus:** Multi-device arbitration across five strategies plus timed
//!    transfers.
//!
//! The subsystems share a common layer (addresses, error kinds, constants),
//! a configuration layer, and a set of leaf units (ALU, register file, word
//! memory, PRNG) but are otherwise independent; there is no cross-subsystem
//! runtime.

/// Common types and constants (addresses, errors, system limits).
pub mod common;
/// Simulator configuration (defaults, enums, per-subsystem config structures).
pub mod config;
/// Bus model (devices, arbiter, timed transfers).
pub mod bus;
/// Set-associative cache (address decoding, replacement policies, statistics).
pub mod cache;
/// Instruction set (MIPS-like subset decode and categories).
pub mod isa;
/// Five-stage pipeline (latches, control, stages, branch prediction).
pub mod pipeline;
/// Leaf hardware units (ALU, register file, word memory, PRNG).
pub mod units;
/// Virtual memory (page table, TLB, page replacement, timing model).
pub mod vm;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Error kind shared across all subsystems.
pub use crate::common::error::{Result, SimError};
/// The four subsystem entry points.
pub use crate::bus::Bus;
pub use crate::cache::Cache;
pub use crate::pipeline::Pipeline;
pub use crate::vm::VirtualMemory;
