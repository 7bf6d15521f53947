//! Leaf hardware units consumed by the simulator cores.
//!
//! These are the straightforward components the cores build on:
//! 1. **ALU:** 32-bit arithmetic/logic with condition flags.
//! 2. **Register file:** 32 general registers with hardwired r0.
//! 3. **Word memory:** Bounds- and alignment-checked 32-bit storage.
//! 4. **PRNG:** Deterministic xorshift for random replacement.

/// Arithmetic logic unit.
pub mod alu;

/// Word-addressable memory.
pub mod memory;

/// General-purpose register file.
pub mod regfile;

/// Pseudo-random number generation.
pub mod rng;

pub use alu::{Alu, AluFlags, AluOp};
pub use memory::WordMemory;
pub use regfile::RegisterFile;
pub use rng::Xorshift32;
