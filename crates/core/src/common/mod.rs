//! Common utilities and types shared by all four simulators.
//!
//! This module provides the fundamental building blocks the subsystems agree
//! on:
//! 1. **Address Types:** Strong types for virtual and physical addresses.
//! 2. **Constants:** Table sizes, page geometry, and device limits.
//! 3. **Error Handling:** The error kinds a caller can pattern-match on.

/// Address type definitions (physical and virtual addresses).
pub mod addr;

/// Common constants used throughout the simulators.
pub mod constants;

/// Error kinds and the crate-wide result alias.
pub mod error;

pub use addr::{PhysAddr, VirtAddr};
pub use constants::{PAGE_SHIFT, PAGE_SIZE};
pub use error::{Result, SimError};
