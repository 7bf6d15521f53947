//! System-wide constants for the four simulators.

/// Page size in bytes (4 KiB).
pub const PAGE_SIZE: u32 = 4096;

/// Number of bits in the page offset.
pub const PAGE_SHIFT: u32 = 12;

/// Mask selecting the page-offset bits of an address.
pub const OFFSET_MASK: u32 = PAGE_SIZE - 1;

/// Upper bound on physical frames managed by the virtual-memory simulator.
pub const MAX_FRAMES: u32 = 256;

/// Number of entries in the translation lookaside buffer.
pub const TLB_SIZE: usize = 64;

/// Maximum cache associativity accepted by validation.
pub const MAX_ASSOCIATIVITY: u32 = 8;

/// Smallest supported cache line, in bytes.
pub const MIN_LINE_SIZE: u32 = 16;

/// Largest supported cache line, in bytes.
pub const MAX_LINE_SIZE: u32 = 256;

/// Minimum tag width the cache geometry must leave after the index and
/// offset fields are carved out of a 32-bit address.
pub const MIN_TAG_BITS: u32 = 8;

/// Number of architected pipeline stages.
pub const PIPELINE_STAGES: u64 = 5;

/// Instruction memory size in bytes (word-indexed internally).
pub const INSTRUCTION_MEMORY_SIZE: u32 = 4096;

/// Data memory size in bytes (word-indexed internally).
pub const DATA_MEMORY_SIZE: u32 = 4096;

/// Entries in the branch predictor's two-bit counter table.
pub const PREDICTOR_TABLE_SIZE: usize = 256;

/// Entries in the branch-target buffer.
pub const BTB_SIZE: usize = 64;

/// Safety cap on `Pipeline::run` when the caller passes a zero budget.
pub const MAX_RUN_CYCLES: u64 = 1_000_000;

/// Maximum devices attachable to one bus.
pub const MAX_BUS_DEVICES: usize = 16;

/// Sentinel meaning "no bus master" / "no arbitration winner".
pub const NO_MASTER: u8 = 0xFF;

/// Bus cycles consumed by one synchronous transfer.
pub const SYNC_TRANSFER_CYCLES: u64 = 4;

/// Bus cycles consumed by one asynchronous (handshaked) transfer.
pub const ASYNC_TRANSFER_CYCLES: u64 = 6;
