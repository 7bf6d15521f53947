//! Configuration system for the teaching simulators.
//!
//! This module defines all configuration structures and enums used to
//! parameterize the four cores. It provides:
//! 1. **Defaults:** Baseline values for each simulator (cache geometry, frame
//!    counts, timing constants, bus parameters).
//! 2. **Structures:** One config per subsystem plus an umbrella [`Config`].
//! 3. **Enums:** Mapping, replacement, write-policy, arbitration, and bus-mode
//!    selections.
//!
//! Configuration is supplied via JSON (`serde_json`) or built in code;
//! `validate()` is called by each subsystem's constructor, so a config that
//! deserialized cleanly can still be rejected at init.

use serde::Deserialize;

use crate::common::constants::{
    MAX_ASSOCIATIVITY, MAX_BUS_DEVICES, MAX_FRAMES, MAX_LINE_SIZE, MIN_LINE_SIZE, MIN_TAG_BITS,
};
use crate::common::error::{Result, SimError};

/// Default configuration constants for the simulators.
///
/// These values define the baseline setup when not explicitly overridden in
/// a JSON configuration.
mod defaults {
    /// Default cache capacity in bytes (1 KiB).
    pub const CACHE_SIZE: u32 = 1024;

    /// Default cache line size in bytes.
    pub const CACHE_LINE_SIZE: u32 = 32;

    /// Default associativity (1 way = direct-mapped).
    pub const CACHE_WAYS: u32 = 1;

    /// Default number of physical frames managed by the VM simulator.
    pub const TOTAL_FRAMES: u32 = 64;

    /// TLB access time in nanoseconds.
    pub const TLB_ACCESS_NS: u64 = 1;

    /// Main memory access time in nanoseconds.
    pub const MEMORY_ACCESS_NS: u64 = 100;

    /// Page-fault service penalty in microseconds.
    pub const FAULT_PENALTY_US: u64 = 1000;

    /// Default bus data width in bits.
    pub const BUS_DATA_WIDTH: u32 = 32;

    /// Default bus address width in bits.
    pub const BUS_ADDR_WIDTH: u32 = 32;

    /// Default bus clock frequency in MHz.
    pub const BUS_CLOCK_MHZ: u32 = 100;

    /// Default device limit per bus.
    pub const BUS_MAX_DEVICES: usize = super::MAX_BUS_DEVICES;

    /// Default arbitration timeout in bus cycles.
    pub const BUS_TIMEOUT_CYCLES: u64 = 1000;
}

/// Cache mapping mode.
///
/// `Auto` derives the mode from the configured associativity: one way is
/// direct-mapped, ways equal to the total line count is fully associative,
/// anything in between is set-associative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CacheMapping {
    /// Derive the mapping mode from the associativity.
    #[default]
    Auto,
    /// One line per set.
    #[serde(alias = "direct")]
    DirectMapped,
    /// Multiple ways per set.
    SetAssociative,
    /// A single set holding every line.
    FullyAssociative,
}

/// Cache line replacement algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CacheReplacement {
    /// Evict the least recently used line.
    #[default]
    #[serde(alias = "LRU")]
    Lru,
    /// Evict the line that was installed first. Hits do not refresh age.
    #[serde(alias = "FIFO")]
    Fifo,
    /// Evict a pseudo-randomly chosen line.
    Random,
    /// Evict the least frequently used line; ties fall to the least recent.
    #[serde(alias = "LFU")]
    Lfu,
}

/// Cache write policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WritePolicy {
    /// Stores update the cache and the (nominal) lower level immediately.
    #[default]
    WriteThrough,
    /// Stores mark the line dirty; the writeback happens at eviction.
    WriteBack,
}

/// Page replacement algorithms for the virtual-memory simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageReplacement {
    /// Evict the page resident the longest.
    #[serde(alias = "FIFO")]
    Fifo,
    /// Evict the page unused the longest.
    #[default]
    #[serde(alias = "LRU")]
    Lru,
    /// Evict the page whose next use is farthest in the future.
    ///
    /// Requires a future-reference stream; degrades to LRU without one.
    #[serde(alias = "OPT")]
    Opt,
    /// Second-chance ring walk over reference bits.
    Clock,
}

/// Bus arbitration strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArbitrationMethod {
    /// Linear scan from device 0; first requester wins (low-index bias).
    Chain,
    /// Cyclic scan from a free-running counter position.
    CounterPolling,
    /// Lowest `priority` value among requesters wins; ties by scan order.
    IndependentRequest,
    /// Cyclic scan starting after the last winner.
    #[default]
    RoundRobin,
    /// Alias semantics of independent request, kept as a distinct selection.
    Priority,
}

/// Bus signalling mode; decides the per-transfer cycle cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BusMode {
    /// Clocked transfers, 4 cycles each.
    #[default]
    Synchronous,
    /// Handshaked transfers, 6 cycles each.
    Asynchronous,
}

/// Coarse bus classification; a tag only, with no behavioural effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BusKind {
    /// CPU-to-memory-and-peripherals system bus.
    #[default]
    System,
    /// Dedicated memory bus.
    Memory,
    /// Peripheral I/O bus.
    Io,
}

/// Root configuration for the whole suite.
///
/// Each section is optional in JSON and falls back to its defaults, so an
/// empty object `{}` is a valid configuration.
///
/// # Examples
///
/// ```
/// use archlab_core::config::{CacheReplacement, Config};
///
/// let json = r#"{
///     "cache": { "size": 4096, "line_size": 64, "associativity": 4,
///                "replacement": "lru", "write_policy": "write-back" },
///     "vm":    { "total_frames": 8, "replacement": "clock" },
///     "bus":   { "arbitration": "round-robin", "mode": "synchronous" }
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.cache.associativity, 4);
/// assert_eq!(config.cache.replacement, CacheReplacement::Lru);
/// assert_eq!(config.vm.total_frames, 8);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Cache simulator configuration.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Virtual-memory simulator configuration.
    #[serde(default)]
    pub vm: VmConfig,
    /// Pipeline simulator configuration.
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Bus simulator configuration.
    #[serde(default)]
    pub bus: BusConfig,
}

/// Cache geometry and policy configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Total capacity in bytes; must be a power of two.
    #[serde(default = "CacheConfig::default_size")]
    pub size: u32,

    /// Line size in bytes; power of two within `[16, 256]`.
    #[serde(default = "CacheConfig::default_line_size")]
    pub line_size: u32,

    /// Ways per set; power of two, at most 8.
    #[serde(default = "CacheConfig::default_associativity")]
    pub associativity: u32,

    /// Mapping mode, or `auto` to derive it from the associativity.
    #[serde(default)]
    pub mapping: CacheMapping,

    /// Victim-selection algorithm.
    #[serde(default)]
    pub replacement: CacheReplacement,

    /// Store handling policy.
    #[serde(default)]
    pub write_policy: WritePolicy,
}

impl CacheConfig {
    /// Returns the default cache capacity.
    fn default_size() -> u32 {
        defaults::CACHE_SIZE
    }

    /// Returns the default line size.
    fn default_line_size() -> u32 {
        defaults::CACHE_LINE_SIZE
    }

    /// Returns the default associativity.
    fn default_associativity() -> u32 {
        defaults::CACHE_WAYS
    }

    /// Total number of lines implied by the geometry.
    #[inline]
    pub const fn num_lines(&self) -> u32 {
        self.size / self.line_size
    }

    /// Number of sets implied by the geometry.
    #[inline]
    pub const fn num_sets(&self) -> u32 {
        self.num_lines() / self.associativity
    }

    /// Checks the geometry rules.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidParam`] naming the first violated rule:
    /// non-power-of-two size/line/ways, associativity above the supported
    /// maximum, a line size outside `[16, 256]`, fewer lines than ways, or a
    /// geometry that leaves fewer than 8 tag bits.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 || !self.size.is_power_of_two() {
            return Err(SimError::InvalidParam(format!(
                "cache size {} is not a power of two",
                self.size
            )));
        }
        if !self.line_size.is_power_of_two()
            || self.line_size < MIN_LINE_SIZE
            || self.line_size > MAX_LINE_SIZE
        {
            return Err(SimError::InvalidParam(format!(
                "cache line size {} must be a power of two in [{MIN_LINE_SIZE}, {MAX_LINE_SIZE}]",
                self.line_size
            )));
        }
        if self.associativity == 0
            || !self.associativity.is_power_of_two()
            || self.associativity > MAX_ASSOCIATIVITY
        {
            return Err(SimError::InvalidParam(format!(
                "associativity {} must be a power of two in [1, {MAX_ASSOCIATIVITY}]",
                self.associativity
            )));
        }
        if self.size < self.line_size || self.num_lines() < self.associativity {
            return Err(SimError::InvalidParam(format!(
                "cache of {} bytes cannot hold {} ways of {}-byte lines",
                self.size, self.associativity, self.line_size
            )));
        }

        let offset_bits = self.line_size.trailing_zeros();
        let index_bits = self.num_sets().trailing_zeros();
        if 32 - offset_bits - index_bits < MIN_TAG_BITS {
            return Err(SimError::InvalidParam(format!(
                "geometry leaves only {} tag bits (minimum {MIN_TAG_BITS})",
                32 - offset_bits - index_bits
            )));
        }
        Ok(())
    }

    /// Resolves `Auto` mapping to a concrete mode.
    pub const fn effective_mapping(&self) -> CacheMapping {
        match self.mapping {
            CacheMapping::Auto => {
                if self.associativity == 1 {
                    CacheMapping::DirectMapped
                } else if self.associativity == self.num_lines() {
                    CacheMapping::FullyAssociative
                } else {
                    CacheMapping::SetAssociative
                }
            }
            mode => mode,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            size: defaults::CACHE_SIZE,
            line_size: defaults::CACHE_LINE_SIZE,
            associativity: defaults::CACHE_WAYS,
            mapping: CacheMapping::Auto,
            replacement: CacheReplacement::Lru,
            write_policy: WritePolicy::WriteThrough,
        }
    }
}

/// Virtual-memory simulator configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct VmConfig {
    /// Number of physical frames; `1..=256`.
    #[serde(default = "VmConfig::default_total_frames")]
    pub total_frames: u32,

    /// Page replacement algorithm.
    #[serde(default)]
    pub replacement: PageReplacement,

    /// TLB access time in nanoseconds, for the derived timing metric.
    #[serde(default = "VmConfig::default_tlb_access_ns")]
    pub tlb_access_ns: u64,

    /// Memory access time in nanoseconds.
    #[serde(default = "VmConfig::default_memory_access_ns")]
    pub memory_access_ns: u64,

    /// Page-fault service penalty in microseconds.
    #[serde(default = "VmConfig::default_fault_penalty_us")]
    pub fault_penalty_us: u64,
}

impl VmConfig {
    /// Returns the default frame count.
    fn default_total_frames() -> u32 {
        defaults::TOTAL_FRAMES
    }

    /// Returns the default TLB access time.
    fn default_tlb_access_ns() -> u64 {
        defaults::TLB_ACCESS_NS
    }

    /// Returns the default memory access time.
    fn default_memory_access_ns() -> u64 {
        defaults::MEMORY_ACCESS_NS
    }

    /// Returns the default fault penalty.
    fn default_fault_penalty_us() -> u64 {
        defaults::FAULT_PENALTY_US
    }

    /// Checks the frame-count bound.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidParam`] when `total_frames` is zero or
    /// exceeds the 256-frame maximum.
    pub fn validate(&self) -> Result<()> {
        if self.total_frames == 0 || self.total_frames > MAX_FRAMES {
            return Err(SimError::InvalidParam(format!(
                "total_frames {} must lie in [1, {MAX_FRAMES}]",
                self.total_frames
            )));
        }
        Ok(())
    }
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            total_frames: defaults::TOTAL_FRAMES,
            replacement: PageReplacement::Lru,
            tlb_access_ns: defaults::TLB_ACCESS_NS,
            memory_access_ns: defaults::MEMORY_ACCESS_NS,
            fault_penalty_us: defaults::FAULT_PENALTY_US,
        }
    }
}

/// Pipeline simulator configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineConfig {
    /// Emit a per-cycle `tracing` record of the pipeline registers.
    ///
    /// No behavioural effect.
    #[serde(default)]
    pub debug_mode: bool,
}

/// Bus simulator configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BusConfig {
    /// Bus classification tag.
    #[serde(default)]
    pub kind: BusKind,

    /// Data path width in bits.
    #[serde(default = "BusConfig::default_data_width")]
    pub data_width: u32,

    /// Address path width in bits.
    #[serde(default = "BusConfig::default_addr_width")]
    pub addr_width: u32,

    /// Clock frequency in MHz; used for the theoretical-bandwidth metric.
    #[serde(default = "BusConfig::default_clock_mhz")]
    pub clock_mhz: u32,

    /// Signalling mode (sets the per-transfer cycle cost).
    #[serde(default)]
    pub mode: BusMode,

    /// Arbitration strategy.
    #[serde(default)]
    pub arbitration: ArbitrationMethod,

    /// Device limit for this bus instance; at most 16.
    #[serde(default = "BusConfig::default_max_devices")]
    pub max_devices: usize,

    /// Arbitration timeout in cycles (recorded; no algorithm consumes it).
    #[serde(default = "BusConfig::default_timeout_cycles")]
    pub timeout_cycles: u64,
}

impl BusConfig {
    /// Returns the default data width.
    fn default_data_width() -> u32 {
        defaults::BUS_DATA_WIDTH
    }

    /// Returns the default address width.
    fn default_addr_width() -> u32 {
        defaults::BUS_ADDR_WIDTH
    }

    /// Returns the default clock frequency.
    fn default_clock_mhz() -> u32 {
        defaults::BUS_CLOCK_MHZ
    }

    /// Returns the default device limit.
    fn default_max_devices() -> usize {
        defaults::BUS_MAX_DEVICES
    }

    /// Returns the default arbitration timeout.
    fn default_timeout_cycles() -> u64 {
        defaults::BUS_TIMEOUT_CYCLES
    }

    /// Checks bus parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidParam`] for a zero or byte-misaligned data
    /// width, a zero clock, or a device limit outside `[1, 16]`.
    pub fn validate(&self) -> Result<()> {
        if self.data_width == 0 || self.data_width % 8 != 0 {
            return Err(SimError::InvalidParam(format!(
                "bus data width {} must be a non-zero multiple of 8 bits",
                self.data_width
            )));
        }
        if self.clock_mhz == 0 {
            return Err(SimError::InvalidParam(
                "bus clock frequency must be non-zero".into(),
            ));
        }
        if self.max_devices == 0 || self.max_devices > MAX_BUS_DEVICES {
            return Err(SimError::InvalidParam(format!(
                "max_devices {} must lie in [1, {MAX_BUS_DEVICES}]",
                self.max_devices
            )));
        }
        Ok(())
    }
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            kind: BusKind::System,
            data_width: defaults::BUS_DATA_WIDTH,
            addr_width: defaults::BUS_ADDR_WIDTH,
            clock_mhz: defaults::BUS_CLOCK_MHZ,
            mode: BusMode::Synchronous,
            arbitration: ArbitrationMethod::RoundRobin,
            max_devices: defaults::BUS_MAX_DEVICES,
            timeout_cycles: defaults::BUS_TIMEOUT_CYCLES,
        }
    }
}
