//! Set-associative cache simulator.
//!
//! Models a single cache level in front of a nominal lower level that does
//! not actually exist: miss fills install a zeroed line and writebacks only
//! bump a counter. What is modelled faithfully:
//! 1. **Address decoding:** offset / index / tag split from the configured
//!    geometry; fully-associative collapses the index to zero.
//! 2. **Lookup:** tag match over the ways of one set.
//! 3. **Write policies:** write-through vs write-back, with write-allocate
//!    on store misses.
//! 4. **Victim selection:** an invalid way first, otherwise the configured
//!    replacement policy picks among valid lines.

/// Replacement policy implementations.
pub mod policies;

use tracing::{debug, trace};

use crate::common::error::{Result, SimError};
use crate::config::{CacheConfig, CacheMapping, CacheReplacement, WritePolicy};

use policies::{FifoPolicy, LfuPolicy, LruPolicy, RandomPolicy};

pub use policies::ReplacementPolicy;

/// One cache line plus the metadata the replacement policies read.
#[derive(Debug, Clone, Default)]
pub struct CacheLine {
    /// Line holds a meaningful tag and data.
    pub valid: bool,
    /// Line was written under write-back and not yet flushed.
    pub dirty: bool,
    /// Tag bits of the resident block's address.
    pub tag: u32,
    /// Block data, `line_size` bytes.
    pub data: Vec<u8>,
    /// Cache-global timestamp of the most recent access.
    pub access_time: u64,
    /// Cache-global timestamp of the fill that installed this block.
    pub load_time: u64,
    /// Number of accesses since the fill.
    pub access_count: u64,
}

/// The three bit-fields of a decoded cache address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheAddress {
    /// Tag bits.
    pub tag: u32,
    /// Set index.
    pub index: u32,
    /// Byte offset within the line.
    pub offset: u32,
}

/// Monotonic counters accumulated by the cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// All read and write operations.
    pub total_accesses: u64,
    /// Accesses that found their tag resident.
    pub hits: u64,
    /// Accesses that had to install a line.
    pub misses: u64,
    /// Read operations.
    pub reads: u64,
    /// Write operations.
    pub writes: u64,
    /// Dirty evictions and flushes under write-back.
    pub writebacks: u64,
}

impl CacheStats {
    /// Fraction of accesses that hit; zero before any access.
    pub fn hit_rate(&self) -> f64 {
        if self.total_accesses == 0 {
            0.0
        } else {
            self.hits as f64 / self.total_accesses as f64
        }
    }

    /// Complement of [`Self::hit_rate`] once at least one access happened.
    pub fn miss_rate(&self) -> f64 {
        if self.total_accesses == 0 {
            0.0
        } else {
            self.misses as f64 / self.total_accesses as f64
        }
    }
}

/// A configurable set-associative cache.
pub struct Cache {
    config: CacheConfig,
    mapping: CacheMapping,
    sets: Vec<Vec<CacheLine>>,
    policy: Box<dyn ReplacementPolicy + Send + Sync>,
    offset_bits: u32,
    index_bits: u32,
    current_time: u64,
    stats: CacheStats,
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("config", &self.config)
            .field("mapping", &self.mapping)
            .field("current_time", &self.current_time)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Cache {
    /// Builds a cache from a validated configuration, all lines invalid.
    ///
    /// # Errors
    ///
    /// Propagates [`SimError::InvalidParam`] from [`CacheConfig::validate`].
    pub fn new(config: CacheConfig) -> Result<Self> {
        config.validate()?;

        let mapping = config.effective_mapping();
        let (num_sets, ways) = match mapping {
            CacheMapping::FullyAssociative => (1, config.num_lines()),
            _ => (config.num_sets(), config.associativity),
        };

        let line = CacheLine {
            data: vec![0; config.line_size as usize],
            ..CacheLine::default()
        };
        let sets = vec![vec![line; ways as usize]; num_sets as usize];

        let policy: Box<dyn ReplacementPolicy + Send + Sync> = match config.replacement {
            CacheReplacement::Lru => Box::new(LruPolicy),
            CacheReplacement::Fifo => Box::new(FifoPolicy),
            CacheReplacement::Random => Box::new(RandomPolicy::default()),
            CacheReplacement::Lfu => Box::new(LfuPolicy),
        };

        Ok(Self {
            offset_bits: config.line_size.trailing_zeros(),
            index_bits: num_sets.trailing_zeros(),
            config,
            mapping,
            sets,
            policy,
            current_time: 0,
            stats: CacheStats::default(),
        })
    }

    /// Builds a cache with a caller-supplied replacement policy.
    ///
    /// Geometry still comes from `config`; its `replacement` field is ignored.
    ///
    /// # Errors
    ///
    /// Propagates [`SimError::InvalidParam`] from [`CacheConfig::validate`].
    pub fn with_policy(
        config: CacheConfig,
        policy: Box<dyn ReplacementPolicy + Send + Sync>,
    ) -> Result<Self> {
        let mut cache = Self::new(config)?;
        cache.policy = policy;
        Ok(cache)
    }

    /// Returns the resolved mapping mode.
    pub const fn mapping(&self) -> CacheMapping {
        self.mapping
    }

    /// Returns the configuration the cache was built from.
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Splits `address` into tag / index / offset fields.
    pub const fn decode(&self, address: u32) -> CacheAddress {
        CacheAddress {
            offset: address & (self.config.line_size - 1),
            index: (address >> self.offset_bits) & ((1 << self.index_bits) - 1),
            tag: address >> (self.offset_bits + self.index_bits),
        }
    }

    /// Reports whether the block containing `address` is resident, without
    /// touching statistics or metadata.
    pub fn contains(&self, address: u32) -> bool {
        let addr = self.decode(address);
        self.sets[addr.index as usize]
            .iter()
            .any(|line| line.valid && line.tag == addr.tag)
    }

    /// Reads `buf.len()` bytes at `address`.
    ///
    /// Returns `true` on a hit. On a miss the block is installed zero-filled
    /// (there is no backing store), so the bytes read reflect only data
    /// previously written through this cache.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidParam`] when the requested span is empty or crosses
    /// the end of the line.
    pub fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<bool> {
        let addr = self.check_span(address, buf.len())?;

        self.stats.total_accesses += 1;
        self.stats.reads += 1;

        let set = addr.index as usize;
        if let Some(way) = self.lookup(set, addr.tag) {
            self.stats.hits += 1;
            self.touch(set, way, false);
            let line = &self.sets[set][way];
            buf.copy_from_slice(&line.data[addr.offset as usize..][..buf.len()]);
            trace!(address, set, tag = addr.tag, "cache read hit");
            return Ok(true);
        }

        self.stats.misses += 1;
        let way = self.install(set, addr.tag);
        self.touch(set, way, true);
        let line = &self.sets[set][way];
        buf.copy_from_slice(&line.data[addr.offset as usize..][..buf.len()]);
        trace!(address, set, tag = addr.tag, "cache read miss");
        Ok(false)
    }

    /// Writes `buf` at `address` with write-allocate semantics.
    ///
    /// Returns `true` on a hit. Under write-through the (nominal) lower level
    /// is updated immediately and the line stays clean; under write-back the
    /// line is marked dirty.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidParam`] when the requested span is empty or crosses
    /// the end of the line.
    pub fn write(&mut self, address: u32, buf: &[u8]) -> Result<bool> {
        let addr = self.check_span(address, buf.len())?;

        self.stats.total_accesses += 1;
        self.stats.writes += 1;

        let set = addr.index as usize;
        let (way, hit) = match self.lookup(set, addr.tag) {
            Some(way) => {
                self.stats.hits += 1;
                (way, true)
            }
            None => {
                self.stats.misses += 1;
                (self.install(set, addr.tag), false)
            }
        };

        self.touch(set, way, !hit);
        let dirty = self.config.write_policy == WritePolicy::WriteBack;
        let line = &mut self.sets[set][way];
        line.data[addr.offset as usize..][..buf.len()].copy_from_slice(buf);
        line.dirty = dirty;
        trace!(address, set, tag = addr.tag, hit, "cache write");
        Ok(hit)
    }

    /// Writes back every dirty line (counter only; there is no lower level)
    /// and invalidates the whole cache. Statistics are kept.
    pub fn flush(&mut self) {
        let mut flushed = 0_u64;
        for set in &mut self.sets {
            for line in set.iter_mut() {
                if line.valid && line.dirty && self.config.write_policy == WritePolicy::WriteBack {
                    self.stats.writebacks += 1;
                    flushed += 1;
                }
                line.valid = false;
                line.dirty = false;
            }
        }
        debug!(flushed, "cache flushed");
    }

    /// Clears the counters and the global timestamp; line state is kept so a
    /// measurement phase can start against a warm cache.
    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
        self.current_time = 0;
    }

    /// Returns a snapshot of the accumulated counters.
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }

    fn check_span(&self, address: u32, len: usize) -> Result<CacheAddress> {
        let addr = self.decode(address);
        if len == 0 || addr.offset as usize + len > self.config.line_size as usize {
            return Err(SimError::InvalidParam(format!(
                "access of {len} bytes at line offset {} exceeds the {}-byte line",
                addr.offset, self.config.line_size
            )));
        }
        Ok(addr)
    }

    fn lookup(&self, set: usize, tag: u32) -> Option<usize> {
        self.sets[set]
            .iter()
            .position(|line| line.valid && line.tag == tag)
    }

    /// Selects a way for `tag` in `set`, evicting if every way is valid, and
    /// installs a zero-filled clean line.
    fn install(&mut self, set: usize, tag: u32) -> usize {
        let way = match self.sets[set].iter().position(|line| !line.valid) {
            Some(free) => free,
            None => {
                let victim = self.policy.select_victim(&self.sets[set]);
                let line = &self.sets[set][victim];
                if line.dirty && self.config.write_policy == WritePolicy::WriteBack {
                    self.stats.writebacks += 1;
                }
                debug!(set, victim, evicted_tag = line.tag, "cache eviction");
                victim
            }
        };

        let line = &mut self.sets[set][way];
        line.data.fill(0);
        line.valid = true;
        line.dirty = false;
        line.tag = tag;
        line.access_count = 0;
        way
    }

    /// Advances the cache clock and stamps the line's metadata; `fill`
    /// additionally records the load time (the one field FIFO keys on, which
    /// hits must not refresh).
    fn touch(&mut self, set: usize, way: usize, fill: bool) {
        self.current_time += 1;
        let line = &mut self.sets[set][way];
        line.access_time = self.current_time;
        if fill {
            line.load_time = self.current_time;
        }
        line.access_count += 1;
    }
}
