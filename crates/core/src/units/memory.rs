//! Word-addressable memory.
//!
//! A flat byte-sized region accessed in aligned 32-bit words. The pipeline
//! uses two instances (instruction and data memory); both raise errors for
//! misaligned or out-of-range addresses instead of wrapping.

use crate::common::error::{Result, SimError};

/// A bounds- and alignment-checked word memory.
#[derive(Debug, Clone)]
pub struct WordMemory {
    words: Vec<u32>,
    size_bytes: u32,
}

impl WordMemory {
    /// Creates a zeroed memory of `size_bytes` bytes (rounded down to whole
    /// words).
    pub fn new(size_bytes: u32) -> Self {
        Self {
            words: vec![0; (size_bytes / 4) as usize],
            size_bytes,
        }
    }

    /// Returns the capacity in bytes.
    #[inline]
    pub const fn size_bytes(&self) -> u32 {
        self.size_bytes
    }

    /// Returns the capacity in words.
    #[inline]
    pub fn size_words(&self) -> u32 {
        self.words.len() as u32
    }

    /// Reads the aligned word at byte address `addr`.
    ///
    /// # Errors
    ///
    /// [`SimError::MisalignedAddress`] when `addr` is not word-aligned;
    /// [`SimError::AddressOutOfRange`] when it is past the end.
    pub fn read_word(&self, addr: u32) -> Result<u32> {
        self.index_of(addr).map(|i| self.words[i])
    }

    /// Writes the aligned word at byte address `addr`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::read_word`].
    pub fn write_word(&mut self, addr: u32, value: u32) -> Result<()> {
        let index = self.index_of(addr)?;
        self.words[index] = value;
        Ok(())
    }

    /// Copies `words` into memory starting at word index 0.
    ///
    /// # Errors
    ///
    /// [`SimError::AddressOutOfRange`] when the slice exceeds capacity.
    pub fn load_words(&mut self, words: &[u32]) -> Result<()> {
        if words.len() > self.words.len() {
            return Err(SimError::AddressOutOfRange((words.len() as u32) * 4));
        }
        self.words[..words.len()].copy_from_slice(words);
        Ok(())
    }

    /// Zeroes the whole memory.
    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    fn index_of(&self, addr: u32) -> Result<usize> {
        if addr % 4 != 0 {
            return Err(SimError::MisalignedAddress(addr));
        }
        let index = (addr / 4) as usize;
        if index >= self.words.len() {
            return Err(SimError::AddressOutOfRange(addr));
        }
        Ok(index)
    }
}
