//! Strongly typed 32-bit addresses.
//!
//! Virtual and physical addresses are distinct newtypes so a translation step
//! cannot be skipped by accident. Both expose the 4 KiB page split used by
//! the virtual-memory simulator; the cache performs its own tag/index/offset
//! split because that geometry is configuration-dependent.

use std::fmt;

use super::constants::{OFFSET_MASK, PAGE_SHIFT};

/// A 32-bit virtual address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct VirtAddr(pub u32);

/// A 32-bit physical address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PhysAddr(pub u32);

impl VirtAddr {
    /// Returns the virtual page number (upper 20 bits).
    #[inline]
    pub const fn vpn(self) -> u32 {
        self.0 >> PAGE_SHIFT
    }

    /// Returns the byte offset within the page (lower 12 bits).
    #[inline]
    pub const fn page_offset(self) -> u32 {
        self.0 & OFFSET_MASK
    }
}

impl PhysAddr {
    /// Builds a physical address from a frame number and a page offset.
    #[inline]
    pub const fn from_frame(pfn: u32, offset: u32) -> Self {
        Self((pfn << PAGE_SHIFT) | (offset & OFFSET_MASK))
    }

    /// Returns the physical frame number (upper 20 bits).
    #[inline]
    pub const fn pfn(self) -> u32 {
        self.0 >> PAGE_SHIFT
    }

    /// Returns the byte offset within the frame (lower 12 bits).
    #[inline]
    pub const fn page_offset(self) -> u32 {
        self.0 & OFFSET_MASK
    }
}

impl From<u32> for VirtAddr {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<u32> for PhysAddr {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for VirtAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl fmt::Display for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}
