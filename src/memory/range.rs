// Tue Jan 13 2026 - Alex

use crate::memory::Address;
use std::fmt;

/// Requested length of a derived view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Length {
    Exact(usize),
    /// Everything from the start offset to the end of the source range.
    #[default]
    Rest,
}

impl Length {
    /// Resolves against the source range: `Rest` is whatever remains after `offset`.
    pub fn resolve(self, offset: u64, available: u64) -> Option<u64> {
        match self {
            Self::Exact(len) => Some(len as u64),
            Self::Rest => available.checked_sub(offset),
        }
    }
}

impl From<usize> for Length {
    fn from(len: usize) -> Self {
        Self::Exact(len)
    }
}

/// True iff `[new_offset, new_offset + new_length)` lies inside
/// `[exist_offset, exist_offset + exist_length)`.
///
/// A zero-length candidate is inside when its offset falls anywhere in
/// `[exist_offset, exist_offset + exist_length]`, the exclusive end included.
/// Any span whose end overflows u64 is never inside.
pub fn is_range_inside(exist_offset: u64, exist_length: u64, new_offset: u64, new_length: u64) -> bool {
    let exist_end = match exist_offset.checked_add(exist_length) {
        Some(end) => end,
        None => return false,
    };
    let new_end = match new_offset.checked_add(new_length) {
        Some(end) => end,
        None => return false,
    };
    new_offset >= exist_offset && new_end <= exist_end
}

/// Half-open span of target addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryRange {
    start: Address,
    size: u64,
}

impl MemoryRange {
    pub fn new(start: Address, size: u64) -> Self {
        Self { start, size }
    }

    pub fn start(&self) -> Address {
        self.start
    }

    /// Exclusive end; `None` when the span runs past the top of the address space.
    pub fn end(&self) -> Option<Address> {
        self.start.checked_add(self.size)
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn contains(&self, addr: Address) -> bool {
        is_range_inside(self.start.as_u64(), self.size, addr.as_u64(), 1)
    }

    pub fn contains_range(&self, other: &Self) -> bool {
        is_range_inside(self.start.as_u64(), self.size, other.start.as_u64(), other.size)
    }

    /// Offset of `addr` relative to the start, when `[addr, addr+len)` is inside.
    pub fn offset_of(&self, addr: Address, len: u64) -> Option<u64> {
        if self.contains_range(&Self::new(addr, len)) {
            addr.offset_from(self.start)
        } else {
            None
        }
    }
}

impl fmt::Display for MemoryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, +0x{:x})", self.start, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_range_is_inside() {
        assert!(is_range_inside(0, 10, 0, 10));
    }

    #[test]
    fn test_right_edge_exceeded_by_one() {
        assert!(!is_range_inside(0, 10, 5, 6));
        assert!(is_range_inside(0, 10, 5, 5));
    }

    #[test]
    fn test_zero_length_candidates() {
        assert!(is_range_inside(0, 10, 10, 0));
        assert!(is_range_inside(0, 10, 0, 0));
        assert!(!is_range_inside(0, 10, 11, 0));
        assert!(is_range_inside(0, 0, 0, 0));
        assert!(!is_range_inside(0, 0, 0, 1));
    }

    #[test]
    fn test_non_zero_base() {
        assert!(is_range_inside(0x1000, 0x100, 0x1080, 0x80));
        assert!(!is_range_inside(0x1000, 0x100, 0xfff, 2));
    }

    #[test]
    fn test_overflow_is_never_inside() {
        assert!(!is_range_inside(0, u64::MAX, u64::MAX, 2));
        assert!(!is_range_inside(u64::MAX, 2, u64::MAX, 1));
    }

    #[test]
    fn test_length_resolve() {
        assert_eq!(Length::Rest.resolve(4, 10), Some(6));
        assert_eq!(Length::Rest.resolve(10, 10), Some(0));
        assert_eq!(Length::Rest.resolve(11, 10), None);
        assert_eq!(Length::Exact(3).resolve(11, 10), Some(3));
    }

    #[test]
    fn test_memory_range_offset_of() {
        let range = MemoryRange::new(Address::new(0x4000), 0x100);
        assert_eq!(range.offset_of(Address::new(0x4010), 8), Some(0x10));
        assert_eq!(range.offset_of(Address::new(0x40f9), 8), None);
        assert!(range.contains(Address::new(0x40ff)));
        assert!(!range.contains(Address::new(0x4100)));
    }
}
