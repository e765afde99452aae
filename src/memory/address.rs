// Tue Jan 13 2026 - Alex

use std::fmt;
use std::ops::{Add, Sub};

/// Location in the inspected address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address {
    value: u64,
}

impl Address {
    pub const fn new(value: u64) -> Self {
        Self { value }
    }

    pub const fn zero() -> Self {
        Self { value: 0 }
    }

    pub fn as_u64(&self) -> u64 {
        self.value
    }

    pub fn is_null(&self) -> bool {
        self.value == 0
    }

    pub fn checked_add(&self, offset: u64) -> Option<Self> {
        self.value.checked_add(offset).map(Self::new)
    }

    /// Distance from `base` to this address, if this address is not below it.
    pub fn offset_from(&self, base: Address) -> Option<u64> {
        self.value.checked_sub(base.value)
    }

    pub fn align_down(&self, alignment: u64) -> Self {
        Self { value: self.value & !(alignment - 1) }
    }

    pub fn align_up(&self, alignment: u64) -> Self {
        Self { value: self.value.saturating_add(alignment - 1) & !(alignment - 1) }
    }

    pub fn is_aligned(&self, alignment: u64) -> bool {
        self.value % alignment == 0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.value)
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.value, f)
    }
}

impl Add<u64> for Address {
    type Output = Self;
    fn add(self, rhs: u64) -> Self::Output {
        Self { value: self.value.wrapping_add(rhs) }
    }
}

impl Sub<u64> for Address {
    type Output = Self;
    fn sub(self, rhs: u64) -> Self::Output {
        Self { value: self.value.wrapping_sub(rhs) }
    }
}

impl From<u64> for Address {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl From<Address> for u64 {
    fn from(addr: Address) -> Self {
        addr.value
    }
}
