// Tue Jan 13 2026 - Alex

use crate::memory::Address;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("Out of range: {length} byte(s) at offset 0x{offset:x} exceed available 0x{available:x}")]
    OutOfRange { offset: u64, length: u64, available: u64 },
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
    #[error("Target unavailable at {address}: {reason}")]
    TargetUnavailable { address: Address, reason: String },
    #[error("Unknown register: {0}")]
    UnknownRegister(String),
}

impl AccessError {
    pub fn out_of_range(offset: u64, length: u64, available: u64) -> Self {
        Self::OutOfRange { offset, length, available }
    }

    pub fn unavailable(address: Address, reason: impl Into<String>) -> Self {
        Self::TargetUnavailable { address, reason: reason.into() }
    }

    pub fn unsupported(what: impl Into<String>) -> Self {
        Self::UnsupportedOperation(what.into())
    }
}

pub type Result<T> = std::result::Result<T, AccessError>;
