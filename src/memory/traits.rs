// Wed Jan 15 2026 - Alex

use crate::memory::{Address, Result};

/// Byte-transfer channel into a live target address space.
///
/// Implementations report every failure as [`AccessError::TargetUnavailable`](crate::AccessError).
/// Calls may block; retries belong to the implementation, not to its callers.
pub trait TargetMemory: Send + Sync {
    fn read_memory(&self, addr: Address, buffer: &mut [u8]) -> Result<()>;
    fn write_memory(&self, addr: Address, data: &[u8]) -> Result<()>;
    /// Whether `[addr, addr+len)` could be read right now, without reading it.
    fn is_valid_range(&self, addr: Address, len: usize) -> bool;
}

/// Register set of the current execution context.
pub trait RegisterContext: Send + Sync {
    /// Natural width in bytes, or `None` for an unrecognized name.
    fn register_width(&self, name: &str) -> Option<usize>;
    /// Full little-endian contents of the register.
    fn read_register(&self, name: &str) -> Result<Vec<u8>>;
    /// Replaces the full contents; `value` must be exactly the register width.
    fn write_register(&self, name: &str, value: &[u8]) -> Result<()>;
}
