// Thu Jan 16 2026 - Alex

use crate::accessor::{check_span, nested_span, Storage};
use crate::memory::{AccessError, Address, Length, Result, TargetMemory};
use std::sync::Arc;

pub const DEFAULT_MAX_TRANSFER: usize = 0x10000;

/// Live window `[address, address+length)` of the target. Nothing is cached:
/// every call goes to the transfer channel.
pub(crate) struct MemoryStorage {
    target: Arc<dyn TargetMemory>,
    address: Address,
    length: usize,
    max_transfer: usize,
}

impl MemoryStorage {
    pub fn new(target: Arc<dyn TargetMemory>, address: Address, length: usize, max_transfer: usize) -> Self {
        Self {
            target,
            address,
            length,
            max_transfer: max_transfer.max(1),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn location(&self) -> String {
        self.address.to_string()
    }

    pub fn read(&self, pos: usize, out: &mut [u8]) -> Result<()> {
        let start = self.span(pos, out.len())?;
        for (index, chunk) in out.chunks_mut(self.max_transfer).enumerate() {
            let addr = start + (index * self.max_transfer) as u64;
            log::trace!("memory read {} bytes at {}", chunk.len(), addr);
            self.target.read_memory(addr, chunk).map_err(|err| {
                log::warn!("read of {} bytes at {} failed: {}", chunk.len(), addr, err);
                err
            })?;
        }
        Ok(())
    }

    pub fn write(&self, pos: usize, data: &[u8]) -> Result<()> {
        let start = self.span(pos, data.len())?;
        for (index, chunk) in data.chunks(self.max_transfer).enumerate() {
            let addr = start + (index * self.max_transfer) as u64;
            log::trace!("memory write {} bytes at {}", chunk.len(), addr);
            self.target.write_memory(addr, chunk).map_err(|err| {
                log::warn!("write of {} bytes at {} failed: {}", chunk.len(), addr, err);
                err
            })?;
        }
        Ok(())
    }

    pub fn nested(&self, offset: usize, length: Length) -> Result<Storage> {
        let len = nested_span(offset, length, self.length)?;
        let address = self
            .address
            .checked_add(offset as u64)
            .ok_or_else(|| AccessError::out_of_range(offset as u64, len as u64, self.length as u64))?;
        Ok(Storage::Memory(Self::new(Arc::clone(&self.target), address, len, self.max_transfer)))
    }

    pub fn external(&self, address: Address, length: usize) -> Storage {
        Storage::Memory(Self::new(Arc::clone(&self.target), address, length, self.max_transfer))
    }

    pub fn check_range(&self, start: Address, length: usize) -> bool {
        self.target.is_valid_range(start, length)
    }

    fn span(&self, pos: usize, len: usize) -> Result<Address> {
        check_span(pos, len, self.length)?;
        self.address
            .checked_add(pos as u64)
            .filter(|addr| addr.checked_add(len as u64).is_some())
            .ok_or_else(|| AccessError::out_of_range(pos as u64, len as u64, self.length as u64))
    }
}
