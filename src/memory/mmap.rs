// Tue Jan 13 2026 - Alex

use crate::memory::{AccessError, Address, MemoryRange, Result, TargetMemory};
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

/// Read-only file mapping presented as target memory at a chosen base address.
pub struct MmapMemory {
    mmap: Arc<Mmap>,
    base_address: Address,
}

impl MmapMemory {
    pub fn from_file<P: AsRef<Path>>(path: P, base_address: Address) -> std::io::Result<Self> {
        let file = File::open(path)?;
        // SAFETY: the mapping is read-only; a concurrent truncation of the file is the caller's problem.
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Self {
            mmap: Arc::new(mmap),
            base_address,
        })
    }

    pub fn base_address(&self) -> Address {
        self.base_address
    }

    pub fn size(&self) -> usize {
        self.mmap.len()
    }

    pub fn as_slice(&self) -> &[u8] {
        self.mmap.as_ref()
    }

    pub fn range(&self) -> MemoryRange {
        MemoryRange::new(self.base_address, self.mmap.len() as u64)
    }

    fn offset(&self, addr: Address, len: usize) -> Result<usize> {
        self.range()
            .offset_of(addr, len as u64)
            .map(|off| off as usize)
            .ok_or_else(|| AccessError::unavailable(addr, format!("{} byte(s) outside mapped file", len)))
    }
}

impl TargetMemory for MmapMemory {
    fn read_memory(&self, addr: Address, buffer: &mut [u8]) -> Result<()> {
        let offset = self.offset(addr, buffer.len())?;
        buffer.copy_from_slice(&self.mmap[offset..offset + buffer.len()]);
        Ok(())
    }

    fn write_memory(&self, addr: Address, _data: &[u8]) -> Result<()> {
        Err(AccessError::unavailable(addr, "file mapping is read-only"))
    }

    fn is_valid_range(&self, addr: Address, len: usize) -> bool {
        self.offset(addr, len).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn mapped(bytes: &[u8], base: u64) -> MmapMemory {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        MmapMemory::from_file(file.path(), Address::new(base)).unwrap()
    }

    #[test]
    fn test_read_at_base() {
        let mem = mapped(&[1, 2, 3, 4, 5, 6, 7, 8], 0x400000);
        let mut out = [0u8; 4];
        mem.read_memory(Address::new(0x400004), &mut out).unwrap();
        assert_eq!(out, [5, 6, 7, 8]);
        assert_eq!(mem.size(), 8);
    }

    #[test]
    fn test_out_of_file_is_unavailable() {
        let mem = mapped(&[0u8; 8], 0x1000);
        let mut out = [0u8; 4];
        assert!(mem.read_memory(Address::new(0x1006), &mut out).is_err());
        assert!(!mem.is_valid_range(Address::new(0xfff), 1));
        assert!(mem.is_valid_range(Address::new(0x1000), 8));
    }

    #[test]
    fn test_writes_are_rejected() {
        let mem = mapped(&[0u8; 8], 0x1000);
        let err = mem.write_memory(Address::new(0x1000), &[1]).unwrap_err();
        assert!(matches!(err, AccessError::TargetUnavailable { .. }));
    }
}
