// Thu Jan 16 2026 - Alex

use crate::accessor::buffer::BufferView;
use crate::accessor::{nested_span, Storage};
use crate::memory::{AccessError, Address, Length, MemoryRange, Result};

/// Frozen snapshot of target bytes captured at `snapshot_address`.
///
/// Writes land in the local copy only. Every view keeps the whole snapshot
/// reachable so that external copies can follow pointers inside it.
///
/// A snapshot whose bytes run past the top of the address space stays readable
/// by offset, but only the part below `u64::MAX` is addressable: nested copies
/// starting beyond it fail with `OutOfRange` and `check_range` never covers it.
pub(crate) struct DumpStorage {
    snapshot: BufferView,
    snapshot_address: Address,
    view: BufferView,
    address: Address,
    label: Option<String>,
}

impl DumpStorage {
    pub fn new(bytes: Vec<u8>, address: Address, label: Option<String>) -> Self {
        if address.checked_add(bytes.len() as u64).is_none() {
            log::warn!("dump of {} bytes at {} runs past the end of the address space", bytes.len(), address);
        }
        let snapshot = BufferView::new(bytes);
        Self {
            view: snapshot.clone(),
            snapshot,
            snapshot_address: address,
            address,
            label,
        }
    }

    pub fn length(&self) -> usize {
        self.view.len()
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn location(&self) -> String {
        format!("{}@{}", self.label.as_deref().unwrap_or("dump"), self.address)
    }

    pub fn read(&self, pos: usize, out: &mut [u8]) -> Result<()> {
        self.view.read(pos, out)
    }

    pub fn write(&self, pos: usize, data: &[u8]) -> Result<()> {
        self.view.write(pos, data)
    }

    pub fn nested(&self, offset: usize, length: Length) -> Result<Storage> {
        let len = nested_span(offset, length, self.view.len())?;
        let address = self
            .address
            .checked_add(offset as u64)
            .ok_or_else(|| AccessError::out_of_range(offset as u64, len as u64, self.view.len() as u64))?;
        Ok(Storage::Dump(Self {
            snapshot: self.snapshot.clone(),
            snapshot_address: self.snapshot_address,
            view: self.view.sub_view(offset, len),
            address,
            label: self.label.clone(),
        }))
    }

    /// Relocates within the captured span; anything outside was never captured.
    pub fn external(&self, address: Address, length: usize) -> Result<Storage> {
        let offset = self.snapshot_range().offset_of(address, length as u64).ok_or_else(|| {
            AccessError::out_of_range(address.as_u64(), length as u64, self.snapshot.len() as u64)
        })?;
        Ok(Storage::Dump(Self {
            snapshot: self.snapshot.clone(),
            snapshot_address: self.snapshot_address,
            view: self.snapshot.sub_view(offset as usize, length),
            address,
            label: self.label.clone(),
        }))
    }

    pub fn check_range(&self, start: Address, length: usize) -> bool {
        self.snapshot_range().contains_range(&MemoryRange::new(start, length as u64))
    }

    /// Captured span, clipped to the addressable part.
    fn snapshot_range(&self) -> MemoryRange {
        let room = u64::MAX - self.snapshot_address.as_u64();
        MemoryRange::new(self.snapshot_address, (self.snapshot.len() as u64).min(room))
    }
}
