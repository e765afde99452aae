// Thu Jan 16 2026 - Alex

use crate::accessor::buffer::BufferView;
use crate::accessor::{nested_span, Storage};
use crate::memory::{Address, Length, Result};

/// Owned, address-less byte buffer.
pub(crate) struct CacheStorage {
    view: BufferView,
    label: Option<String>,
    base_offset: usize,
}

impl CacheStorage {
    pub fn new(bytes: Vec<u8>, label: Option<String>) -> Self {
        Self {
            view: BufferView::new(bytes),
            label,
            base_offset: 0,
        }
    }

    pub fn length(&self) -> usize {
        self.view.len()
    }

    pub fn location(&self) -> String {
        let label = self.label.as_deref().unwrap_or("cache");
        if self.base_offset == 0 {
            label.to_string()
        } else {
            format!("{}+0x{:x}", label, self.base_offset)
        }
    }

    pub fn read(&self, pos: usize, out: &mut [u8]) -> Result<()> {
        self.view.read(pos, out)
    }

    pub fn write(&self, pos: usize, data: &[u8]) -> Result<()> {
        self.view.write(pos, data)
    }

    /// Aliases the same buffer, restricted to the requested window.
    pub fn nested(&self, offset: usize, length: Length) -> Result<Storage> {
        let len = nested_span(offset, length, self.view.len())?;
        Ok(Storage::Cache(Self {
            view: self.view.sub_view(offset, len),
            label: self.label.clone(),
            base_offset: self.base_offset + offset,
        }))
    }

    /// No target address to relocate to: a fresh zero-filled buffer.
    pub fn external(&self, _address: Address, length: usize) -> Storage {
        Storage::Cache(Self::new(vec![0u8; length], self.label.clone()))
    }

    pub fn check_range(&self, start: Address, length: usize) -> bool {
        self.view.contains(start.as_u64(), length as u64)
    }
}

#[cfg(test)]
mod tests {
    use crate::accessor::{
        cache_accessor, cache_accessor_from_value, cache_accessor_from_variant, cache_accessor_zeroed,
        SnapshotBuilder,
    };
    use crate::memory::{Address, Length};
    use crate::variant::NumVariant;
    use zerocopy::{Immutable, IntoBytes};

    #[derive(IntoBytes, Immutable)]
    #[repr(C)]
    struct Pair {
        tag: u32,
        value: u32,
    }

    #[test]
    fn test_bytes_round_trip() {
        let bytes = vec![0x10, 0x20, 0x30, 0x40, 0x50];
        let acc = cache_accessor(bytes.clone());
        assert_eq!(acc.read_bytes(bytes.len(), 0).unwrap(), bytes);
        assert_eq!(acc.address(), Address::zero());
        assert_eq!(acc.location(), "cache");
    }

    #[test]
    fn test_nested_writes_stay_in_window() {
        let acc = cache_accessor_zeroed(8);
        let window = acc.nested_copy(2, Length::Exact(4)).unwrap();
        window.write_dword(0xffffffff, 0).unwrap();
        assert!(window.write_byte(1, 4).is_err());

        assert_eq!(acc.read_bytes(8, 0).unwrap(), vec![0, 0, 0xff, 0xff, 0xff, 0xff, 0, 0]);
    }

    #[test]
    fn test_nested_view_outlives_parent() {
        let window = {
            let acc = cache_accessor(vec![1, 2, 3, 4]);
            acc.nested_copy(2, Length::Rest).unwrap()
        };
        assert_eq!(window.read_word(0).unwrap(), 0x0403);
    }

    #[test]
    fn test_external_is_zero_filled() {
        let acc = cache_accessor(vec![0xaa; 4]);
        let ext = acc.external_copy(Address::new(0x5000), Length::Exact(6)).unwrap();
        assert_eq!(ext.length(), 6);
        assert_eq!(ext.address(), Address::zero());
        assert_eq!(ext.read_bytes(6, 0).unwrap(), vec![0; 6]);

        let same = acc.external_copy(Address::zero(), Length::Rest).unwrap();
        assert_eq!(same.length(), 4);
    }

    #[test]
    fn test_value_snapshots() {
        let acc = cache_accessor_from_value(&Pair { tag: 7, value: 0xdead });
        assert_eq!(acc.length(), 8);
        assert_eq!(acc.read_dword(4).unwrap(), 0xdead);

        let var = cache_accessor_from_variant(&NumVariant::I16(-2));
        assert_eq!(var.length(), 2);
        assert_eq!(var.read_sign_word(0).unwrap(), -2);
    }

    #[test]
    fn test_labelled_location() {
        let acc = SnapshotBuilder::zeroed(16).with_location("frame").into_cache();
        assert_eq!(acc.location(), "frame");
        let nested = acc.nested_copy(8, Length::Rest).unwrap();
        assert_eq!(nested.location(), "frame+0x8");
    }

    #[test]
    fn test_check_range_is_buffer_relative() {
        let acc = cache_accessor_zeroed(8);
        assert!(acc.check_range(Address::zero(), 8));
        assert!(acc.check_range(Address::new(8), 0));
        assert!(!acc.check_range(Address::new(4), 5));
    }
}
