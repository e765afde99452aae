// Thu Jan 16 2026 - Alex

//! Typed, bounds-checked access to byte ranges with different backing stores.
//!
//! A [`DataAccessor`] covers `[0, length)` of exactly one backing store:
//! live target memory, a single register, an owned synthetic buffer, or a
//! frozen snapshot. All multi-byte values are little-endian. Accessors are
//! shared through [`DataAccessorPtr`] and derive further accessors with
//! [`DataAccessor::nested_copy`] (sub-range of this one) and
//! [`DataAccessor::external_copy`] (same kind, elsewhere).

mod buffer;
mod cache;
mod dump;
pub mod factory;
mod memory;
mod register;
pub mod scalar;
pub mod wrapper;

pub use factory::{
    cache_accessor, cache_accessor_from_value, cache_accessor_from_variant, cache_accessor_zeroed,
    dump_accessor, dump_accessor_from_value, dump_accessor_from_variant, dump_accessor_zeroed,
    empty_accessor, memory_accessor, register_accessor, AccessorFactory, SnapshotBuilder,
};
pub use self::memory::DEFAULT_MAX_TRANSFER;
pub use scalar::Scalar;
pub use wrapper::AccessorWrapper;

use crate::memory::{is_range_inside, AccessError, Address, Length, Result};
use self::cache::CacheStorage;
use self::dump::DumpStorage;
use self::memory::MemoryStorage;
use self::register::RegisterStorage;
use std::fmt;
use std::sync::Arc;

pub type DataAccessorPtr = Arc<DataAccessor>;

/// Which backing store an accessor reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    Memory,
    Register,
    Cache,
    Dump,
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Memory => "memory",
            Self::Register => "register",
            Self::Cache => "cache",
            Self::Dump => "dump",
        };
        f.write_str(name)
    }
}

pub(crate) enum Storage {
    Memory(MemoryStorage),
    Register(RegisterStorage),
    Cache(CacheStorage),
    Dump(DumpStorage),
}

pub struct DataAccessor {
    storage: Storage,
}

/// Fails unless `len` bytes at `pos` fit inside `[0, available)`.
pub(crate) fn check_span(pos: usize, len: usize, available: usize) -> Result<()> {
    if is_range_inside(0, available as u64, pos as u64, len as u64) {
        Ok(())
    } else {
        Err(AccessError::out_of_range(pos as u64, len as u64, available as u64))
    }
}

/// Resolves and validates the window of a nested copy.
pub(crate) fn nested_span(offset: usize, length: Length, available: usize) -> Result<usize> {
    let len = length
        .resolve(offset as u64, available as u64)
        .ok_or_else(|| AccessError::out_of_range(offset as u64, 0, available as u64))?;
    if !is_range_inside(0, available as u64, offset as u64, len) {
        return Err(AccessError::out_of_range(offset as u64, len, available as u64));
    }
    Ok(len as usize)
}

impl DataAccessor {
    pub(crate) fn new(storage: Storage) -> DataAccessorPtr {
        let accessor = Self { storage };
        log::debug!(
            "new {} accessor at {} ({} bytes)",
            accessor.storage_kind(),
            accessor.location(),
            accessor.length()
        );
        Arc::new(accessor)
    }

    pub fn length(&self) -> usize {
        match &self.storage {
            Storage::Memory(mem) => mem.length(),
            Storage::Register(reg) => reg.length(),
            Storage::Cache(cache) => cache.length(),
            Storage::Dump(dump) => dump.length(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.length() == 0
    }

    /// Fills `out` with the bytes at `pos`.
    pub fn read_raw(&self, pos: usize, out: &mut [u8]) -> Result<()> {
        match &self.storage {
            Storage::Memory(mem) => mem.read(pos, out),
            Storage::Register(reg) => reg.read(pos, out),
            Storage::Cache(cache) => cache.read(pos, out),
            Storage::Dump(dump) => dump.read(pos, out),
        }
    }

    pub fn write_raw(&self, pos: usize, data: &[u8]) -> Result<()> {
        match &self.storage {
            Storage::Memory(mem) => mem.write(pos, data),
            Storage::Register(reg) => reg.write(pos, data),
            Storage::Cache(cache) => cache.write(pos, data),
            Storage::Dump(dump) => dump.write(pos, data),
        }
    }

    pub fn read<T: Scalar>(&self, pos: usize) -> Result<T> {
        let mut raw = [0u8; 8];
        self.read_raw(pos, &mut raw[..T::SIZE])?;
        Ok(T::from_le(&raw))
    }

    pub fn write<T: Scalar>(&self, value: T, pos: usize) -> Result<()> {
        let mut raw = [0u8; 8];
        value.put_le(&mut raw);
        self.write_raw(pos, &raw[..T::SIZE])
    }

    pub fn read_array<T: Scalar>(&self, count: usize, pos: usize) -> Result<Vec<T>> {
        let total = count
            .checked_mul(T::SIZE)
            .ok_or_else(|| AccessError::out_of_range(pos as u64, u64::MAX, self.length() as u64))?;
        check_span(pos, total, self.length())?;
        let mut raw = vec![0u8; total];
        self.read_raw(pos, &mut raw)?;
        Ok(scalar::decode_all(&raw))
    }

    pub fn write_array<T: Scalar>(&self, values: &[T], pos: usize) -> Result<()> {
        self.write_raw(pos, &scalar::encode_all(values))
    }

    /// Accessor over `[offset, offset+length)` of this one.
    pub fn nested_copy(&self, offset: usize, length: Length) -> Result<DataAccessorPtr> {
        let storage = match &self.storage {
            Storage::Memory(mem) => mem.nested(offset, length)?,
            Storage::Register(reg) => reg.nested(offset, length)?,
            Storage::Cache(cache) => cache.nested(offset, length)?,
            Storage::Dump(dump) => dump.nested(offset, length)?,
        };
        Ok(Self::new(storage))
    }

    /// Accessor of the same kind at `address`. `Length::Rest` reuses this accessor's length.
    pub fn external_copy(&self, address: Address, length: Length) -> Result<DataAccessorPtr> {
        let length = match length {
            Length::Exact(len) => len,
            Length::Rest => self.length(),
        };
        let storage = match &self.storage {
            Storage::Memory(mem) => mem.external(address, length),
            Storage::Register(reg) => reg.external(address, length)?,
            Storage::Cache(cache) => cache.external(address, length),
            Storage::Dump(dump) => dump.external(address, length)?,
        };
        Ok(Self::new(storage))
    }

    /// Whether `[start, start+length)` is obtainable from the backing store, without touching it.
    pub fn check_range(&self, start: Address, length: usize) -> bool {
        match &self.storage {
            Storage::Memory(mem) => mem.check_range(start, length),
            Storage::Register(reg) => reg.check_range(start, length),
            Storage::Cache(cache) => cache.check_range(start, length),
            Storage::Dump(dump) => dump.check_range(start, length),
        }
    }

    pub fn location(&self) -> String {
        match &self.storage {
            Storage::Memory(mem) => mem.location(),
            Storage::Register(reg) => reg.location(),
            Storage::Cache(cache) => cache.location(),
            Storage::Dump(dump) => dump.location(),
        }
    }

    /// Target address of byte 0; zero for register and cache accessors.
    pub fn address(&self) -> Address {
        match &self.storage {
            Storage::Memory(mem) => mem.address(),
            Storage::Dump(dump) => dump.address(),
            Storage::Register(_) | Storage::Cache(_) => Address::zero(),
        }
    }

    pub fn storage_kind(&self) -> StorageKind {
        match &self.storage {
            Storage::Memory(_) => StorageKind::Memory,
            Storage::Register(_) => StorageKind::Register,
            Storage::Cache(_) => StorageKind::Cache,
            Storage::Dump(_) => StorageKind::Dump,
        }
    }

    pub fn register_name(&self) -> Option<&str> {
        match &self.storage {
            Storage::Register(reg) => Some(reg.name()),
            _ => None,
        }
    }
}

macro_rules! typed_access {
    ($($t:ty => $read:ident, $write:ident, $read_many:ident, $write_many:ident;)*) => {
        impl DataAccessor {
            $(
                pub fn $read(&self, pos: usize) -> Result<$t> {
                    self.read::<$t>(pos)
                }

                pub fn $write(&self, value: $t, pos: usize) -> Result<()> {
                    self.write::<$t>(value, pos)
                }

                pub fn $read_many(&self, count: usize, pos: usize) -> Result<Vec<$t>> {
                    self.read_array::<$t>(count, pos)
                }

                pub fn $write_many(&self, values: &[$t], pos: usize) -> Result<()> {
                    self.write_array::<$t>(values, pos)
                }
            )*
        }
    };
}

typed_access! {
    u8 => read_byte, write_byte, read_bytes, write_bytes;
    i8 => read_sign_byte, write_sign_byte, read_sign_bytes, write_sign_bytes;
    u16 => read_word, write_word, read_words, write_words;
    i16 => read_sign_word, write_sign_word, read_sign_words, write_sign_words;
    u32 => read_dword, write_dword, read_dwords, write_dwords;
    i32 => read_sign_dword, write_sign_dword, read_sign_dwords, write_sign_dwords;
    u64 => read_qword, write_qword, read_qwords, write_qwords;
    i64 => read_sign_qword, write_sign_qword, read_sign_qwords, write_sign_qwords;
    f32 => read_float, write_float, read_floats, write_floats;
    f64 => read_double, write_double, read_doubles, write_doubles;
}

impl fmt::Debug for DataAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataAccessor")
            .field("kind", &self.storage_kind())
            .field("location", &self.location())
            .field("length", &self.length())
            .finish()
    }
}

impl fmt::Display for DataAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} [{} bytes]", self.storage_kind(), self.location(), self.length())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{PagedMemory, Protection, RegisterFile, TargetMemory};

    #[test]
    fn test_cache_qword_then_nested_dword_is_little_endian() {
        let acc = cache_accessor_zeroed(8);
        acc.write_qword(0x1122334455667788, 0).unwrap();
        assert_eq!(acc.read_qword(0).unwrap(), 0x1122334455667788);

        let high = acc.nested_copy(4, Length::Exact(4)).unwrap();
        assert_eq!(high.read_dword(0).unwrap(), 0x11223344);
        let low = acc.nested_copy(0, Length::Exact(4)).unwrap();
        assert_eq!(low.read_dword(0).unwrap(), 0x55667788);
    }

    #[test]
    fn test_nested_copy_containment() {
        let acc = cache_accessor_zeroed(10);
        assert!(acc.nested_copy(0, Length::Exact(10)).is_ok());
        assert!(matches!(
            acc.nested_copy(5, Length::Exact(6)),
            Err(AccessError::OutOfRange { .. })
        ));
        assert_eq!(acc.nested_copy(10, Length::Exact(0)).unwrap().length(), 0);
        assert_eq!(acc.nested_copy(10, Length::Rest).unwrap().length(), 0);
        assert!(acc.nested_copy(11, Length::Rest).is_err());
        assert!(acc.nested_copy(usize::MAX, Length::Exact(2)).is_err());
    }

    #[test]
    fn test_nested_rest_covers_tail() {
        let acc = cache_accessor(vec![1, 2, 3, 4, 5, 6]);
        let tail = acc.nested_copy(2, Length::Rest).unwrap();
        assert_eq!(tail.length(), 4);
        assert_eq!(tail.read_bytes(4, 0).unwrap(), vec![3, 4, 5, 6]);
    }

    #[test]
    fn test_out_of_range_reads_never_default() {
        let acc = cache_accessor(vec![0xff; 4]);
        assert!(acc.read_dword(0).is_ok());
        assert!(matches!(acc.read_dword(1), Err(AccessError::OutOfRange { .. })));
        assert!(matches!(acc.read_qword(0), Err(AccessError::OutOfRange { .. })));
        assert!(acc.read_words(3, 0).is_err());
        assert!(acc.read_array::<u64>(usize::MAX, 0).is_err());
    }

    #[test]
    fn test_huge_bulk_count_is_out_of_range() {
        let acc = cache_accessor_zeroed(8);
        assert!(matches!(acc.read_qwords(1usize << 60, 0), Err(AccessError::OutOfRange { .. })));
        assert!(matches!(acc.read_bytes(usize::MAX, 0), Err(AccessError::OutOfRange { .. })));
        assert_eq!(acc.read_qwords(1, 0).unwrap(), vec![0]);
    }

    #[test]
    fn test_bulk_round_trip() {
        let acc = cache_accessor_zeroed(32);
        acc.write_sign_words(&[-1, 2, -3], 2).unwrap();
        assert_eq!(acc.read_sign_words(3, 2).unwrap(), vec![-1, 2, -3]);
        acc.write_doubles(&[1.25, -8.5], 16).unwrap();
        assert_eq!(acc.read_doubles(2, 16).unwrap(), vec![1.25, -8.5]);
        assert!(acc.write_qwords(&[1, 2, 3, 4, 5], 0).is_err());
    }

    #[test]
    fn test_qword_round_trip_for_every_writable_kind() {
        let mem = Arc::new(PagedMemory::new(0x1000).unwrap());
        mem.map(Address::new(0x10000), 0x100, Protection::READ_WRITE);
        let regs = Arc::new(RegisterFile::x86_64());

        let accessors = vec![
            memory_accessor(mem, Address::new(0x10000), 0x100),
            register_accessor(regs, "rax").unwrap(),
            cache_accessor_zeroed(16),
            dump_accessor_zeroed(16, Address::new(0x7000)),
        ];

        for acc in accessors {
            acc.write_qword(0xdeadbeefcafef00d, 0).unwrap();
            assert_eq!(acc.read_qword(0).unwrap(), 0xdeadbeefcafef00d, "{}", acc);
        }
    }

    #[test]
    fn test_dump_writes_are_isolated_from_memory() {
        let mem = Arc::new(PagedMemory::new(0x1000).unwrap());
        mem.load(Address::new(0x2000), &[0u8; 16]);

        let live = memory_accessor(mem.clone(), Address::new(0x2000), 16);
        let dump = dump_accessor(live.read_bytes(16, 0).unwrap(), Address::new(0x2000));
        dump.write_qword(0x4141414141414141, 8).unwrap();

        assert_eq!(dump.read_qword(8).unwrap(), 0x4141414141414141);
        assert_eq!(live.read_qword(8).unwrap(), 0);
        let mut raw = [0xffu8; 8];
        mem.read_memory(Address::new(0x2008), &mut raw).unwrap();
        assert_eq!(raw, [0u8; 8]);
    }

    #[test]
    fn test_introspection() {
        let regs = Arc::new(RegisterFile::x86_64());
        let reg = register_accessor(regs, "rip").unwrap();
        assert_eq!(reg.storage_kind(), StorageKind::Register);
        assert_eq!(reg.register_name(), Some("rip"));
        assert_eq!(reg.address(), Address::zero());

        let cache = cache_accessor(vec![0u8; 4]);
        assert_eq!(cache.storage_kind(), StorageKind::Cache);
        assert_eq!(cache.register_name(), None);
        assert_eq!(cache.address(), Address::zero());

        let dump = dump_accessor(vec![0u8; 4], Address::new(0x1234));
        assert_eq!(dump.address(), Address::new(0x1234));
        assert_eq!(dump.storage_kind().to_string(), "dump");
    }
}
