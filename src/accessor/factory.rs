// Thu Jan 16 2026 - Alex

use crate::accessor::cache::CacheStorage;
use crate::accessor::dump::DumpStorage;
use crate::accessor::memory::{MemoryStorage, DEFAULT_MAX_TRANSFER};
use crate::accessor::register::RegisterStorage;
use crate::accessor::{DataAccessor, DataAccessorPtr, Storage};
use crate::config::Config;
use crate::memory::{Address, RegisterContext, Result, TargetMemory};
use crate::variant::NumVariant;
use once_cell::sync::Lazy;
use std::sync::Arc;
use zerocopy::{Immutable, IntoBytes};

static EMPTY: Lazy<DataAccessorPtr> =
    Lazy::new(|| SnapshotBuilder::zeroed(0).with_location("<empty>").into_cache());

/// Zero-length accessor: every non-empty read or write fails with `OutOfRange`.
pub fn empty_accessor() -> DataAccessorPtr {
    Arc::clone(&EMPTY)
}

pub fn memory_accessor(target: Arc<dyn TargetMemory>, address: Address, length: usize) -> DataAccessorPtr {
    DataAccessor::new(Storage::Memory(MemoryStorage::new(
        target,
        address,
        length,
        DEFAULT_MAX_TRANSFER,
    )))
}

pub fn register_accessor(context: Arc<dyn RegisterContext>, name: &str) -> Result<DataAccessorPtr> {
    let storage = RegisterStorage::new(context, name).map_err(|err| {
        log::debug!("register accessor for {:?} refused: {}", name, err);
        err
    })?;
    Ok(DataAccessor::new(Storage::Register(storage)))
}

pub fn cache_accessor(bytes: impl Into<Vec<u8>>) -> DataAccessorPtr {
    SnapshotBuilder::from_bytes(bytes).into_cache()
}

pub fn cache_accessor_zeroed(size: usize) -> DataAccessorPtr {
    SnapshotBuilder::zeroed(size).into_cache()
}

pub fn cache_accessor_from_value<T: IntoBytes + Immutable + ?Sized>(value: &T) -> DataAccessorPtr {
    SnapshotBuilder::from_value(value).into_cache()
}

pub fn cache_accessor_from_variant(value: &NumVariant) -> DataAccessorPtr {
    SnapshotBuilder::from_variant(value).into_cache()
}

pub fn dump_accessor(bytes: impl Into<Vec<u8>>, address: Address) -> DataAccessorPtr {
    SnapshotBuilder::from_bytes(bytes).at_address(address).into_dump()
}

pub fn dump_accessor_zeroed(size: usize, address: Address) -> DataAccessorPtr {
    SnapshotBuilder::zeroed(size).at_address(address).into_dump()
}

pub fn dump_accessor_from_value<T: IntoBytes + Immutable + ?Sized>(value: &T, address: Address) -> DataAccessorPtr {
    SnapshotBuilder::from_value(value).at_address(address).into_dump()
}

pub fn dump_accessor_from_variant(value: &NumVariant, address: Address) -> DataAccessorPtr {
    SnapshotBuilder::from_variant(value).at_address(address).into_dump()
}

/// Collects the bytes and labels of an owned buffer, then turns it into a
/// cache or dump accessor.
pub struct SnapshotBuilder {
    bytes: Vec<u8>,
    location: Option<String>,
    address: Address,
}

impl SnapshotBuilder {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            location: None,
            address: Address::zero(),
        }
    }

    pub fn zeroed(size: usize) -> Self {
        Self::from_bytes(vec![0u8; size])
    }

    /// Raw in-memory representation of `value`.
    pub fn from_value<T: IntoBytes + Immutable + ?Sized>(value: &T) -> Self {
        Self::from_bytes(value.as_bytes())
    }

    pub fn from_variant(value: &NumVariant) -> Self {
        Self::from_bytes(value.to_le_bytes())
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Original target address; only dumps keep it.
    pub fn at_address(mut self, address: Address) -> Self {
        self.address = address;
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_cache(self) -> DataAccessorPtr {
        DataAccessor::new(Storage::Cache(CacheStorage::new(self.bytes, self.location)))
    }

    pub fn into_dump(self) -> DataAccessorPtr {
        DataAccessor::new(Storage::Dump(DumpStorage::new(self.bytes, self.address, self.location)))
    }
}

/// Binds the live collaborators so memory and register accessors can be made
/// from an address or a name alone.
#[derive(Clone)]
pub struct AccessorFactory {
    target: Arc<dyn TargetMemory>,
    registers: Arc<dyn RegisterContext>,
    max_transfer: usize,
}

impl AccessorFactory {
    pub fn new(target: Arc<dyn TargetMemory>, registers: Arc<dyn RegisterContext>) -> Self {
        Self {
            target,
            registers,
            max_transfer: DEFAULT_MAX_TRANSFER,
        }
    }

    pub fn from_config(config: &Config, target: Arc<dyn TargetMemory>, registers: Arc<dyn RegisterContext>) -> Self {
        Self::new(target, registers).with_max_transfer(config.max_transfer_size)
    }

    pub fn with_max_transfer(mut self, max_transfer: usize) -> Self {
        self.max_transfer = max_transfer;
        self
    }

    pub fn memory(&self, address: Address, length: usize) -> DataAccessorPtr {
        DataAccessor::new(Storage::Memory(MemoryStorage::new(
            Arc::clone(&self.target),
            address,
            length,
            self.max_transfer,
        )))
    }

    pub fn register(&self, name: &str) -> Result<DataAccessorPtr> {
        register_accessor(Arc::clone(&self.registers), name)
    }

    /// Reads `length` live bytes at `address` into a dump tied to that address.
    pub fn snapshot(&self, address: Address, length: usize) -> Result<DataAccessorPtr> {
        let bytes = self.memory(address, length).read_bytes(length, 0)?;
        Ok(SnapshotBuilder::from_bytes(bytes).at_address(address).into_dump())
    }
}
