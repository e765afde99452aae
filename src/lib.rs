// Tue Jan 15 2026 - Alex

//! Uniform typed access to target memory, registers, synthetic buffers and
//! memory snapshots for debugging tools.

pub mod accessor;
pub mod config;
pub mod memory;
pub mod utils;
pub mod variant;

pub use accessor::{
    empty_accessor, AccessorFactory, AccessorWrapper, DataAccessor, DataAccessorPtr, SnapshotBuilder,
    StorageKind,
};
pub use config::Config;
pub use memory::{AccessError, Address, Length, RegisterContext, TargetMemory};
pub use variant::{NumConvertible, NumVariant};
