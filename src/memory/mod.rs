// Tue Jan 13 2026 - Alex

pub mod address;
pub mod error;
pub mod mmap;
pub mod paged;
pub mod protection;
pub mod range;
pub mod registers;
pub mod traits;

pub use address::Address;
pub use error::{AccessError, Result};
pub use mmap::MmapMemory;
pub use paged::PagedMemory;
pub use protection::Protection;
pub use range::{is_range_inside, Length, MemoryRange};
pub use registers::RegisterFile;
pub use traits::{RegisterContext, TargetMemory};
