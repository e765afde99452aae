// Tue Jan 13 2026 - Alex

use crate::config::{Config, ConfigError};
use crate::memory::{AccessError, Address, Protection, Result, TargetMemory};
use parking_lot::RwLock;
use std::collections::HashMap;

struct Page {
    data: Vec<u8>,
    protection: Protection,
}

/// Sparse, page-granular address space living in this process.
///
/// Stands in for a live target: unmapped pages and protection violations
/// surface as `TargetUnavailable`, exactly as a debugger transfer would.
pub struct PagedMemory {
    pages: RwLock<HashMap<u64, Page>>,
    page_size: u64,
}

impl PagedMemory {
    pub fn new(page_size: usize) -> std::result::Result<Self, ConfigError> {
        if !page_size.is_power_of_two() {
            return Err(ConfigError::Invalid(format!(
                "page_size {} is not a power of two",
                page_size
            )));
        }
        Ok(Self {
            pages: RwLock::new(HashMap::new()),
            page_size: page_size as u64,
        })
    }

    pub fn from_config(config: &Config) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Self::new(config.page_size)
    }

    pub fn page_size(&self) -> usize {
        self.page_size as usize
    }

    /// Maps zero-filled pages covering `[addr, addr+len)`. Already mapped pages keep their bytes.
    pub fn map(&self, addr: Address, len: usize, protection: Protection) {
        let mut pages = self.pages.write();
        for page_addr in self.page_addresses(addr, len) {
            pages
                .entry(page_addr)
                .and_modify(|page| page.protection = protection)
                .or_insert_with(|| Page {
                    data: vec![0u8; self.page_size as usize],
                    protection,
                });
        }
        log::debug!("mapped {} bytes at {} ({})", len, addr, protection);
    }

    pub fn unmap(&self, addr: Address, len: usize) {
        let mut pages = self.pages.write();
        for page_addr in self.page_addresses(addr, len) {
            pages.remove(&page_addr);
        }
    }

    pub fn protect(&self, addr: Address, len: usize, protection: Protection) {
        let mut pages = self.pages.write();
        for page_addr in self.page_addresses(addr, len) {
            if let Some(page) = pages.get_mut(&page_addr) {
                page.protection = protection;
            }
        }
    }

    /// Maps `data` read-write at `addr`, ignoring current protections.
    pub fn load(&self, addr: Address, data: &[u8]) {
        self.map(addr, data.len(), Protection::READ_WRITE);
        let mut pages = self.pages.write();
        self.walk(addr, data.len(), |page_addr, page_off, start, len| {
            if let Some(page) = pages.get_mut(&page_addr) {
                page.data[page_off..page_off + len].copy_from_slice(&data[start..start + len]);
            }
        });
    }

    pub fn mapped_pages(&self) -> usize {
        self.pages.read().len()
    }

    fn page_addresses(&self, addr: Address, len: usize) -> Vec<u64> {
        let mut result = Vec::new();
        self.walk(addr, len, |page_addr, _, _, _| result.push(page_addr));
        result
    }

    /// Visits each page touched by `[addr, addr+len)` as
    /// (page address, offset in page, offset in span, chunk length).
    fn walk<F: FnMut(u64, usize, usize, usize)>(&self, addr: Address, len: usize, mut visit: F) {
        let mut done = 0usize;
        while done < len {
            let current = addr.as_u64().wrapping_add(done as u64);
            let page_addr = current & !(self.page_size - 1);
            let page_off = (current - page_addr) as usize;
            let chunk = (self.page_size as usize - page_off).min(len - done);
            visit(page_addr, page_off, done, chunk);
            done += chunk;
        }
    }

    fn check_access(&self, addr: Address, len: usize, write: bool) -> Result<()> {
        if addr.checked_add(len as u64).is_none() && len > 0 {
            return Err(AccessError::unavailable(addr, "span wraps the address space"));
        }
        let pages = self.pages.read();
        for page_addr in self.page_addresses(addr, len) {
            let page = pages
                .get(&page_addr)
                .ok_or_else(|| AccessError::unavailable(Address::new(page_addr), "page not mapped"))?;
            let allowed = if write { page.protection.can_write() } else { page.protection.can_read() };
            if !allowed {
                return Err(AccessError::unavailable(
                    Address::new(page_addr),
                    format!("access denied ({})", page.protection),
                ));
            }
        }
        Ok(())
    }
}

impl TargetMemory for PagedMemory {
    fn read_memory(&self, addr: Address, buffer: &mut [u8]) -> Result<()> {
        self.check_access(addr, buffer.len(), false)?;
        let pages = self.pages.read();
        self.walk(addr, buffer.len(), |page_addr, page_off, start, len| {
            if let Some(page) = pages.get(&page_addr) {
                buffer[start..start + len].copy_from_slice(&page.data[page_off..page_off + len]);
            }
        });
        log::trace!("read {} bytes at {}", buffer.len(), addr);
        Ok(())
    }

    fn write_memory(&self, addr: Address, data: &[u8]) -> Result<()> {
        self.check_access(addr, data.len(), true)?;
        let mut pages = self.pages.write();
        self.walk(addr, data.len(), |page_addr, page_off, start, len| {
            if let Some(page) = pages.get_mut(&page_addr) {
                page.data[page_off..page_off + len].copy_from_slice(&data[start..start + len]);
            }
        });
        log::trace!("wrote {} bytes at {}", data.len(), addr);
        Ok(())
    }

    fn is_valid_range(&self, addr: Address, len: usize) -> bool {
        self.check_access(addr, len, false).is_ok()
    }
}
