// Thu Jan 16 2026 - Alex

use crate::memory::{is_range_inside, AccessError, Result};
use parking_lot::RwLock;
use std::sync::Arc;

/// Window `[offset, offset+length)` over a jointly owned byte buffer.
///
/// Sub-views alias the same allocation and keep it alive; a view can never
/// touch bytes outside its own window.
#[derive(Clone)]
pub(crate) struct BufferView {
    data: Arc<RwLock<Vec<u8>>>,
    offset: usize,
    length: usize,
}

impl BufferView {
    pub fn new(bytes: Vec<u8>) -> Self {
        let length = bytes.len();
        Self {
            data: Arc::new(RwLock::new(bytes)),
            offset: 0,
            length,
        }
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn contains(&self, pos: u64, len: u64) -> bool {
        is_range_inside(0, self.length as u64, pos, len)
    }

    pub fn read(&self, pos: usize, out: &mut [u8]) -> Result<()> {
        let start = self.absolute(pos, out.len())?;
        out.copy_from_slice(&self.data.read()[start..start + out.len()]);
        Ok(())
    }

    pub fn write(&self, pos: usize, bytes: &[u8]) -> Result<()> {
        let start = self.absolute(pos, bytes.len())?;
        self.data.write()[start..start + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    /// Caller has already checked that the window is inside this view.
    pub fn sub_view(&self, pos: usize, length: usize) -> Self {
        Self {
            data: Arc::clone(&self.data),
            offset: self.offset + pos,
            length,
        }
    }

    fn absolute(&self, pos: usize, len: usize) -> Result<usize> {
        if self.contains(pos as u64, len as u64) {
            Ok(self.offset + pos)
        } else {
            Err(AccessError::out_of_range(pos as u64, len as u64, self.length as u64))
        }
    }
}
