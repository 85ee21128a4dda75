//! In-memory resource for tests and embedding.

use crate::error::{Result, StoreError};
use crate::resource::Resource;
use parking_lot::Mutex;
use std::sync::Arc;

/// A byte buffer standing in for a file.
///
/// Handles produced by [`MemoryResource::reopen`] share the same buffer, so a
/// store can be closed on one handle and loaded again from another.
#[derive(Debug)]
pub struct MemoryResource {
    buffer: Arc<Mutex<Vec<u8>>>,
    live: bool,
}

impl MemoryResource {
    /// Empty, open buffer.
    pub fn new() -> Self {
        Self::with_bytes(Vec::new())
    }

    /// Open buffer holding `bytes`.
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            buffer: Arc::new(Mutex::new(bytes.into())),
            live: true,
        }
    }

    /// A new open handle onto the same buffer.
    pub fn reopen(&self) -> Self {
        Self {
            buffer: Arc::clone(&self.buffer),
            live: true,
        }
    }

    /// Snapshot of the buffer, readable even after close.
    pub fn contents(&self) -> Vec<u8> {
        self.buffer.lock().clone()
    }

    fn check_live(&self) -> Result<()> {
        if self.live {
            Ok(())
        } else {
            Err(StoreError::resource_closed())
        }
    }
}

impl Default for MemoryResource {
    fn default() -> Self {
        Self::new()
    }
}

impl Resource for MemoryResource {
    fn is_live(&self) -> bool {
        self.live
    }

    fn len(&self) -> Result<u64> {
        self.check_live()?;
        Ok(self.buffer.lock().len() as u64)
    }

    fn read_all(&mut self) -> Result<Vec<u8>> {
        self.check_live()?;
        Ok(self.buffer.lock().clone())
    }

    fn append(&mut self, bytes: &[u8]) -> Result<()> {
        self.check_live()?;
        self.buffer.lock().extend_from_slice(bytes);
        Ok(())
    }

    fn replace(&mut self, bytes: &[u8]) -> Result<()> {
        self.check_live()?;
        let mut buffer = self.buffer.lock();
        buffer.clear();
        buffer.extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&mut self, _sync: bool) -> Result<()> {
        self.check_live()
    }

    fn close(&mut self) -> Result<()> {
        self.live = false;
        Ok(())
    }
}
