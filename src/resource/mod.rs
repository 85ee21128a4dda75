//! Backing resources for a store.
//!
//! A resource is an opaque byte container. Stores never interpret its
//! transport; they only look at its length when opening and hand it to a
//! codec for loading and saving.

mod file;
mod memory;

pub use file::FileResource;
pub use memory::MemoryResource;

use crate::error::Result;

/// A byte container a store persists into.
///
/// # Invariants
///
/// - after `close`, every other method fails with a resource error
/// - `close` releases the underlying handle at most once; later calls are no-ops
/// - `replace` leaves exactly the given bytes in the resource
pub trait Resource {
    /// Whether the resource is still open.
    fn is_live(&self) -> bool;

    /// Current length in bytes.
    fn len(&self) -> Result<u64>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Read the full content.
    fn read_all(&mut self) -> Result<Vec<u8>>;

    /// Append bytes to the end.
    fn append(&mut self, bytes: &[u8]) -> Result<()>;

    /// Replace the full content with `bytes`.
    fn replace(&mut self, bytes: &[u8]) -> Result<()>;

    /// Push buffered writes out. With `sync`, also wait until they are durable.
    fn flush(&mut self, sync: bool) -> Result<()>;

    /// Release the resource.
    fn close(&mut self) -> Result<()>;
}
