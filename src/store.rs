//! Single-sequence record store.

use crate::codec::{JsonCodec, PersistenceCodec};
use crate::error::Result;
use crate::handle::Handle;
use crate::records::RecordSet;
use crate::resource::{FileResource, Resource};
use crate::types::{StoreConfig, StoreState, StoreStats};
use std::path::Path;

/// An ordered, append-only sequence of string records backed by a resource.
///
/// Provides:
/// - Inserting records at the end of the sequence
/// - Reading all, the first N, or the last N records
/// - Saving to and loading from the resource through a codec
/// - An explicit, irreversible close
///
/// Every method takes `&self`; the records, the lifecycle state and the
/// resource sit behind one lock, so a store can be shared between threads.
/// Once [`close`](Self::close) has run, everything except `close` fails with
/// [`StoreError::Closed`](crate::StoreError::Closed).
pub struct RecordStore<R = FileResource, C = JsonCodec>
where
    R: Resource,
    C: PersistenceCodec,
{
    handle: Handle<R, C, RecordSet>,
}

impl RecordStore<FileResource, JsonCodec> {
    /// Create a new, empty store file at `path`, replacing any existing one.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(FileResource::create(path)?, JsonCodec::default())
    }

    /// Open the store file at `path`, creating it if missing.
    pub fn connect(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(FileResource::connect(path)?, JsonCodec::default())
    }
}

impl<R: Resource, C: PersistenceCodec> RecordStore<R, C> {
    /// Open a store on an already-open resource with the default config.
    ///
    /// An empty resource gives an empty store; otherwise the records are
    /// loaded through `codec`, and malformed content is an error.
    pub fn open(resource: R, codec: C) -> Result<Self> {
        Self::open_with_config(resource, codec, StoreConfig::default())
    }

    /// Open a store with an explicit config.
    pub fn open_with_config(resource: R, codec: C, config: StoreConfig) -> Result<Self> {
        Ok(Self {
            handle: Handle::open(resource, codec, config)?,
        })
    }

    /// Append a record.
    ///
    /// Under [`FlushPolicy::EveryWrite`](crate::FlushPolicy::EveryWrite) or
    /// [`FlushPolicy::EveryN`](crate::FlushPolicy::EveryN) this may also save.
    /// If that save fails the error is returned but the record has already
    /// been appended in memory and will be written by the next successful
    /// save. Retrying the insert appends it a second time; call
    /// [`save`](Self::save) instead.
    pub fn insert(&self, record: impl Into<String>) -> Result<()> {
        let record = record.into();
        self.handle.mutate(move |set| {
            set.push(record);
            Ok(())
        })
    }

    /// Read records.
    ///
    /// `0` returns every record, a positive limit the first `limit` records,
    /// and a negative limit the last `|limit|` records. The result is always
    /// oldest first and is a copy.
    pub fn read(&self, limit: i64) -> Result<Vec<String>> {
        self.handle.read(|set| Ok(set.slice(limit)))
    }

    /// Read every record.
    pub fn read_all(&self) -> Result<Vec<String>> {
        self.read(0)
    }

    /// Number of records.
    pub fn len(&self) -> Result<usize> {
        self.handle.read(|set| Ok(set.len()))
    }

    pub fn is_empty(&self) -> Result<bool> {
        self.handle.read(|set| Ok(set.is_empty()))
    }

    /// Write all records to the resource.
    pub fn save(&self) -> Result<()> {
        self.handle.save()
    }

    /// Save pending changes and release the resource.
    ///
    /// Calling this on a closed store does nothing.
    pub fn close(&self) -> Result<()> {
        self.handle.close()
    }

    pub fn is_open(&self) -> bool {
        self.state() == StoreState::Open
    }

    pub fn state(&self) -> StoreState {
        self.handle.state()
    }

    pub fn stats(&self) -> Result<StoreStats> {
        self.handle.stats()
    }

    pub fn config(&self) -> &StoreConfig {
        self.handle.config()
    }

    pub fn codec(&self) -> &C {
        self.handle.codec()
    }
}

/// Create a new, empty store file at `path`.
pub fn create(path: impl AsRef<Path>) -> Result<RecordStore> {
    RecordStore::create(path)
}

/// Open the store file at `path`, creating it if missing.
pub fn connect(path: impl AsRef<Path>) -> Result<RecordStore> {
    RecordStore::connect(path)
}
