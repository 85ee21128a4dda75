//! Multi-table database over a single resource.
//!
//! Every table is an ordered record sequence with the same insert and read
//! rules as [`RecordStore`](crate::RecordStore). All tables are persisted
//! together as one document.

use crate::codec::{JsonCodec, PersistenceCodec};
use crate::error::Result;
use crate::handle::Handle;
use crate::records::Tables;
use crate::resource::{FileResource, Resource};
use crate::types::{StoreConfig, StoreState, StoreStats};
use std::path::Path;

/// Named tables of string records backed by one resource.
pub struct Database<R = FileResource, C = JsonCodec>
where
    R: Resource,
    C: PersistenceCodec,
{
    handle: Handle<R, C, Tables>,
}

impl Database<FileResource, JsonCodec> {
    /// Create a new, empty database file at `path`, replacing any existing one.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(FileResource::create(path)?, JsonCodec::default())
    }

    /// Open the database file at `path`, creating it if missing.
    pub fn connect(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(FileResource::connect(path)?, JsonCodec::default())
    }
}

impl<R: Resource, C: PersistenceCodec> Database<R, C> {
    pub fn open(resource: R, codec: C) -> Result<Self> {
        Self::open_with_config(resource, codec, StoreConfig::default())
    }

    pub fn open_with_config(resource: R, codec: C, config: StoreConfig) -> Result<Self> {
        Ok(Self {
            handle: Handle::open(resource, codec, config)?,
        })
    }

    /// Create an empty table. Fails if the name is taken.
    pub fn create_table(&self, name: &str) -> Result<()> {
        self.handle.mutate(|tables| tables.create(name))
    }

    /// Delete a table with all of its records.
    pub fn drop_table(&self, name: &str) -> Result<()> {
        self.handle.mutate(|tables| tables.drop_table(name))
    }

    /// Table names in creation order.
    pub fn tables(&self) -> Result<Vec<String>> {
        self.handle.read(|tables| Ok(tables.names()))
    }

    /// Append a record to `table`.
    ///
    /// As with [`RecordStore::insert`](crate::RecordStore::insert), a failed
    /// policy-triggered save leaves the record in memory; retry with `save`.
    pub fn insert(&self, table: &str, record: impl Into<String>) -> Result<()> {
        let record = record.into();
        self.handle.mutate(move |tables| {
            tables.get_mut(table)?.push(record);
            Ok(())
        })
    }

    /// Read records from `table`, with the same limit rules as
    /// [`RecordStore::read`](crate::RecordStore::read).
    pub fn read(&self, table: &str, limit: i64) -> Result<Vec<String>> {
        self.handle.read(|tables| Ok(tables.get(table)?.slice(limit)))
    }

    /// Number of records in `table`.
    pub fn len(&self, table: &str) -> Result<usize> {
        self.handle.read(|tables| Ok(tables.get(table)?.len()))
    }

    pub fn save(&self) -> Result<()> {
        self.handle.save()
    }

    /// Save pending changes and release the resource. Idempotent.
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
}
