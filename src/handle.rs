//! Lifecycle shared by every store handle.
//!
//! A handle owns a resource, a codec and an in-memory document. It enforces
//! the open -> closed lifecycle, loads the document on open, and writes it
//! back according to the configured flush policy.

use crate::codec::PersistenceCodec;
use crate::error::{Result, StoreError};
use crate::records::{RecordSet, Tables};
use crate::resource::Resource;
use crate::types::{StoreConfig, StoreState, StoreStats};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// Something a handle can persist.
pub(crate) trait Document: Serialize + DeserializeOwned + Default {
    fn record_count(&self) -> usize;
}

impl Document for RecordSet {
    fn record_count(&self) -> usize {
        self.len()
    }
}

impl Document for Tables {
    fn record_count(&self) -> usize {
        Tables::record_count(self)
    }
}

/// State guarded by the handle's lock.
struct Inner<R, D> {
    resource: R,
    document: D,
    state: StoreState,
    /// Mutations since the last successful save.
    unsaved: u64,
}

impl<R, D> Inner<R, D> {
    fn ensure_open(&self) -> Result<()> {
        match self.state {
            StoreState::Open => Ok(()),
            StoreState::Closed => Err(StoreError::Closed),
        }
    }
}

/// Resource + codec + document under a single lock.
pub(crate) struct Handle<R, C, D>
where
    R: Resource,
    C: PersistenceCodec,
    D: Document,
{
    codec: C,
    config: StoreConfig,
    inner: Mutex<Inner<R, D>>,
}

impl<R, C, D> Handle<R, C, D>
where
    R: Resource,
    C: PersistenceCodec,
    D: Document,
{
    /// Wrap an open resource, loading its document if it has any content.
    pub fn open(mut resource: R, codec: C, config: StoreConfig) -> Result<Self> {
        if !resource.is_live() {
            return Err(StoreError::Resource("invalid handle".into()));
        }

        let len = resource.len()?;
        let document = if len == 0 {
            D::default()
        } else {
            codec.load(&mut resource)?
        };

        debug!(
            codec = codec.name(),
            bytes = len,
            records = document.record_count(),
            "opened store"
        );

        Ok(Self {
            codec,
            config,
            inner: Mutex::new(Inner {
                resource,
                document,
                state: StoreState::Open,
                unsaved: 0,
            }),
        })
    }

    /// Run `f` against the document if the handle is open.
    pub fn read<T>(&self, f: impl FnOnce(&D) -> Result<T>) -> Result<T> {
        let inner = self.inner.lock();
        inner.ensure_open()?;
        f(&inner.document)
    }

    /// Run `f` against the document if the handle is open, then save if the
    /// flush policy says so.
    ///
    /// A failed `f` leaves the unsaved count untouched. A failed save is
    /// returned, but the mutation stays in memory and is retried on the next
    /// save.
    pub fn mutate<T>(&self, f: impl FnOnce(&mut D) -> Result<T>) -> Result<T> {
        let mut inner = self.inner.lock();
        inner.ensure_open()?;

        let out = f(&mut inner.document)?;
        inner.unsaved += 1;

        if self.config.flush_policy.is_due(inner.unsaved) {
            self.save_locked(&mut inner)?;
        }

        Ok(out)
    }

    /// Write the document to the resource.
    pub fn save(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.ensure_open()?;
        self.save_locked(&mut inner)
    }

    fn save_locked(&self, inner: &mut Inner<R, D>) -> Result<()> {
        self.codec.save(&mut inner.resource, &inner.document)?;
        inner.resource.flush(self.config.sync_on_save)?;

        debug!(
            codec = self.codec.name(),
            records = inner.document.record_count(),
            "saved store"
        );
        inner.unsaved = 0;
        Ok(())
    }

    /// Save pending changes and release the resource. Idempotent.
    ///
    /// The handle is closed and the resource released even when the final
    /// save fails; the save error is returned.
    pub fn close(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        if inner.state == StoreState::Closed {
            return Ok(());
        }

        let saved = if inner.unsaved > 0 {
            self.save_locked(&mut inner)
        } else {
            Ok(())
        };

        let released = inner.resource.close();
        inner.state = StoreState::Closed;
        inner.document = D::default();
        inner.unsaved = 0;

        debug!(codec = self.codec.name(), "closed store");
        saved.and(released)
    }

    pub fn state(&self) -> StoreState {
        self.inner.lock().state
    }

    pub fn stats(&self) -> Result<StoreStats> {
        let inner = self.inner.lock();
        inner.ensure_open()?;
        Ok(StoreStats {
            record_count: inner.document.record_count() as u64,
            unsaved_changes: inner.unsaved,
            resource_bytes: inner.resource.len()?,
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }
}

impl<R, C, D> Drop for Handle<R, C, D>
where
    R: Resource,
    C: PersistenceCodec,
    D: Document,
{
    fn drop(&mut self) {
        // Best-effort close for handles dropped while open
        if let Err(e) = self.close() {
            warn!(error = %e, "failed to close store on drop");
        }
    }
}
