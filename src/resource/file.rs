//! File-backed resource.

use crate::error::{Result, StoreError};
use crate::resource::Resource;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

/// A file on disk, held under an exclusive advisory lock while open.
#[derive(Debug)]
pub struct FileResource {
    /// File handle, `None` once closed.
    file: Option<File>,
}

impl FileResource {
    /// Create the file, discarding any existing content.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let resource = Self::open_locked(path.as_ref())?;
        // Truncate only after the lock is held so another handle's data is
        // never clobbered.
        if let Some(file) = &resource.file {
            file.set_len(0)?;
        }
        Ok(resource)
    }

    /// Open the file, creating it if missing and keeping existing content.
    pub fn connect(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_locked(path.as_ref())
    }

    fn open_locked(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        file.try_lock_exclusive().map_err(|_| StoreError::Locked)?;

        Ok(Self { file: Some(file) })
    }

    fn file(&mut self) -> Result<&mut File> {
        self.file.as_mut().ok_or_else(StoreError::resource_closed)
    }
}

impl Resource for FileResource {
    fn is_live(&self) -> bool {
        self.file.is_some()
    }

    fn len(&self) -> Result<u64> {
        let file = self.file.as_ref().ok_or_else(StoreError::resource_closed)?;
        Ok(file.metadata()?.len())
    }

    fn read_all(&mut self) -> Result<Vec<u8>> {
        let file = self.file()?;
        file.seek(SeekFrom::Start(0))?;
        let mut content = Vec::new();
        file.read_to_end(&mut content)?;
        Ok(content)
    }

    fn append(&mut self, bytes: &[u8]) -> Result<()> {
        let file = self.file()?;
        file.seek(SeekFrom::End(0))?;
        file.write_all(bytes)?;
        Ok(())
    }

    fn replace(&mut self, bytes: &[u8]) -> Result<()> {
        let file = self.file()?;
        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
        file.write_all(bytes)?;
        Ok(())
    }

    fn flush(&mut self, sync: bool) -> Result<()> {
        let file = self.file()?;
        file.flush()?;
        if sync {
            file.sync_all()?;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        // Taking the handle first means it is dropped even if sync fails.
        if let Some(file) = self.file.take() {
            file.sync_all()?;
            FileExt::unlock(&file)?;
        }
        Ok(())
    }
}
