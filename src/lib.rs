//! # Row Store
//!
//! A small, single-file record store. Records are opaque strings kept in
//! insertion order in memory and persisted to one backing resource through a
//! pluggable codec.
//!
//! ## Core Concepts
//!
//! - **Records**: Opaque strings, appended in order, read back whole
//! - **Resources**: The file (or buffer) a store is persisted into
//! - **Codecs**: JSON, MessagePack, or either wrapped in a CRC32 frame
//! - **Lifecycle**: Stores are open until closed; closing is irreversible
//!
//! ## Example
//!
//! ```no_run
//! use rowstore::{Database, RecordStore};
//!
//! # fn main() -> rowstore::Result<()> {
//! let store = RecordStore::create("records.json")?;
//! store.insert("hello, world!")?;
//! store.insert("2nd string")?;
//! assert_eq!(store.read(-1)?, vec!["2nd string"]);
//! store.close()?;
//!
//! let db = Database::connect("tables.json")?;
//! db.create_table("customers")?;
//! db.insert("customers", "item #1")?;
//! db.close()?;
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod database;
pub mod error;
mod handle;
pub mod records;
pub mod resource;
pub mod store;
pub mod types;

// Re-exports
pub use codec::{ChecksummedCodec, JsonCodec, MessagePackCodec, PersistenceCodec};
pub use database::Database;
pub use error::{ErrorKind, Result, StoreError};
pub use records::{RecordSet, Tables};
pub use resource::{FileResource, MemoryResource, Resource};
pub use store::{connect, create, RecordStore};
pub use types::*;
