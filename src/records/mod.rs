//! In-memory record containers.
//!
//! A [`RecordSet`] is the ordered sequence behind a single store; [`Tables`]
//! groups named record sets for a multi-table database.

mod set;
mod tables;

pub use set::RecordSet;
pub use tables::Tables;
