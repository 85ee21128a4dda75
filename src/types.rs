//! Core types for the record store.

use std::fmt;

/// Lifecycle state of a store handle.
///
/// Transitions are monotonic: `Open` -> `Closed`, never back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StoreState {
    #[default]
    Open,
    Closed,
}

impl fmt::Display for StoreState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreState::Open => write!(f, "open"),
            StoreState::Closed => write!(f, "closed"),
        }
    }
}

/// When in-memory changes are written back to the resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FlushPolicy {
    /// Save only on an explicit `save()` and on `close()`.
    #[default]
    OnClose,
    /// Save after every mutation.
    EveryWrite,
    /// Save after every N unsaved mutations (0 behaves like `EveryWrite`).
    EveryN(u64),
}

impl FlushPolicy {
    /// Whether a save is due with `unsaved` pending mutations.
    pub fn is_due(&self, unsaved: u64) -> bool {
        match *self {
            FlushPolicy::OnClose => false,
            FlushPolicy::EveryWrite => unsaved > 0,
            FlushPolicy::EveryN(n) => unsaved >= n.max(1),
        }
    }
}

/// Store configuration.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// When mutations are persisted.
    pub flush_policy: FlushPolicy,

    /// Whether a save also syncs the resource to durable storage.
    pub sync_on_save: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            flush_policy: FlushPolicy::OnClose,
            sync_on_save: true,
        }
    }
}

/// Store statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Number of records held in memory.
    pub record_count: u64,
    /// Mutations not yet written to the resource.
    pub unsaved_changes: u64,
    /// Current byte length of the resource.
    pub resource_bytes: u64,
}
