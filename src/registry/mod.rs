//! Process-wide table of open streams.
//!
//! Management calls ([`crate::truncate`], [`crate::snapshot`]) only carry a
//! [`Handle`]. The registry maps that handle back to the stream's shared state.
//! Lookups take the table's read lock; open and close take the write lock.
//! Ordinary reads and writes go through the stream's own binding and never
//! touch the registry.

use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};

use crate::error::{Result, VolStreamError};
use crate::stream::SharedState;

/// Opaque identifier of an open stream.
///
/// Valid from [`crate::VolatileStream::open`] until the stream is closed.
/// Handles are never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u64);

impl Handle {
    /// Returns the raw identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }

    #[cfg(test)]
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "volstream#{}", self.0)
    }
}

/// Handle-to-state table guarded by a reader-writer lock.
#[derive(Debug)]
pub(crate) struct Registry {
    streams: RwLock<HashMap<Handle, SharedState>>,
    next_handle: AtomicU64,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            streams: RwLock::new(HashMap::new()),
            next_handle: AtomicU64::new(1),
        }
    }

    /// Inserts `state` under a fresh handle.
    pub(crate) fn register(&self, state: SharedState) -> Handle {
        let handle = Handle(self.next_handle.fetch_add(1, Ordering::Relaxed));
        self.streams.write().insert(handle, state);
        handle
    }

    /// Removes `handle`. Returns the state it was bound to, if any.
    pub(crate) fn unregister(&self, handle: Handle) -> Option<SharedState> {
        self.streams.write().remove(&handle)
    }

    /// Finds the state bound to `handle`.
    ///
    /// The returned [`Lookup`] keeps the table read-locked: opens and closes
    /// wait until it is released.
    pub(crate) fn lookup(&self, handle: Handle) -> Result<Lookup<'_>> {
        RwLockReadGuard::try_map(self.streams.read(), |streams| streams.get(&handle))
            .map(|state| Lookup { state })
            .map_err(|_| VolStreamError::InvalidHandle(handle))
    }

    pub(crate) fn contains(&self, handle: Handle) -> bool {
        self.streams.read().contains_key(&handle)
    }

    pub(crate) fn len(&self) -> usize {
        self.streams.read().len()
    }
}

/// A registry entry borrowed under the table's read lock.
pub(crate) struct Lookup<'a> {
    state: MappedRwLockReadGuard<'a, SharedState>,
}

impl Lookup<'_> {
    /// Gives the read lock back to the registry.
    pub(crate) fn release(self) {
        drop(self);
    }
}

impl Deref for Lookup<'_> {
    type Target = SharedState;

    fn deref(&self) -> &SharedState {
        &self.state
    }
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// The process-wide registry, created on first use.
pub(crate) fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}
