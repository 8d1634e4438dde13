//! Per-stream state: buffer, logical length and cursor.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::buffer::StreamBuffer;
use crate::config::StreamConfig;
use crate::error::Result;

/// State shared between a [`crate::VolatileStream`] and its registry entry.
pub(crate) type SharedState = Arc<Mutex<StreamState>>;

/// The data behind one open stream.
///
/// Invariant: `buffer.capacity() >= length`. `position` may sit beyond
/// `length` after a downward truncate; the next write fills the gap with zeros.
#[derive(Debug)]
pub(crate) struct StreamState {
    pub(super) buffer: StreamBuffer,
    pub(super) length: usize,
    pub(super) position: usize,
}

impl StreamState {
    pub(crate) fn new(config: &StreamConfig) -> Result<Self> {
        Ok(Self {
            buffer: StreamBuffer::with_config(config)?,
            length: 0,
            position: 0,
        })
    }

    pub(crate) fn shared(config: &StreamConfig) -> Result<SharedState> {
        Self::new(config).map(|state| Arc::new(Mutex::new(state)))
    }

    /// Logical length in bytes.
    pub(crate) fn len(&self) -> usize {
        self.length
    }

    pub(crate) fn position(&self) -> usize {
        self.position
    }

    pub(crate) fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// The valid bytes, `[0, length)`.
    pub(crate) fn contents(&self) -> &[u8] {
        &self.buffer.as_slice()[..self.length]
    }
}
