//! Growable, zero-initialized byte buffer with a capacity policy.

use std::ops::Range;

use crate::config::{GrowthPolicy, StreamConfig};
use crate::error::{Result, VolStreamError};

/// The backing memory of one stream.
///
/// `data.len()` is the allocated capacity; every byte of it is initialized.
/// The logical length lives in the stream state, not here.
#[derive(Debug)]
pub(crate) struct StreamBuffer {
    data: Vec<u8>,
    growth: GrowthPolicy,
    min_capacity: usize,
    max_capacity: Option<usize>,
}

impl StreamBuffer {
    /// Allocates the initial buffer described by `config`.
    pub(crate) fn with_config(config: &StreamConfig) -> Result<Self> {
        let mut buffer = Self {
            data: Vec::new(),
            growth: config.growth(),
            min_capacity: config.min_capacity(),
            max_capacity: config.max_capacity(),
        };
        buffer.reallocate(config.initial_capacity())?;
        Ok(buffer)
    }

    /// Returns the allocated size.
    pub(crate) fn capacity(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Grows the capacity until at least `required` bytes fit.
    ///
    /// Existing bytes are preserved. A request above the capacity cap still
    /// grows the buffer to the cap before failing, so callers can use the
    /// room that is left. Any other failure leaves the buffer unchanged.
    pub(crate) fn expand(&mut self, required: usize) -> Result<()> {
        let current = self.capacity();
        if required <= current {
            return Ok(());
        }

        let oom = VolStreamError::OutOfMemory {
            requested: required,
        };
        if let Some(max) = self.max_capacity {
            if required > max {
                tracing::warn!(required, max, "buffer growth exceeds max capacity");
                if current < max && self.reallocate(max).is_ok() {
                    tracing::trace!(from = current, to = max, "expanded stream buffer to cap");
                }
                return Err(oom);
            }
        }
        let mut target = self.growth.grow(current, required).ok_or(oom)?;
        if let Some(max) = self.max_capacity {
            target = target.min(max);
        }

        self.reallocate(target)?;
        tracing::trace!(from = current, to = target, "expanded stream buffer");
        Ok(())
    }

    /// Reduces the capacity toward `target` by halving, never below the floor.
    ///
    /// Best effort: the buffer may stay larger than strictly needed.
    pub(crate) fn shrink(&mut self, target: usize) {
        let current = self.capacity();
        let mut capacity = current;
        while capacity / 2 >= self.min_capacity && capacity > target.saturating_mul(2) {
            capacity /= 2;
        }
        if capacity < current {
            self.data.truncate(capacity);
            self.data.shrink_to(capacity);
            tracing::trace!(from = current, to = capacity, "shrank stream buffer");
        }
    }

    /// Zeroes `range`, clipped to the allocation.
    pub(crate) fn zero_fill(&mut self, range: Range<usize>) {
        let end = range.end.min(self.data.len());
        if range.start < end {
            self.data[range.start..end].fill(0);
        }
    }

    fn reallocate(&mut self, capacity: usize) -> Result<()> {
        let additional = capacity.saturating_sub(self.data.len());
        self.data.try_reserve_exact(additional).map_err(|_| {
            tracing::warn!(requested = capacity, "stream buffer allocation failed");
            VolStreamError::OutOfMemory {
                requested: capacity,
            }
        })?;
        self.data.resize(capacity, 0);
        Ok(())
    }
}
