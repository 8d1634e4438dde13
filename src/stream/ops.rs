//! Read, write, seek and resize over a [`StreamState`].
//!
//! Every gap opened past the logical end, whether by seeking, writing
//! or growing the length, is zero-filled before it becomes visible.

use std::io::SeekFrom;

use super::state::StreamState;
use crate::error::{Result, VolStreamError};

/// The primitive file operations of a volatile stream.
///
/// A generic stream layer (buffering, formatting, line iteration) can hold
/// an engine as `Box<dyn StreamOps>` and drive it through these four calls.
/// Once [`StreamOps::close`] succeeds every call fails with
/// [`VolStreamError::InvalidHandle`].
pub trait StreamOps: Send {
    /// Copies up to `dst.len()` bytes from the cursor and advances it.
    ///
    /// Returns `0` at end of data.
    fn read(&mut self, dst: &mut [u8]) -> Result<usize>;

    /// Copies `src` at the cursor, growing the stream as needed.
    ///
    /// Returns the number of bytes stored. Fewer than `src.len()` means the
    /// buffer could not grow; the bytes already copied stay in place.
    fn write(&mut self, src: &[u8]) -> Result<usize>;

    /// Moves the cursor and returns the new position.
    ///
    /// Seeking past the end extends the stream with zero bytes.
    fn seek(&mut self, pos: SeekFrom) -> Result<u64>;

    /// Unregisters the stream and frees its buffer.
    fn close(&mut self) -> Result<()>;
}

/// Converts a non-negative offset to a buffer index.
///
/// No allocation can exceed `isize::MAX` bytes, so larger offsets are invalid.
pub(crate) fn checked_offset(offset: i128) -> Result<usize> {
    if offset > isize::MAX as i128 {
        return Err(VolStreamError::InvalidArgument {
            message: "offset does not fit in memory",
        });
    }
    usize::try_from(offset).map_err(|_| VolStreamError::InvalidArgument {
        message: "offset does not fit in memory",
    })
}

impl StreamState {
    pub(crate) fn read(&mut self, dst: &mut [u8]) -> usize {
        let available = self.length.saturating_sub(self.position);
        let n = dst.len().min(available);
        if n > 0 {
            let start = self.position;
            dst[..n].copy_from_slice(&self.buffer.as_slice()[start..start + n]);
            self.position += n;
        }
        n
    }

    pub(crate) fn write(&mut self, src: &[u8]) -> usize {
        if src.is_empty() {
            return 0;
        }

        // A failed expand is not fatal: copy whatever still fits.
        let _ = self.buffer.expand(self.position.saturating_add(src.len()));

        let room = self.buffer.capacity().saturating_sub(self.position);
        let n = src.len().min(room);
        if n < src.len() {
            tracing::warn!(
                requested = src.len(),
                written = n,
                position = self.position,
                "short write on volatile stream"
            );
        }
        if n == 0 {
            return 0;
        }

        if self.position > self.length {
            self.buffer.zero_fill(self.length..self.position);
        }
        let start = self.position;
        self.buffer.as_mut_slice()[start..start + n].copy_from_slice(&src[..n]);
        self.position += n;
        self.length = self.length.max(self.position);
        n
    }

    pub(crate) fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        let target = match pos {
            SeekFrom::Start(offset) => i128::from(offset),
            SeekFrom::Current(delta) => self.position as i128 + i128::from(delta),
            SeekFrom::End(delta) => self.length as i128 + i128::from(delta),
        };
        if target < 0 {
            return Err(VolStreamError::InvalidArgument {
                message: "seek to a negative position",
            });
        }
        let target = checked_offset(target)?;

        self.extend_to(target)?;
        self.position = target;
        Ok(target as u64)
    }

    /// Sets the logical length, zero-filling growth and shrinking on the way down.
    ///
    /// The cursor is left where it is, even past the new end.
    pub(crate) fn set_len(&mut self, new_length: usize) -> Result<()> {
        if new_length > self.length {
            self.extend_to(new_length)?;
        } else if new_length < self.length {
            self.buffer.shrink(new_length);
            self.length = new_length;
        }
        Ok(())
    }

    fn extend_to(&mut self, new_length: usize) -> Result<()> {
        if new_length <= self.length {
            return Ok(());
        }
        self.buffer.expand(new_length)?;
        self.buffer.zero_fill(self.length..new_length);
        self.length = new_length;
        Ok(())
    }
}
