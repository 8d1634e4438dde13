//! Handle-based management of open streams.
//!
//! These calls take only a [`Handle`], so they work from code that never
//! owned the [`crate::VolatileStream`]. Each one resolves the handle through
//! the registry, then locks the stream for the duration of the call.
//!
//! A buffering layer on top of the stream (for instance `BufWriter`) must be
//! flushed first, or its pending bytes will not be seen here.

use bytes::Bytes;

use crate::error::{Result, VolStreamError};
use crate::registry::{Handle, registry};
use crate::stream::checked_offset;

/// Sets the logical length of the stream behind `handle`.
///
/// Growing zero-fills the new region. Shrinking may give memory back to the
/// allocator. The cursor is not moved, even if it ends up past the new end;
/// the next write then fills the gap with zeros.
///
/// # Errors
///
/// - [`VolStreamError::InvalidArgument`] if `new_length` is negative or
///   larger than any allocation can be
/// - [`VolStreamError::InvalidHandle`] if the stream is closed
/// - [`VolStreamError::OutOfMemory`] if growing fails; the stream is unchanged
///
/// # Example
///
/// ```
/// use volstream::{VolatileStream, truncate, snapshot};
///
/// let mut stream = VolatileStream::open()?;
/// stream.write(b"0123456789")?;
///
/// truncate(stream.handle(), 3)?;
/// assert_eq!(&snapshot(stream.handle())?[..], b"012");
/// # Ok::<(), volstream::VolStreamError>(())
/// ```
pub fn truncate(handle: Handle, new_length: i64) -> Result<()> {
    if new_length < 0 {
        return Err(VolStreamError::InvalidArgument {
            message: "negative stream length",
        });
    }
    let new_length = checked_offset(i128::from(new_length))?;

    let lookup = registry().lookup(handle)?;
    let result = lookup.lock().set_len(new_length);
    lookup.release();

    tracing::trace!(%handle, new_length, ok = result.is_ok(), "truncated volatile stream");
    result
}

/// Copies the current contents of the stream behind `handle`.
///
/// The returned bytes are detached from the stream: later writes, truncates
/// or a close do not affect them.
pub fn snapshot(handle: Handle) -> Result<Bytes> {
    with_snapshot(handle, Bytes::copy_from_slice)
}

/// Lends the live contents of the stream behind `handle` to `f`.
///
/// The stream stays locked while `f` runs, so the slice cannot change under
/// it. `f` must not call back into the same stream, or it will deadlock.
///
/// # Example
///
/// ```
/// use volstream::{VolatileStream, with_snapshot};
///
/// let mut stream = VolatileStream::open()?;
/// stream.write(b"abc")?;
///
/// let zeros = with_snapshot(stream.handle(), |bytes| bytes.iter().filter(|&&b| b == 0).count())?;
/// assert_eq!(zeros, 0);
/// # Ok::<(), volstream::VolStreamError>(())
/// ```
pub fn with_snapshot<R>(handle: Handle, f: impl FnOnce(&[u8]) -> R) -> Result<R> {
    let lookup = registry().lookup(handle)?;
    let state = lookup.lock();
    let result = f(state.contents());
    drop(state);
    lookup.release();
    Ok(result)
}

/// Returns the logical length of the stream behind `handle`.
pub fn stream_len(handle: Handle) -> Result<u64> {
    let lookup = registry().lookup(handle)?;
    let length = lookup.lock().len() as u64;
    lookup.release();
    Ok(length)
}

/// Returns true while the stream behind `handle` is open.
pub fn is_open(handle: Handle) -> bool {
    registry().contains(handle)
}

/// Number of streams currently open in this process.
pub fn open_streams() -> usize {
    registry().len()
}
