//! Stream lifecycle: open, bind, close.

use std::io::SeekFrom;
use std::sync::Arc;

use bytes::Bytes;

use super::ops::StreamOps;
use super::{SharedState, StreamState};
use crate::config::StreamConfig;
use crate::error::{Result, VolStreamError};
use crate::manage;
use crate::registry::{Handle, registry};

/// A memory-only file.
///
/// The stream grows as data is written or the cursor is moved past the end,
/// reads back zeros for every gap, and releases its memory when closed or
/// dropped. Its [`Handle`] can be passed to [`crate::truncate`] and
/// [`crate::snapshot`] by code that does not own the stream.
///
/// `VolatileStream` implements [`std::io::Read`], [`std::io::Write`] and
/// [`std::io::Seek`], so it can sit under `BufReader`/`BufWriter`.
///
/// # Example
///
/// ```
/// use std::io::{Read, SeekFrom, Write};
/// use volstream::VolatileStream;
///
/// let mut stream = VolatileStream::open()?;
/// stream.write_all(b"hello")?;
/// stream.seek(SeekFrom::Start(0))?;
///
/// let mut text = String::new();
/// stream.read_to_string(&mut text)?;
/// assert_eq!(text, "hello");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct VolatileStream {
    handle: Handle,
    state: Option<SharedState>,
}

impl VolatileStream {
    /// Opens an empty stream with the default configuration.
    ///
    /// # Errors
    ///
    /// [`VolStreamError::OutOfMemory`] if the initial buffer cannot be allocated.
    pub fn open() -> Result<Self> {
        Self::open_with(StreamConfig::default())
    }

    /// Opens an empty stream with a custom buffer configuration.
    ///
    /// # Errors
    ///
    /// [`VolStreamError::InvalidConfig`] if `config` does not validate, or
    /// [`VolStreamError::OutOfMemory`] if the initial buffer cannot be allocated.
    ///
    /// # Example
    ///
    /// ```
    /// use volstream::{StreamConfig, VolatileStream};
    ///
    /// let stream = VolatileStream::open_with(StreamConfig::new(64, 64)?)?;
    /// assert_eq!(stream.capacity()?, 64);
    /// # Ok::<(), volstream::VolStreamError>(())
    /// ```
    pub fn open_with(config: StreamConfig) -> Result<Self> {
        config.validate()?;
        let state = StreamState::shared(&config)?;
        let handle = registry().register(Arc::clone(&state));
        tracing::debug!(%handle, capacity = config.initial_capacity(), "opened volatile stream");
        Ok(Self {
            handle,
            state: Some(state),
        })
    }

    /// Returns the handle accepted by the management calls.
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// Returns true once the stream has been closed.
    pub fn is_closed(&self) -> bool {
        self.state.is_none()
    }

    /// Logical length in bytes.
    pub fn len(&self) -> Result<u64> {
        Ok(self.state()?.lock().len() as u64)
    }

    /// Returns true if the stream holds no bytes.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.state()?.lock().len() == 0)
    }

    /// Current cursor position.
    pub fn position(&self) -> Result<u64> {
        Ok(self.state()?.lock().position() as u64)
    }

    /// Bytes currently allocated for the buffer.
    pub fn capacity(&self) -> Result<usize> {
        Ok(self.state()?.lock().capacity())
    }

    /// See [`StreamOps::read`].
    pub fn read(&mut self, dst: &mut [u8]) -> Result<usize> {
        StreamOps::read(self, dst)
    }

    /// See [`StreamOps::write`].
    pub fn write(&mut self, src: &[u8]) -> Result<usize> {
        StreamOps::write(self, src)
    }

    /// See [`StreamOps::seek`].
    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        StreamOps::seek(self, pos)
    }

    /// Truncates or extends the stream through its handle.
    ///
    /// Same as [`crate::truncate`], with a `u64` length like
    /// [`std::fs::File::set_len`].
    pub fn set_len(&self, size: u64) -> Result<()> {
        let size = i64::try_from(size).map_err(|_| VolStreamError::InvalidArgument {
            message: "length does not fit in a file offset",
        })?;
        manage::truncate(self.handle, size)
    }

    /// Copies the current contents through the handle. See [`crate::snapshot`].
    pub fn snapshot(&self) -> Result<Bytes> {
        manage::snapshot(self.handle)
    }

    /// Closes the stream, freeing its buffer.
    pub fn close(mut self) -> Result<()> {
        StreamOps::close(&mut self)
    }

    /// Boxes the stream for a host layer that dispatches dynamically.
    pub fn into_ops(self) -> Box<dyn StreamOps> {
        Box::new(self)
    }

    fn state(&self) -> Result<&SharedState> {
        self.state
            .as_ref()
            .ok_or(VolStreamError::InvalidHandle(self.handle))
    }
}

impl StreamOps for VolatileStream {
    fn read(&mut self, dst: &mut [u8]) -> Result<usize> {
        Ok(self.state()?.lock().read(dst))
    }

    fn write(&mut self, src: &[u8]) -> Result<usize> {
        Ok(self.state()?.lock().write(src))
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        self.state()?.lock().seek(pos)
    }

    fn close(&mut self) -> Result<()> {
        let state = self
            .state
            .take()
            .ok_or(VolStreamError::InvalidHandle(self.handle))?;
        registry().unregister(self.handle);
        let length = state.lock().len();
        drop(state);
        tracing::debug!(handle = %self.handle, length, "closed volatile stream");
        Ok(())
    }
}

impl Drop for VolatileStream {
    fn drop(&mut self) {
        if self.state.is_some() {
            let _ = StreamOps::close(self);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_registers_handle() {
        let stream = VolatileStream::open().unwrap();
        assert!(registry().contains(stream.handle()));
        assert_eq!(stream.len().unwrap(), 0);
        assert!(stream.is_empty().unwrap());
    }

    #[test]
    fn test_open_rejects_invalid_config() {
        let config = StreamConfig::default().with_min_capacity(1 << 20);
        assert!(matches!(
            VolatileStream::open_with(config),
            Err(VolStreamError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_close_unregisters() {
        let stream = VolatileStream::open().unwrap();
        let handle = stream.handle();
        stream.close().unwrap();
        assert!(!registry().contains(handle));
    }

    #[test]
    fn test_drop_unregisters() {
        let handle = {
            let stream = VolatileStream::open().unwrap();
            stream.handle()
        };
        assert!(!registry().contains(handle));
    }

    #[test]
    fn test_ops_after_close_are_rejected() {
        let mut stream = VolatileStream::open().unwrap();
        let handle = stream.handle();
        StreamOps::close(&mut stream).unwrap();

        assert!(stream.is_closed());
        let mut buf = [0u8; 4];
        assert_eq!(
            stream.read(&mut buf),
            Err(VolStreamError::InvalidHandle(handle))
        );
        assert!(stream.write(b"x").is_err());
        assert!(stream.seek(SeekFrom::Start(0)).is_err());
        assert!(stream.len().is_err());
        assert_eq!(
            StreamOps::close(&mut stream),
            Err(VolStreamError::InvalidHandle(handle))
        );
    }

    #[test]
    fn test_boxed_ops() {
        let stream = VolatileStream::open().unwrap();
        let handle = stream.handle();
        let mut ops = stream.into_ops();

        assert_eq!(ops.write(b"abc").unwrap(), 3);
        assert_eq!(ops.seek(SeekFrom::Start(1)).unwrap(), 1);
        let mut buf = [0u8; 2];
        assert_eq!(ops.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf, b"bc");

        assert_eq!(manage::stream_len(handle).unwrap(), 3);
        ops.close().unwrap();
        assert!(manage::stream_len(handle).is_err());
    }
}
