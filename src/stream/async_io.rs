//! `futures-io` adapters.
//!
//! All operations are in-memory, so every poll completes immediately. This
//! is runtime-agnostic and works with tokio (through `tokio-util` compat),
//! async-std, smol, or any futures-compatible executor.
//!
//! # Example
//!
//! ```ignore
//! use futures_util::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
//! use volstream::VolatileStream;
//!
//! async fn demo() -> std::io::Result<()> {
//!     let mut stream = VolatileStream::open()?;
//!     stream.write_all(b"hello").await?;
//!     AsyncSeekExt::seek(&mut stream, std::io::SeekFrom::Start(0)).await?;
//!
//!     let mut out = Vec::new();
//!     stream.read_to_end(&mut out).await?;
//!     assert_eq!(out, b"hello");
//!     Ok(())
//! }
//! ```

use std::io::{self, Read, Seek, SeekFrom, Write};
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_io::{AsyncRead, AsyncSeek, AsyncWrite};

use super::volatile::VolatileStream;

impl AsyncRead for VolatileStream {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        Poll::Ready(Read::read(self.get_mut(), buf))
    }
}

impl AsyncWrite for VolatileStream {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Poll::Ready(Write::write(self.get_mut(), buf))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    /// No-op; the buffer is freed on close or drop.
    fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

impl AsyncSeek for VolatileStream {
    fn poll_seek(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        pos: SeekFrom,
    ) -> Poll<io::Result<u64>> {
        Poll::Ready(Seek::seek(self.get_mut(), pos))
    }
}
