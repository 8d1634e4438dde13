//! volstream
//!
//! Volatile in-memory streams for Rust.
//!
//! A [`VolatileStream`] is a logical file that exists only in memory. It
//! grows as it is written, shrinks on truncate, reads back zeros for every
//! gap opened past its end, and frees its buffer when it is closed. It is a
//! drop-in scratch file for code written against [`std::io::Read`],
//! [`std::io::Write`] and [`std::io::Seek`].
//!
//! Every stream is registered under a [`Handle`]. Code holding only the
//! handle can resize or inspect the stream out of band with [`truncate`],
//! [`snapshot`] and [`with_snapshot`].
//!
//! The crate intentionally:
//! - does NOT persist anything
//! - does NOT share one buffer between several streams
//! - does NOT buffer or format I/O itself (wrap it in `BufWriter` for that)
//!
//! # Sync
//!
//! ```
//! use std::io::{Read, SeekFrom, Write};
//! use volstream::VolatileStream;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut stream = VolatileStream::open()?;
//!     writeln!(stream, "hello")?;
//!
//!     // Seeking past the end leaves a zero-filled hole
//!     stream.seek(SeekFrom::Start(16))?;
//!     stream.write_all(b"world")?;
//!
//!     let snap = volstream::snapshot(stream.handle())?;
//!     assert_eq!(snap.len(), 21);
//!     assert_eq!(snap[10], 0);
//!
//!     volstream::truncate(stream.handle(), 5)?;
//!     stream.seek(SeekFrom::Start(0))?;
//!     let mut text = String::new();
//!     stream.read_to_string(&mut text)?;
//!     assert_eq!(text, "hello");
//!
//!     stream.close()?;
//!     Ok(())
//! }
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use futures_util::{AsyncReadExt, AsyncWriteExt};
//! use volstream::VolatileStream;
//!
//! async fn demo() -> std::io::Result<()> {
//!     let mut stream = VolatileStream::open()?;
//!     stream.write_all(b"async").await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod manage;
mod registry;
mod stream;

mod buffer; // internal growth/shrink policy

//
// Public surface (intentionally tiny)
//

pub use config::{GrowthPolicy, StreamConfig};
pub use error::{Result, VolStreamError};
pub use manage::{is_open, open_streams, snapshot, stream_len, truncate, with_snapshot};
pub use registry::Handle;
pub use stream::{StreamOps, VolatileStream};
