//! The stream engine.
//!
//! - [`VolatileStream`] - Open/close lifecycle and the handle used for I/O
//! - [`StreamOps`] - The read/write/seek/close contract a host layer drives
//!
//! The per-stream state and its primitives are internal.

mod ops;
mod state;
mod volatile;

mod io;

#[cfg(feature = "async-io")]
mod async_io;

pub use ops::StreamOps;
pub use volatile::VolatileStream;

pub(crate) use ops::checked_offset;
pub(crate) use state::{SharedState, StreamState};
