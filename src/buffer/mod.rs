//! Buffer capacity management.
//!
//! This module owns the growth and shrink policy for a stream's backing
//! memory. It is an implementation detail and not part of the public API.

mod manager;

pub(crate) use manager::StreamBuffer;
