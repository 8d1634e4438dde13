//! Error types for volstream.

use std::io;

use thiserror::Error;

use crate::registry::Handle;

/// Errors that can occur while operating on a volatile stream.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VolStreamError {
    /// A negative position or length was requested, or an offset beyond `isize::MAX`.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// The buffer could not grow to the requested size.
    #[error("out of memory: could not grow buffer to {requested} bytes")]
    OutOfMemory {
        /// The capacity that was asked for.
        requested: usize,
    },

    /// The handle is unknown or its stream has been closed.
    #[error("invalid handle: {0}")]
    InvalidHandle(Handle),

    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VolStreamError>;

impl From<VolStreamError> for io::Error {
    fn from(e: VolStreamError) -> Self {
        let kind = match e {
            VolStreamError::InvalidArgument { .. } => io::ErrorKind::InvalidInput,
            VolStreamError::OutOfMemory { .. } => io::ErrorKind::OutOfMemory,
            VolStreamError::InvalidHandle(_) => io::ErrorKind::NotFound,
            VolStreamError::InvalidConfig { .. } => io::ErrorKind::InvalidInput,
        };
        io::Error::new(kind, e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let err: io::Error = VolStreamError::OutOfMemory { requested: 64 }.into();
        assert_eq!(err.kind(), io::ErrorKind::OutOfMemory);

        let err: io::Error = VolStreamError::InvalidArgument {
            message: "negative position",
        }
        .into();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_display() {
        let err = VolStreamError::OutOfMemory { requested: 8192 };
        assert!(err.to_string().contains("8192"));

        let err = VolStreamError::InvalidHandle(Handle::from_raw(7));
        assert!(err.to_string().contains("invalid handle"));
    }
}
