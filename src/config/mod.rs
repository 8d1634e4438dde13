//! Configuration for stream buffers.
//!
//! - [`StreamConfig`] - Initial size, shrink floor, growth policy and cap
//! - [`GrowthPolicy`] - How the buffer capacity grows on demand
//!
//! # Example
//!
//! ```
//! use volstream::{GrowthPolicy, StreamConfig};
//!
//! let config = StreamConfig::default()
//!     .with_initial_capacity(1024)
//!     .with_min_capacity(1024)
//!     .with_growth(GrowthPolicy::PageAligned { page_size: 4096 });
//! config.validate()?;
//! # Ok::<(), volstream::VolStreamError>(())
//! ```

use crate::error::{Result, VolStreamError};

/// Default initial buffer capacity (4 KiB).
pub const DEFAULT_INITIAL_CAPACITY: usize = 4 * 1024;

/// Default capacity floor for shrinking (4 KiB).
pub const DEFAULT_MIN_CAPACITY: usize = 4 * 1024;

/// How a stream buffer grows when a write or seek needs more room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GrowthPolicy {
    /// Double the capacity until it covers the request.
    ///
    /// Bounds the number of reallocations to O(log n) over n bytes written.
    #[default]
    Doubling,

    /// Round the request up to a multiple of `page_size`.
    PageAligned {
        /// Page size in bytes, a power of two.
        page_size: usize,
    },
}

impl GrowthPolicy {
    /// Returns the capacity to allocate so that at least `required` bytes fit,
    /// starting from `current`. `None` means the computation overflowed.
    pub(crate) fn grow(&self, current: usize, required: usize) -> Option<usize> {
        if required <= current {
            return Some(current);
        }
        match *self {
            GrowthPolicy::Doubling => {
                let mut capacity = current.max(1);
                while capacity < required {
                    capacity = capacity.checked_mul(2)?;
                }
                Some(capacity)
            }
            GrowthPolicy::PageAligned { page_size } => {
                let mask = page_size - 1;
                required.checked_add(mask).map(|n| n & !mask)
            }
        }
    }
}

/// Configuration for a volatile stream's buffer.
///
/// # Size Constraints
///
/// - `initial_capacity` must be non-zero
/// - `min_capacity <= initial_capacity`
/// - a page-aligned policy needs a non-zero power-of-two page size
/// - `max_capacity`, when set, must be at least `initial_capacity`
///
/// # Example
///
/// ```
/// use volstream::StreamConfig;
///
/// let config = StreamConfig::new(256, 64)?;
/// assert_eq!(config.initial_capacity(), 256);
/// # Ok::<(), volstream::VolStreamError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamConfig {
    /// Bytes allocated when the stream is opened.
    initial_capacity: usize,

    /// Shrinking never goes below this capacity.
    min_capacity: usize,

    /// Growth policy for expand.
    growth: GrowthPolicy,

    /// Upper bound on buffer capacity; growing past it fails like an allocation failure.
    max_capacity: Option<usize>,
}

impl StreamConfig {
    /// Creates a new configuration with the given initial capacity and shrink floor.
    ///
    /// # Errors
    ///
    /// Returns [`VolStreamError::InvalidConfig`] if the sizes violate the
    /// constraints listed on [`StreamConfig`].
    pub fn new(initial_capacity: usize, min_capacity: usize) -> Result<Self> {
        let config = Self {
            initial_capacity,
            min_capacity,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the initial capacity.
    ///
    /// Note: This does not validate the configuration. Use [`StreamConfig::validate`].
    pub fn with_initial_capacity(mut self, size: usize) -> Self {
        self.initial_capacity = size;
        self
    }

    /// Sets the shrink floor.
    ///
    /// Note: This does not validate the configuration. Use [`StreamConfig::validate`].
    pub fn with_min_capacity(mut self, size: usize) -> Self {
        self.min_capacity = size;
        self
    }

    /// Sets the growth policy.
    pub fn with_growth(mut self, growth: GrowthPolicy) -> Self {
        self.growth = growth;
        self
    }

    /// Caps the buffer capacity.
    ///
    /// # Example
    ///
    /// ```
    /// use volstream::StreamConfig;
    ///
    /// let config = StreamConfig::default().with_max_capacity(1 << 20);
    /// assert_eq!(config.max_capacity(), Some(1 << 20));
    /// ```
    pub fn with_max_capacity(mut self, size: usize) -> Self {
        self.max_capacity = Some(size);
        self
    }

    /// Returns the initial capacity.
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Returns the shrink floor.
    pub fn min_capacity(&self) -> usize {
        self.min_capacity
    }

    /// Returns the growth policy.
    pub fn growth(&self) -> GrowthPolicy {
        self.growth
    }

    /// Returns the capacity cap, if any.
    pub fn max_capacity(&self) -> Option<usize> {
        self.max_capacity
    }

    /// Validates the current configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use volstream::StreamConfig;
    ///
    /// let config = StreamConfig::default().with_initial_capacity(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(VolStreamError::InvalidConfig {
                message: "initial capacity must be non-zero",
            });
        }

        if self.min_capacity > self.initial_capacity {
            return Err(VolStreamError::InvalidConfig {
                message: "min_capacity cannot be greater than initial_capacity",
            });
        }

        if let GrowthPolicy::PageAligned { page_size } = self.growth {
            if !page_size.is_power_of_two() {
                return Err(VolStreamError::InvalidConfig {
                    message: "page size must be a non-zero power of 2",
                });
            }
        }

        if let Some(max) = self.max_capacity {
            if max < self.initial_capacity {
                return Err(VolStreamError::InvalidConfig {
                    message: "max_capacity cannot be less than initial_capacity",
                });
            }
        }

        Ok(())
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            min_capacity: DEFAULT_MIN_CAPACITY,
            growth: GrowthPolicy::Doubling,
            max_capacity: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StreamConfig::default();
        assert_eq!(config.initial_capacity(), DEFAULT_INITIAL_CAPACITY);
        assert_eq!(config.min_capacity(), DEFAULT_MIN_CAPACITY);
        assert_eq!(config.growth(), GrowthPolicy::Doubling);
        assert_eq!(config.max_capacity(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = StreamConfig::default()
            .with_initial_capacity(64)
            .with_min_capacity(16)
            .with_max_capacity(1024);

        assert_eq!(config.initial_capacity(), 64);
        assert_eq!(config.min_capacity(), 16);
        assert_eq!(config.max_capacity(), Some(1024));
    }

    #[test]
    fn test_invalid_config_min_gt_initial() {
        assert!(StreamConfig::new(16, 32).is_err());
    }

    #[test]
    fn test_invalid_page_size() {
        let config = StreamConfig::default().with_growth(GrowthPolicy::PageAligned { page_size: 3 });
        assert!(config.validate().is_err());

        let config = StreamConfig::default().with_growth(GrowthPolicy::PageAligned { page_size: 0 });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_max_below_initial() {
        let config = StreamConfig::default().with_max_capacity(DEFAULT_INITIAL_CAPACITY - 1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_doubling_growth() {
        let policy = GrowthPolicy::Doubling;
        assert_eq!(policy.grow(16, 10), Some(16));
        assert_eq!(policy.grow(16, 17), Some(32));
        assert_eq!(policy.grow(16, 100), Some(128));
        assert_eq!(policy.grow(0, 5), Some(8));
        assert_eq!(policy.grow(usize::MAX / 2 + 1, usize::MAX), None);
    }

    #[test]
    fn test_page_aligned_growth() {
        let policy = GrowthPolicy::PageAligned { page_size: 4096 };
        assert_eq!(policy.grow(4096, 4097), Some(8192));
        assert_eq!(policy.grow(4096, 12288), Some(12288));
        assert_eq!(policy.grow(4096, 100), Some(4096));
    }
}
