//! Configuration for scanning behavior.
//!
//! This module provides the types that control a scan:
//!
//! - [`ScanConfig`] - Buffer capacity, delimiter and the key to filter on
//! - [`TargetKey`] - The byte sequence field 1 must equal
//!
//! # Example
//!
//! ```
//! use csvscan::ScanConfig;
//!
//! let config = ScanConfig::new("110")
//!     .with_buffer_capacity(64 * 1024)
//!     .with_delimiter(b';');
//! config.validate()?;
//!
//! # Ok::<(), csvscan::ScanError>(())
//! ```

use std::fmt;

use bytes::Bytes;

use crate::error::ScanError;

/// Default buffer capacity (1 MiB).
pub const DEFAULT_BUFFER_CAPACITY: usize = 1024 * 1024;

/// Default field delimiter.
pub const DEFAULT_DELIMITER: u8 = b',';

/// Default key, matching the item id in the bundled ratings demo.
pub const DEFAULT_TARGET_KEY: &str = "110";

/// The fixed byte sequence a record's second field must equal.
///
/// Compared as raw bytes. No trimming, case folding or numeric
/// interpretation happens, so `"110"` does not match `"0110"`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TargetKey(Bytes);

impl TargetKey {
    /// Creates a key from anything convertible to [`Bytes`].
    pub fn new(key: impl Into<Bytes>) -> Self {
        Self(key.into())
    }

    /// Returns the key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns true if `field` equals the key.
    #[inline]
    pub fn matches(&self, field: &[u8]) -> bool {
        self.0.as_ref() == field
    }
}

impl From<&'static str> for TargetKey {
    fn from(key: &'static str) -> Self {
        Self(Bytes::from_static(key.as_bytes()))
    }
}

impl From<String> for TargetKey {
    fn from(key: String) -> Self {
        Self(Bytes::from(key))
    }
}

impl From<Vec<u8>> for TargetKey {
    fn from(key: Vec<u8>) -> Self {
        Self(Bytes::from(key))
    }
}

impl From<Bytes> for TargetKey {
    fn from(key: Bytes) -> Self {
        Self(key)
    }
}

impl fmt::Debug for TargetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TargetKey({:?})", String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Display for TargetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

/// Configuration for a key-filtered scan.
///
/// Records are `[user_id, item_id, value, ...]`. A record is included when
/// field 1 equals [`target_key`](ScanConfig::target_key). Field 2 is then
/// parsed and added to the aggregate.
///
/// # Constraints
///
/// - `buffer_capacity` must be non-zero and larger than the longest record
///   (including its line terminator)
/// - `delimiter` must not be `\n` or `\r`
/// - the key must not contain the delimiter or a line terminator, otherwise it
///   could never match a field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScanConfig {
    /// Size of the one read buffer, in bytes.
    buffer_capacity: usize,

    /// Field separator byte.
    delimiter: u8,

    /// Value field 1 must equal.
    target_key: TargetKey,
}

impl ScanConfig {
    /// Creates a configuration filtering on `target_key`, with default
    /// buffer capacity and delimiter.
    ///
    /// # Example
    ///
    /// ```
    /// use csvscan::ScanConfig;
    ///
    /// let config = ScanConfig::new("110");
    /// assert_eq!(config.target_key().as_bytes(), b"110");
    /// assert_eq!(config.buffer_capacity(), csvscan::DEFAULT_BUFFER_CAPACITY);
    /// ```
    pub fn new(target_key: impl Into<TargetKey>) -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            delimiter: DEFAULT_DELIMITER,
            target_key: target_key.into(),
        }
    }

    /// Sets the buffer capacity.
    ///
    /// Note: This does not validate the configuration. Use [`ScanConfig::validate`]
    /// to check if the configuration is valid.
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the target key.
    pub fn with_target_key(mut self, target_key: impl Into<TargetKey>) -> Self {
        self.target_key = target_key.into();
        self
    }

    /// Returns the buffer capacity.
    pub fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }

    /// Returns the field delimiter.
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Returns the target key.
    pub fn target_key(&self) -> &TargetKey {
        &self.target_key
    }

    /// Validates the current configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidConfig`] if:
    /// - `buffer_capacity` is zero
    /// - the delimiter is a line terminator
    /// - the key contains the delimiter or a line terminator
    ///
    /// # Example
    ///
    /// ```
    /// use csvscan::ScanConfig;
    ///
    /// let config = ScanConfig::new("110").with_buffer_capacity(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.buffer_capacity == 0 {
            return Err(ScanError::InvalidConfig {
                message: "buffer capacity must be non-zero",
            });
        }

        if self.delimiter == b'\n' || self.delimiter == b'\r' {
            return Err(ScanError::InvalidConfig {
                message: "delimiter cannot be a line terminator",
            });
        }

        let key = self.target_key.as_bytes();
        if key.contains(&self.delimiter) {
            return Err(ScanError::InvalidConfig {
                message: "target key cannot contain the delimiter",
            });
        }
        if key.contains(&b'\n') || key.contains(&b'\r') {
            return Err(ScanError::InvalidConfig {
                message: "target key cannot contain a line terminator",
            });
        }

        Ok(())
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_KEY)
    }
}
