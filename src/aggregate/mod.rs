//! Running sum and count over matching records.

use std::fmt;

use crate::error::ScanError;

/// The running total of matching values.
///
/// # Example
///
/// ```
/// use csvscan::{Aggregate, ScanError};
///
/// let mut agg = Aggregate::default();
/// assert!(matches!(agg.mean(), Err(ScanError::NoMatches)));
///
/// agg.add(4.5);
/// agg.add(3.5);
/// assert_eq!(agg.count(), 2);
/// assert_eq!(agg.mean()?, 4.0);
/// # Ok::<(), ScanError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Aggregate {
    sum: f64,
    count: u64,
}

impl Aggregate {
    /// Creates an aggregate from a known sum and count.
    pub fn new(sum: f64, count: u64) -> Self {
        Self { sum, count }
    }

    /// Adds one matching value.
    #[inline]
    pub fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    /// Returns the sum of matching values.
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Returns the number of matching records.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns true if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns `sum / count`.
    ///
    /// # Errors
    ///
    /// [`ScanError::NoMatches`] when `count == 0`; the mean is undefined.
    pub fn mean(&self) -> Result<f64, ScanError> {
        if self.count == 0 {
            return Err(ScanError::NoMatches);
        }
        Ok(self.sum / self.count as f64)
    }
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mean() {
            Ok(mean) => write!(f, "mean {} over {} records", mean, self.count),
            Err(_) => write!(f, "no matching records"),
        }
    }
}
