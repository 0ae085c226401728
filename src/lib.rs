//! csvscan
//!
//! Streaming key-filtered aggregation over delimited text.
//!
//! `csvscan` reads records of the shape `user_id,item_id,value,...`, keeps
//! the ones whose `item_id` equals a target key and computes the mean of
//! their `value`. It is built around one fixed buffer:
//!
//! - bytes are read into a buffer allocated once per scanner
//! - lines and fields are borrowed slices of that buffer
//! - non-matching records cost one slice compare; only matches are parsed
//! - a partial line at the end of a read is moved to the front and finished
//!   by the next read
//!
//! The crate intentionally:
//! - does NOT implement RFC-4180 (no quoting, no escaped delimiters)
//! - does NOT aggregate more than one column
//! - does NOT scan in parallel
//!
//! # Sync
//!
//! ```no_run
//! use std::fs::File;
//! use csvscan::{ScanConfig, ScanError, Scanner};
//!
//! fn main() -> Result<(), ScanError> {
//!     let mut file = File::open("ratings.csv")?;
//!     let mut scanner = Scanner::new(ScanConfig::new("110"))?;
//!     scanner.feed(&mut file)?;
//!
//!     let result = scanner.result();
//!     println!("mean {} over {} records", result.mean()?, result.count());
//!     Ok(())
//! }
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use csvscan::{scan_async, ScanConfig};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead>(reader: R) -> Result<(), csvscan::ScanError> {
//!     let result = scan_async(reader, ScanConfig::new("110")).await?;
//!     println!("mean {}", result.mean()?);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod aggregate;
mod config;
mod error;
mod record;
mod scanner;

mod buffer; // internal (fixed scan buffer)
mod util; // internal (value parsing)

#[cfg(feature = "async-io")]
mod async_scan;

//
// Public surface (intentionally tiny)
//

pub use aggregate::Aggregate;
pub use config::{
    DEFAULT_BUFFER_CAPACITY, DEFAULT_DELIMITER, DEFAULT_TARGET_KEY, ScanConfig, TargetKey,
};
pub use error::ScanError;
pub use record::{Fields, Record};
pub use scanner::{ScanStats, Scanner, scan};

#[cfg(feature = "async-io")]
pub use async_scan::{FeedFuture, scan_async};
