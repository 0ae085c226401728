//! Async scanning support.
//!
//! This module runs the scanner over `futures-io::AsyncRead`, making it
//! runtime-agnostic and compatible with tokio (through `tokio-util` compat),
//! async-std, smol, and other async runtimes.
//!
//! - [`scan_async`] - Scans an async reader with a fresh scanner
//! - [`FeedFuture`] - Future returned by [`Scanner::feed_async`](crate::Scanner::feed_async)
//!
//! This module requires the `async-io` feature to be enabled.

mod future;

pub use future::{FeedFuture, scan_async};
