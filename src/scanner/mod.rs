//! Scanning engine for delimited byte streams.
//!
//! - [`Scanner`] - Stateful scan over one fixed buffer with `feed()`/`result()` API
//! - [`ScanStats`] - Counters describing the work a scan did
//! - [`scan`] - One-shot convenience wrapper

mod engine;

pub use engine::{ScanStats, Scanner, scan};
