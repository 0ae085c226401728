//! Internal buffer management for the scanner.
//!
//! This module provides the one fixed-capacity read buffer a scan runs on.
//! It is an implementation detail and not part of the public API.

mod scan_buffer;

pub(crate) use scan_buffer::ScanBuffer;
