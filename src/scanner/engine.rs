//! Core scanning engine - Scanner with streaming API.
//!
//! This module implements the synchronous scan over one fixed buffer:
//!
//! - [`Scanner`] - Stateful engine that owns the buffer and the aggregate
//! - `feed()` - Pull a whole source through the buffer
//! - `result()` - Read the aggregate when the source is exhausted
//!
//! # Example
//!
//! ```
//! use csvscan::{ScanConfig, Scanner};
//!
//! let mut input = &b"1,110,4.5\n2,200,3.0\n3,110,3.5\n"[..];
//!
//! let mut scanner = Scanner::new(ScanConfig::new("110"))?;
//! scanner.feed(&mut input)?;
//!
//! let result = scanner.result();
//! assert_eq!(result.sum(), 8.0);
//! assert_eq!(result.count(), 2);
//! assert_eq!(result.mean()?, 4.0);
//! # Ok::<(), csvscan::ScanError>(())
//! ```

use std::io::{ErrorKind, Read};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, trace};

use crate::aggregate::Aggregate;
use crate::buffer::ScanBuffer;
use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::record::Record;

/// Counters describing the work a scanner has done since creation or the
/// last [`Scanner::reset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Bytes pulled from sources.
    pub bytes_read: u64,
    /// Complete records seen, matching or not.
    pub records: u64,
    /// Non-empty reads into the buffer.
    pub fills: u64,
    /// Compactions that moved the buffer start forward.
    pub compactions: u64,
}

/// A scanner that filters delimited records by key and aggregates their values.
///
/// `Scanner` owns one buffer of [`ScanConfig::buffer_capacity`] bytes,
/// allocated in [`Scanner::new`] and reused for every fill. Records are cut
/// out of it as borrowed slices; a record whose key does not match costs a
/// slice compare and nothing else.
///
/// # Streaming Model
///
/// - Read into the spare tail of the buffer
/// - Cut every complete line out of the pending bytes
/// - Move the partial tail line, if any, to the front
/// - Repeat until the source returns 0 bytes, then flush the last line
///
/// A record that straddles two reads is completed by the second read, so
/// results never depend on where reads happen to split the input.
///
/// # Memory Considerations
///
/// - The buffer must hold the longest record plus its newline
/// - A record that still fills the whole buffer after compaction is
///   reported as [`ScanError::RecordTooLarge`]
/// - No other allocation happens while scanning
#[derive(Debug)]
pub struct Scanner {
    buffer: ScanBuffer,
    aggregate: Aggregate,
    stats: ScanStats,
    line: u64,
    config: ScanConfig,
}

impl Scanner {
    /// Creates a scanner and allocates its buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidConfig`] if the configuration does not
    /// validate.
    ///
    /// # Example
    ///
    /// ```
    /// use csvscan::{ScanConfig, Scanner};
    ///
    /// let scanner = Scanner::new(ScanConfig::new("110").with_buffer_capacity(4096))?;
    /// assert_eq!(scanner.config().buffer_capacity(), 4096);
    /// # Ok::<(), csvscan::ScanError>(())
    /// ```
    pub fn new(config: ScanConfig) -> Result<Self, ScanError> {
        config.validate()?;
        Ok(Self {
            buffer: ScanBuffer::new(config.buffer_capacity()),
            aggregate: Aggregate::default(),
            stats: ScanStats::default(),
            line: 0,
            config,
        })
    }

    /// Scans `reader` to its end.
    ///
    /// The reader is borrowed; opening and closing it is the caller's job.
    /// Calling `feed` again with another source adds to the same aggregate,
    /// with line numbers and offsets continuing where the previous source
    /// stopped.
    ///
    /// # Errors
    ///
    /// - [`ScanError::SourceUnavailable`] if a read fails
    ///   (`ErrorKind::Interrupted` is retried)
    /// - [`ScanError::RecordTooLarge`] if a record does not fit the buffer
    /// - [`ScanError::MalformedRecord`] for a record that cannot be evaluated
    ///
    /// The scan stops at the first error. The aggregate then holds what was
    /// accumulated before it.
    pub fn feed<R: Read + ?Sized>(&mut self, reader: &mut R) -> Result<(), ScanError> {
        let never = AtomicBool::new(false);
        self.feed_cancellable(reader, &never)
    }

    /// Like [`feed`](Scanner::feed), but checks `cancel` before every read.
    ///
    /// Setting the flag from another thread or a signal handler makes the
    /// scan return [`ScanError::Aborted`] at the next fill boundary. Records
    /// are always either fully counted or not seen at all.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::atomic::AtomicBool;
    /// use csvscan::{ScanConfig, ScanError, Scanner};
    ///
    /// let cancel = AtomicBool::new(true);
    /// let mut scanner = Scanner::new(ScanConfig::new("110"))?;
    /// let err = scanner.feed_cancellable(&mut &b"1,110,4.5\n"[..], &cancel).unwrap_err();
    /// assert!(matches!(err, ScanError::Aborted { offset: 0 }));
    /// # Ok::<(), ScanError>(())
    /// ```
    pub fn feed_cancellable<R: Read + ?Sized>(
        &mut self,
        reader: &mut R,
        cancel: &AtomicBool,
    ) -> Result<(), ScanError> {
        loop {
            if cancel.load(Ordering::Relaxed) {
                debug!(offset = self.buffer.stream_len(), "scan aborted");
                return Err(ScanError::Aborted {
                    offset: self.buffer.stream_len(),
                });
            }

            self.ensure_room()?;

            let n = match reader.read(self.buffer.spare_mut()) {
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };

            if n == 0 {
                return self.finish_source();
            }

            self.absorb(n)?;
        }
    }

    /// Returns the aggregate so far.
    pub fn result(&self) -> Aggregate {
        self.aggregate
    }

    /// Returns the work counters.
    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    /// Returns the configuration used by this scanner.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Resets the scanner for a new source.
    ///
    /// Clears buffered bytes, the aggregate, the counters and the line
    /// number. The buffer allocation is kept.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.aggregate = Aggregate::default();
        self.stats = ScanStats::default();
        self.line = 0;
    }

    /// Fails if the buffer has no room left for a read.
    ///
    /// Pending bytes were compacted to the front after the last read, so a
    /// full buffer here is one partial line that fills it entirely.
    pub(crate) fn ensure_room(&self) -> Result<(), ScanError> {
        if self.buffer.is_full() {
            return Err(ScanError::RecordTooLarge {
                offset: self.buffer.stream_offset(),
                capacity: self.buffer.capacity(),
            });
        }
        Ok(())
    }

    /// Spare region for the next read.
    #[cfg(feature = "async-io")]
    pub(crate) fn spare_mut(&mut self) -> &mut [u8] {
        self.buffer.spare_mut()
    }

    /// Takes `n` freshly read bytes into account: processes every complete
    /// line and compacts.
    pub(crate) fn absorb(&mut self, n: usize) -> Result<(), ScanError> {
        self.buffer.commit(n);
        self.stats.bytes_read += n as u64;
        self.stats.fills += 1;

        loop {
            let offset = self.buffer.stream_offset();
            let Some(line) = self.buffer.next_line() else {
                break;
            };
            self.line += 1;
            self.stats.records += 1;

            let record = Record::new(line, self.line, offset);
            if let Some(value) =
                record.evaluate(self.config.delimiter(), self.config.target_key())?
            {
                self.aggregate.add(value);
            }
        }

        let reclaimed = self.buffer.compact();
        if reclaimed > 0 {
            self.stats.compactions += 1;
        }
        trace!(
            read = n,
            reclaimed,
            carried = self.buffer.stream_len() - self.buffer.stream_offset(),
            "fill processed"
        );
        Ok(())
    }

    /// Handles end of source: the bytes left over form one last record.
    pub(crate) fn finish_source(&mut self) -> Result<(), ScanError> {
        let offset = self.buffer.stream_offset();
        if let Some(rest) = self.buffer.take_remainder() {
            self.line += 1;
            self.stats.records += 1;

            let record = Record::new(rest, self.line, offset);
            if let Some(value) =
                record.evaluate(self.config.delimiter(), self.config.target_key())?
            {
                self.aggregate.add(value);
            }
            self.buffer.compact();
        }

        debug!(
            bytes = self.stats.bytes_read,
            records = self.stats.records,
            matches = self.aggregate.count(),
            fills = self.stats.fills,
            "source exhausted"
        );
        Ok(())
    }
}

/// Scans `reader` with a fresh scanner and returns the aggregate.
///
/// # Example
///
/// ```
/// use csvscan::{ScanConfig, scan};
///
/// let agg = scan(&mut &b"1,110,4.5\n3,110,3.5"[..], ScanConfig::new("110"))?;
/// assert_eq!(agg.mean()?, 4.0);
/// # Ok::<(), csvscan::ScanError>(())
/// ```
pub fn scan<R: Read + ?Sized>(reader: &mut R, config: ScanConfig) -> Result<Aggregate, ScanError> {
    let mut scanner = Scanner::new(config)?;
    scanner.feed(reader)?;
    Ok(scanner.result())
}
