//! Error types for csvscan.

use std::fmt;

/// Errors that can occur while scanning a source.
///
/// Every variant aborts the scan it came from. Nothing is retried.
#[derive(Debug)]
pub enum ScanError {
    /// The input source could not be opened or read.
    SourceUnavailable(std::io::Error),

    /// A record did not fit in the buffer even after compaction.
    RecordTooLarge {
        /// Stream offset where the oversized record starts.
        offset: u64,
        /// Configured buffer capacity.
        capacity: usize,
    },

    /// A record could not be interpreted.
    MalformedRecord {
        /// 1-based line number of the record.
        line: u64,
        /// Stream offset where the record starts.
        offset: u64,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// The scan finished without a single record matching the key.
    NoMatches,

    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// The caller asked the scan to stop between two fills.
    Aborted {
        /// Number of stream bytes handed to the scanner before stopping.
        offset: u64,
    },
}

impl ScanError {
    /// Process exit status for this error kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            ScanError::InvalidConfig { .. } => 2,
            ScanError::SourceUnavailable(_) => 3,
            ScanError::RecordTooLarge { .. } | ScanError::MalformedRecord { .. } => 4,
            ScanError::NoMatches => 5,
            ScanError::Aborted { .. } => 130,
        }
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::SourceUnavailable(e) => write!(f, "source unavailable: {}", e),
            ScanError::RecordTooLarge { offset, capacity } => write!(
                f,
                "record too large for buffer: record at byte {} exceeds {} bytes",
                offset, capacity
            ),
            ScanError::MalformedRecord {
                line,
                offset,
                reason,
            } => write!(
                f,
                "malformed record at line {} (byte {}): {}",
                line, offset, reason
            ),
            ScanError::NoMatches => write!(f, "no matching records"),
            ScanError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
            ScanError::Aborted { offset } => write!(f, "scan aborted after {} bytes", offset),
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScanError::SourceUnavailable(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ScanError {
    fn from(e: std::io::Error) -> Self {
        ScanError::SourceUnavailable(e)
    }
}
