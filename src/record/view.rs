//! The Record type - one line of input.

use crate::config::TargetKey;
use crate::error::ScanError;
use crate::util::parse_decimal;

use super::Fields;

/// A borrowed view of one input line.
///
/// The newline is never part of the record, and a single trailing `\r` is
/// dropped so CRLF files scan like LF files. The borrow ties the record to
/// the buffer state it was cut from; it cannot be held across the next fill.
///
/// # Example
///
/// ```
/// use csvscan::{Record, TargetKey};
///
/// let key = TargetKey::from("110");
/// let record = Record::new(b"1,110,4.5\r", 1, 0);
/// assert_eq!(record.as_bytes(), b"1,110,4.5");
/// assert_eq!(record.evaluate(b',', &key)?, Some(4.5));
///
/// let other = Record::new(b"2,200,3.0", 2, 11);
/// assert_eq!(other.evaluate(b',', &key)?, None);
/// # Ok::<(), csvscan::ScanError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    bytes: &'a [u8],
    line: u64,
    offset: u64,
}

impl<'a> Record<'a> {
    /// Wraps `line_bytes` found at 1-based `line` and stream `offset`.
    pub fn new(line_bytes: &'a [u8], line: u64, offset: u64) -> Self {
        let bytes = line_bytes.strip_suffix(b"\r").unwrap_or(line_bytes);
        Self {
            bytes,
            line,
            offset,
        }
    }

    /// Returns the record bytes.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Returns the length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the line is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the 1-based line number.
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Returns the stream offset of the first byte.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Iterates over the fields.
    pub fn fields(&self, delimiter: u8) -> Fields<'a> {
        Fields::new(self.bytes, delimiter)
    }

    /// Filters the record on field 1 and parses field 2 when it matches.
    ///
    /// Returns `Ok(None)` for a record whose key differs, without looking
    /// past field 1. Returns `Ok(Some(value))` for a match.
    ///
    /// # Errors
    ///
    /// [`ScanError::MalformedRecord`] when:
    /// - the record has no delimiter, so there is no key to compare
    /// - the key matches but there is no value field
    /// - the key matches but the value is not a finite decimal number
    #[inline]
    pub fn evaluate(&self, delimiter: u8, key: &TargetKey) -> Result<Option<f64>, ScanError> {
        let mut fields = self.fields(delimiter);

        // Field 0 (user id) is never inspected.
        fields.next();

        let item = fields.next().ok_or_else(|| self.malformed("missing key field"))?;
        if !key.matches(item) {
            return Ok(None);
        }

        let value = fields
            .next()
            .ok_or_else(|| self.malformed("missing value field"))?;
        parse_decimal(value)
            .map(Some)
            .map_err(|reason| self.malformed(reason))
    }

    fn malformed(&self, reason: &'static str) -> ScanError {
        ScanError::MalformedRecord {
            line: self.line,
            offset: self.offset,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(line: &[u8]) -> Result<Option<f64>, ScanError> {
        Record::new(line, 1, 0).evaluate(b',', &TargetKey::from("110"))
    }

    #[test]
    fn test_match_and_skip() {
        assert_eq!(eval(b"1,110,4.5").unwrap(), Some(4.5));
        assert_eq!(eval(b"2,200,3.0").unwrap(), None);
    }

    #[test]
    fn test_empty_user_id() {
        assert_eq!(eval(b",110,4.0").unwrap(), Some(4.0));
    }

    #[test]
    fn test_trailing_fields_ignored() {
        assert_eq!(eval(b"1,110,3.5,1112486027").unwrap(), Some(3.5));
    }

    #[test]
    fn test_empty_value_on_match_is_malformed() {
        let err = eval(b"1,110,").unwrap_err();
        assert!(matches!(err, ScanError::MalformedRecord { .. }));
    }

    #[test]
    fn test_missing_value_on_match_is_malformed() {
        assert!(matches!(
            eval(b"1,110"),
            Err(ScanError::MalformedRecord {
                reason: "missing value field",
                ..
            })
        ));
    }

    #[test]
    fn test_bad_value_on_other_key_is_not_checked() {
        assert_eq!(eval(b"1,200,not-a-number").unwrap(), None);
        assert_eq!(eval(b"1,200").unwrap(), None);
    }

    #[test]
    fn test_no_delimiter_is_malformed() {
        assert!(matches!(
            eval(b"garbage"),
            Err(ScanError::MalformedRecord {
                reason: "missing key field",
                ..
            })
        ));
        assert!(eval(b"").is_err());
    }

    #[test]
    fn test_crlf_stripped() {
        let record = Record::new(b"1,110,2.5\r", 4, 30);
        assert_eq!(record.len(), 9);
        assert_eq!(record.line(), 4);
        assert_eq!(record.offset(), 30);
        assert_eq!(eval(b"1,110,2.5\r").unwrap(), Some(2.5));
    }

    #[test]
    fn test_error_carries_position() {
        let err = Record::new(b"1,110,x", 7, 123)
            .evaluate(b',', &TargetKey::from("110"))
            .unwrap_err();
        match err {
            ScanError::MalformedRecord { line, offset, .. } => {
                assert_eq!(line, 7);
                assert_eq!(offset, 123);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
