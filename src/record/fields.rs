//! Positional field splitting.

/// An iterator over the fields of a record.
///
/// Each call to `next` performs one delimiter search, starting where the
/// previous one stopped, so callers that only need the first few fields
/// never look at the rest of the line. Fields are sub-slices of the record
/// and may be empty.
///
/// # Example
///
/// ```
/// use csvscan::Fields;
///
/// let mut fields = Fields::new(b",110,4.0", b',');
/// assert_eq!(fields.next(), Some(&b""[..]));
/// assert_eq!(fields.next(), Some(&b"110"[..]));
/// assert_eq!(fields.next(), Some(&b"4.0"[..]));
/// assert_eq!(fields.next(), None);
/// ```
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    rest: Option<&'a [u8]>,
    delimiter: u8,
}

impl<'a> Fields<'a> {
    /// Splits `record` on `delimiter`.
    ///
    /// A record without any delimiter has exactly one field.
    pub fn new(record: &'a [u8], delimiter: u8) -> Self {
        Self {
            rest: Some(record),
            delimiter,
        }
    }
}

impl<'a> Iterator for Fields<'a> {
    type Item = &'a [u8];

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        match memchr::memchr(self.delimiter, rest) {
            Some(pos) => {
                self.rest = Some(&rest[pos + 1..]);
                Some(&rest[..pos])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}
