//! Fixed-capacity byte buffer with in-place compaction.

/// A reusable read buffer.
///
/// Layout:
///
/// ```text
/// 0          consumed           filled          capacity
/// |-- done --|---- pending -----|---- spare -----|
/// ```
///
/// `pending` holds bytes not yet turned into records: zero or more complete
/// lines followed by at most one partial line. Allocated once; fill and
/// compaction never reallocate.
#[derive(Debug)]
pub(crate) struct ScanBuffer {
    data: Box<[u8]>,
    filled: usize,
    consumed: usize,
    /// Stream offset of `data[0]`.
    base: u64,
}

impl ScanBuffer {
    /// Allocates a zeroed buffer of `capacity` bytes.
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            data: vec![0u8; capacity].into_boxed_slice(),
            filled: 0,
            consumed: 0,
            base: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.data.len()
    }

    #[cfg(test)]
    pub(crate) fn filled(&self) -> usize {
        self.filled
    }

    #[cfg(test)]
    pub(crate) fn consumed(&self) -> usize {
        self.consumed
    }

    /// Returns true when no spare room is left.
    pub(crate) fn is_full(&self) -> bool {
        self.filled == self.data.len()
    }

    /// Returns true when pending bytes remain.
    pub(crate) fn has_pending(&self) -> bool {
        self.filled > self.consumed
    }

    /// Stream offset of the first unconsumed byte.
    pub(crate) fn stream_offset(&self) -> u64 {
        self.base + self.consumed as u64
    }

    /// Total stream bytes that have entered the buffer.
    pub(crate) fn stream_len(&self) -> u64 {
        self.base + self.filled as u64
    }

    /// Writable region after the filled bytes.
    pub(crate) fn spare_mut(&mut self) -> &mut [u8] {
        &mut self.data[self.filled..]
    }

    /// Marks `n` bytes of the spare region as filled.
    pub(crate) fn commit(&mut self, n: usize) {
        debug_assert!(n <= self.data.len() - self.filled);
        self.filled += n;
    }

    /// Returns the next complete line (newline excluded) and consumes it
    /// along with its newline.
    ///
    /// Returns `None` when the pending bytes hold no newline. The partial
    /// line stays buffered.
    #[inline]
    pub(crate) fn next_line(&mut self) -> Option<&[u8]> {
        let start = self.consumed;
        let pos = memchr::memchr(b'\n', &self.data[start..self.filled])?;
        self.consumed = start + pos + 1;
        Some(&self.data[start..start + pos])
    }

    /// Consumes and returns all pending bytes, newline or not.
    ///
    /// Used at end of stream for a last line without a terminator.
    pub(crate) fn take_remainder(&mut self) -> Option<&[u8]> {
        if !self.has_pending() {
            return None;
        }
        let start = self.consumed;
        self.consumed = self.filled;
        Some(&self.data[start..self.filled])
    }

    /// Moves pending bytes to the start of the buffer.
    ///
    /// Returns the number of bytes reclaimed.
    pub(crate) fn compact(&mut self) -> usize {
        let reclaimed = self.consumed;
        if reclaimed == 0 {
            return 0;
        }
        self.data.copy_within(reclaimed..self.filled, 0);
        self.filled -= reclaimed;
        self.consumed = 0;
        self.base += reclaimed as u64;
        reclaimed
    }

    /// Drops all buffered bytes and rewinds the stream offset.
    pub(crate) fn clear(&mut self) {
        self.filled = 0;
        self.consumed = 0;
        self.base = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(buf: &mut ScanBuffer, bytes: &[u8]) {
        buf.spare_mut()[..bytes.len()].copy_from_slice(bytes);
        buf.commit(bytes.len());
    }

    #[test]
    fn test_lines_and_partial_tail() {
        let mut buf = ScanBuffer::new(32);
        fill(&mut buf, b"a,1\nb,2\nc,");

        assert_eq!(buf.next_line(), Some(&b"a,1"[..]));
        assert_eq!(buf.next_line(), Some(&b"b,2"[..]));
        assert_eq!(buf.next_line(), None);
        assert_eq!(buf.consumed(), 8);
        assert!(buf.has_pending());
    }

    #[test]
    fn test_compact_moves_partial_to_front() {
        let mut buf = ScanBuffer::new(16);
        fill(&mut buf, b"a,1\nb,");
        buf.next_line();

        assert_eq!(buf.compact(), 4);
        assert_eq!(buf.filled(), 2);
        assert_eq!(buf.consumed(), 0);
        assert_eq!(buf.stream_offset(), 4);

        fill(&mut buf, b"2\n");
        assert_eq!(buf.next_line(), Some(&b"b,2"[..]));
        assert_eq!(buf.stream_offset(), 8);
        assert_eq!(buf.stream_len(), 8);
    }

    #[test]
    fn test_compact_without_consumed_is_noop() {
        let mut buf = ScanBuffer::new(4);
        fill(&mut buf, b"abcd");
        assert_eq!(buf.compact(), 0);
        assert!(buf.is_full());
        assert_eq!(buf.next_line(), None);
    }

    #[test]
    fn test_empty_lines() {
        let mut buf = ScanBuffer::new(8);
        fill(&mut buf, b"\n\n");
        assert_eq!(buf.next_line(), Some(&b""[..]));
        assert_eq!(buf.next_line(), Some(&b""[..]));
        assert_eq!(buf.next_line(), None);
        assert!(!buf.has_pending());
    }

    #[test]
    fn test_newline_far_into_long_line() {
        let mut line = vec![b'x'; 4095];
        line.push(b'\n');
        line.extend_from_slice(b"tail");
        let mut buf = ScanBuffer::new(8192);
        fill(&mut buf, &line);

        assert_eq!(buf.next_line().map(<[u8]>::len), Some(4095));
        assert_eq!(buf.consumed(), 4096);
        assert_eq!(buf.next_line(), None);
        assert_eq!(buf.take_remainder(), Some(&b"tail"[..]));
    }

    #[test]
    fn test_take_remainder() {
        let mut buf = ScanBuffer::new(8);
        fill(&mut buf, b"x\nyz");
        buf.next_line();
        assert_eq!(buf.take_remainder(), Some(&b"yz"[..]));
        assert_eq!(buf.take_remainder(), None);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut buf = ScanBuffer::new(8);
        fill(&mut buf, b"x\ny");
        buf.next_line();
        buf.compact();
        buf.clear();
        assert_eq!(buf.capacity(), 8);
        assert_eq!(buf.stream_offset(), 0);
        assert_eq!(buf.spare_mut().len(), 8);
    }
}
