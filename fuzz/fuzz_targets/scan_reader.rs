#![no_main]

use std::io::{self, Read};

use libfuzzer_sys::fuzz_target;
use csvscan::{ScanConfig, Scanner};

/// Reader that serves the input in pieces whose sizes come from `steps`.
struct Chopped<'a> {
    data: &'a [u8],
    steps: &'a [u8],
    turn: usize,
}

impl Read for Chopped<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let step = if self.steps.is_empty() {
            1
        } else {
            1 + self.steps[self.turn % self.steps.len()] as usize
        };
        self.turn += 1;
        let n = step.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fuzz_target!(|data: &[u8]| {
    let split = data.len().min(8);
    let (steps, input) = data.split_at(split);

    let config = ScanConfig::new("110").with_buffer_capacity(4096);

    let mut whole = Scanner::new(config.clone()).unwrap();
    let whole_result = whole.feed(&mut &input[..]);

    let mut chopped = Scanner::new(config).unwrap();
    let mut reader = Chopped {
        data: input,
        steps,
        turn: 0,
    };
    let chopped_result = chopped.feed(&mut reader);

    // Read sizes must never change the outcome.
    assert_eq!(whole_result.is_ok(), chopped_result.is_ok());
    assert_eq!(whole.result(), chopped.result());
    if whole_result.is_ok() {
        assert_eq!(whole.stats().records, chopped.stats().records);
        assert_eq!(whole.stats().bytes_read, chopped.stats().bytes_read);
    }
});
