#![no_main]

use libfuzzer_sys::fuzz_target;
use csvscan::{ScanConfig, ScanError, scan};

fuzz_target!(|data: &[u8]| {
    let Some((&first, input)) = data.split_first() else {
        return;
    };
    let capacity = 1 + first as usize;

    let large = scan(&mut &input[..], ScanConfig::new("110").with_buffer_capacity(1 << 20));
    let small = scan(&mut &input[..], ScanConfig::new("110").with_buffer_capacity(capacity));

    match (&small, &large) {
        // Whatever fits the small buffer must give the same answer.
        (Ok(s), Ok(l)) => assert_eq!(s, l),
        (Ok(_), Err(e)) => panic!("large buffer failed where small succeeded: {e}"),
        (
            Err(ScanError::MalformedRecord { line, offset, .. }),
            Err(ScanError::MalformedRecord {
                line: l_line,
                offset: l_offset,
                ..
            }),
        ) => {
            assert_eq!(line, l_line);
            assert_eq!(offset, l_offset);
        }
        (Err(ScanError::MalformedRecord { .. }), other) => {
            panic!("small buffer reported malformed, large gave {other:?}")
        }
        (Err(ScanError::RecordTooLarge { capacity: c, .. }), _) => assert_eq!(*c, capacity),
        (Err(e), _) => panic!("unexpected error: {e}"),
    }

    // A successful mean is never NaN.
    if let Ok(agg) = large {
        match agg.mean() {
            Ok(mean) => assert!(mean.is_finite() || agg.sum().is_infinite()),
            Err(e) => assert!(matches!(e, ScanError::NoMatches)),
        }
    }
});
