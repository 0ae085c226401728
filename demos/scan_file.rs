//! File scanning example.
//!
//! Run with:
//!     cargo run --example scan_file -- /path/to/ratings.csv [key]

use std::env;
use std::fs::File;

use csvscan::{ScanConfig, ScanError, Scanner};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "ratings.csv".to_string());
    let key = args.next().unwrap_or_else(|| "110".to_string());

    println!("Scanning file: {}\n", path);

    let mut file = File::open(&path)?;
    let metadata = file.metadata()?;
    println!("File size: {} bytes\n", metadata.len());

    // Small buffer to make the carry-over visible in the stats
    let config = ScanConfig::new(key.clone()).with_buffer_capacity(64 * 1024);
    let mut scanner = Scanner::new(config)?;
    scanner.feed(&mut file)?;

    let stats = scanner.stats();
    println!(
        "Records: {}, fills: {}, compactions: {}",
        stats.records, stats.fills, stats.compactions
    );

    let result = scanner.result();
    match result.mean() {
        Ok(mean) => println!(
            "\nItem {}: mean {} over {} matches",
            key,
            mean,
            result.count()
        ),
        Err(ScanError::NoMatches) => println!("\nItem {}: no matches", key),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
