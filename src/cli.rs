//! Command line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueHint};

use csvscan::{DEFAULT_BUFFER_CAPACITY, DEFAULT_TARGET_KEY, ScanConfig};

/// Largest accepted `--buffer-size`, 1 GiB.
const MAX_BUFFER_SIZE: usize = 1024 * 1024 * 1024;

#[derive(Debug, Parser)]
#[command(
    name = "csvscan",
    version,
    about = "Mean of field 2 over the rows whose field 1 equals a key",
    long_about = "Scans `user_id,item_id,value,...` records through one fixed buffer and \
                  prints the mean value of the records whose item_id equals --key."
)]
pub struct Cli {
    /// Delimited file to scan (`-` reads stdin)
    #[arg(value_hint = ValueHint::FilePath)]
    pub path: PathBuf,

    /// Field 1 value to filter on, compared as raw bytes
    #[arg(short, long, default_value = DEFAULT_TARGET_KEY)]
    pub key: String,

    /// Read buffer size in bytes; accepts K and M suffixes (e.g. 64K)
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_BUFFER_CAPACITY,
        value_parser = parse_buffer_size
    )]
    pub buffer_size: usize,

    /// Field delimiter, a single ASCII character
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Log scan statistics to stderr
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig::new(self.key.clone())
            .with_buffer_capacity(self.buffer_size)
            .with_delimiter(self.delimiter)
    }

    pub fn reads_stdin(&self) -> bool {
        self.path.as_os_str() == "-"
    }
}

fn parse_buffer_size(raw: &str) -> Result<usize, String> {
    let raw = raw.trim();
    let (digits, unit) = match raw.char_indices().find(|(_, c)| !c.is_ascii_digit()) {
        Some((idx, _)) => raw.split_at(idx),
        None => (raw, ""),
    };
    let multiplier = match unit.to_ascii_uppercase().as_str() {
        "" | "B" => 1,
        "K" | "KB" | "KIB" => 1024,
        "M" | "MB" | "MIB" => 1024 * 1024,
        other => return Err(format!("unknown size unit `{other}`")),
    };
    let count: usize = digits
        .parse()
        .map_err(|_| format!("`{raw}` is not a size"))?;
    let size = count
        .checked_mul(multiplier)
        .ok_or_else(|| format!("`{raw}` is too large"))?;
    if size == 0 {
        return Err("buffer size must be non-zero".to_string());
    }
    if size > MAX_BUFFER_SIZE {
        return Err(format!("buffer size cannot exceed {MAX_BUFFER_SIZE} bytes"));
    }
    Ok(size)
}

fn parse_delimiter(raw: &str) -> Result<u8, String> {
    let unescaped = match raw {
        "\\t" | "tab" => "\t",
        other => other,
    };
    match unescaped.as_bytes() {
        [b'\n'] | [b'\r'] => Err("delimiter cannot be a line terminator".to_string()),
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(format!("`{raw}` is not a single ASCII character")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["csvscan", "ratings.csv"]).unwrap();
        assert_eq!(cli.key, "110");
        assert_eq!(cli.buffer_size, 1024 * 1024);
        assert_eq!(cli.delimiter, b',');
        assert!(!cli.reads_stdin());

        let config = cli.scan_config();
        assert_eq!(config.target_key().as_bytes(), b"110");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "csvscan", "-", "--key", "42", "--buffer-size", "64K", "-d", ";", "-v",
        ])
        .unwrap();
        assert!(cli.reads_stdin());
        assert_eq!(cli.key, "42");
        assert_eq!(cli.buffer_size, 64 * 1024);
        assert_eq!(cli.delimiter, b';');
        assert!(cli.verbose);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["csvscan", "x", "-v", "-q"]).is_err());
    }

    #[test]
    fn test_parse_buffer_size() {
        assert_eq!(parse_buffer_size("4096"), Ok(4096));
        assert_eq!(parse_buffer_size("8k"), Ok(8192));
        assert_eq!(parse_buffer_size("2MiB"), Ok(2 * 1024 * 1024));
        assert!(parse_buffer_size("0").is_err());
        assert!(parse_buffer_size("12G").is_err());
        assert!(parse_buffer_size("K").is_err());
    }

    #[test]
    fn test_parse_buffer_size_upper_limit() {
        assert_eq!(parse_buffer_size("1024M"), Ok(MAX_BUFFER_SIZE));
        assert_eq!(parse_buffer_size("1073741824"), Ok(MAX_BUFFER_SIZE));
        assert!(parse_buffer_size("1025M").is_err());
        assert!(parse_buffer_size("1073741825").is_err());
        assert!(parse_buffer_size("100000M").is_err());
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(","), Ok(b','));
        assert_eq!(parse_delimiter("\\t"), Ok(b'\t'));
        assert!(parse_delimiter(",,").is_err());
        assert!(parse_delimiter("é").is_err());
        assert!(parse_delimiter("\n").is_err());
    }
}
