//! `csvscan` CLI entry point.
//!
//! Prints one result line on stdout. Errors go to stderr through `tracing`,
//! and the process exit code comes from [`ScanError::exit_code`].

use std::fs::File;
use std::io;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use clap::Parser;
use signal_hook::consts::{SIGINT, SIGTERM};
use tracing::{debug, error, warn};
use tracing_subscriber::EnvFilter;

use csvscan::{ScanError, Scanner};

mod cli;

use cli::Cli;

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(err) => {
            error!(path = %cli.path.display(), "{err}");
            err.exit_code()
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<(), ScanError> {
    let mut scanner = Scanner::new(cli.scan_config())?;

    let cancel = Arc::new(AtomicBool::new(false));
    for signal in [SIGINT, SIGTERM] {
        if let Err(err) = signal_hook::flag::register(signal, Arc::clone(&cancel)) {
            warn!(signal, "cannot install signal handler: {err}");
        }
    }

    debug!(
        path = %cli.path.display(),
        buffer = cli.buffer_size,
        key = %cli.key,
        "scanning"
    );

    if cli.reads_stdin() {
        scanner.feed_cancellable(&mut io::stdin().lock(), &cancel)?;
    } else {
        let mut file = File::open(&cli.path)?;
        scanner.feed_cancellable(&mut file, &cancel)?;
    }

    let stats = scanner.stats();
    debug!(
        bytes = stats.bytes_read,
        records = stats.records,
        fills = stats.fills,
        compactions = stats.compactions,
        "scan complete"
    );

    let result = scanner.result();
    let mean = result.mean()?;
    println!(
        "Average rating for item {} is {} ({} matches).",
        cli.key,
        mean,
        result.count()
    );
    Ok(())
}

fn init_tracing(cli: &Cli) {
    let default_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}
