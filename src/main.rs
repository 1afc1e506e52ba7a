use std::io;
use std::process;

use tracing_subscriber::EnvFilter;

/// Log filter, in `tracing_subscriber::EnvFilter` syntax
const LOG_ENV: &str = "PROMPT_HISTORY_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    if let Err(e) = prompt_history::cli::run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
