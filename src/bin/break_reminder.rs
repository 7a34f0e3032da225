extern crate break_reminder;
use std::io;
use std::process;

use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = break_reminder::BreakReminderConfig::from_args();

    if let Err(e) = break_reminder::run(config) {
        eprintln!("Application error: {}", e);
        process::exit(1);
    }
}
