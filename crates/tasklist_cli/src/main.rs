//! Interactive task list on stdin/stdout.
//!
//! # Responsibility
//! - Parse process configuration and start optional file logging.
//! - Run one in-memory session; state is discarded on exit.

mod command;
mod session;

use clap::Parser;
use std::io;
use std::process::ExitCode;
use tasklist_core::{default_log_level, init_logging, TaskListStore};

#[derive(Parser, Debug)]
#[command(name = "tasklist")]
#[command(version)]
#[command(about = "In-memory task list with add, delete and edit")]
struct Cli {
    /// Log level: trace|debug|info|warn|error (defaults by build mode)
    #[arg(long, env = "TASKLIST_LOG_LEVEL")]
    log_level: Option<String>,
    /// Absolute directory for rolling log files; logging is off without it
    #[arg(long, env = "TASKLIST_LOG_DIR")]
    log_dir: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("tasklist: {err}");
            return ExitCode::from(2);
        }
    }

    println!("tasklist {} (type `help`)", tasklist_core::core_version());
    let mut store = TaskListStore::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    match session::run_session(&mut store, stdin.lock(), &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("tasklist: {err}");
            ExitCode::FAILURE
        }
    }
}
