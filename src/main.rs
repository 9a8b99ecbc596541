use std::io::Write;
use std::process;

use anyhow::{Context, Result};
use sched_analyzer::{command, resolve, Configuration, ResolveError};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Hand the resolved configuration to the collection engine as JSON on stdout.
fn emit(config: &Configuration) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, config).context("Failed to serialize configuration")?;
    writeln!(out)?;
    Ok(())
}

fn report(err: &ResolveError) -> i32 {
    match err {
        // clap renders its own usage and help text.
        ResolveError::Cli(e) => {
            let _ = e.print();
        }
        _ => {
            eprintln!("sched-analyzer: {err}");
            if err.is_usage() {
                let mut cmd = command();
                eprintln!("{}", cmd.render_usage());
                eprintln!("Try 'sched-analyzer --help' for more information.");
            }
        }
    }
    err.exit_code()
}

fn main() -> Result<()> {
    init_tracing();

    let config = match resolve(std::env::args_os()) {
        Ok(config) => config,
        Err(err) => process::exit(report(&err)),
    };

    emit(&config)
}
