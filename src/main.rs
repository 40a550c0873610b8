use clap::Parser;
use colored::Colorize;
use finview::cli::Cli;
use finview::dispatcher::dispatch_command;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    match dispatch_command(cli.command, cli.json).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!("Command failed: {:?}", err);
            eprintln!("{} {}", "✗".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; RUST_LOG wins over -v
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
