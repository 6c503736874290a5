// ABOUTME: Entry point for the apiruns CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use apiruns::error::Result;
use apiruns::output::{Output, OutputMode};
use clap::Parser;
use cli::{Cli, Commands};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let mut output = Output::new(mode);
    output.start_timer();
    let output = Arc::new(output);

    if let Err(e) = run(cli.command, output.clone()).await {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(command: Commands, output: Arc<Output>) -> Result<()> {
    match command {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Build(args) => commands::build(&args.file, output).await,
        Commands::Up(args) => commands::up(&args.file, output).await,
        Commands::Down(args) => commands::down(&args.file, output).await,
    }
}
