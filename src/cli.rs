// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines the version, build, up and down subcommands.

use apiruns::config::DESCRIPTOR_FILENAME;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "apiruns")]
#[command(about = "Build and run a REST API from a YAML descriptor on a local container engine")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print final results
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Print JSON lines instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the current version
    Version,

    /// Prepare the network and images for the API
    Build(DescriptorArgs),

    /// Start the database and API containers and load the models
    Up(DescriptorArgs),

    /// Remove every container of the API
    Down(DescriptorArgs),
}

#[derive(Args)]
pub struct DescriptorArgs {
    /// Descriptor file
    #[arg(short, long, default_value = DESCRIPTOR_FILENAME)]
    pub file: PathBuf,
}
