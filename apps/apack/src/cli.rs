//! Command line interface definition

use apack_config::ColorChoice;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// apack - agent package builder
#[derive(Parser)]
#[command(name = "apack")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Build deployable agent packages from declarative specs")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose diagnostic logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Color output control
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate tool config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Build an agent package from a package configuration file
    #[command(alias = "c")]
    Create {
        /// Path to the package configuration file (.yaml)
        #[arg(value_name = "CONFIG")]
        spec: PathBuf,

        /// Remove and recreate an existing environment directory
        #[arg(short, long)]
        force: bool,
    },
}
