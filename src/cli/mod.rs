//! CLI argument parsing for rota.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Rota: round-robin issue routing for support desks.
///
/// Agents declare the categories they handle; issues are assigned to the
/// next free agent for their category, or wait in a per-category FIFO queue
/// until one frees up.
#[derive(Parser, Debug)]
#[command(name = "rota")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for rota.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a scenario file against a fresh dispatcher.
    ///
    /// Agents from the config roster are registered first, then every step
    /// runs in order. The run stops at the first unexpected outcome.
    Run(RunArgs),

    /// Validate a config file and print the roster it defines.
    CheckConfig(CheckConfigArgs),

    /// List the known issue categories.
    Categories,
}

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the scenario YAML file.
    pub scenario: PathBuf,

    /// Config file (defaults to ./rota.yaml when present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print a single JSON report instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `check-config` command.
#[derive(Args, Debug)]
pub struct CheckConfigArgs {
    /// Path to the config YAML file.
    pub path: PathBuf,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
