//! Command implementations for rota.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod check_config;
mod run;

use crate::category::Category;
use crate::cli::Command;
use crate::error::Result;

pub use check_config::cmd_check_config;
pub use run::cmd_run;

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. Each command
/// is routed to its handler function.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Run(args) => cmd_run(args),
        Command::CheckConfig(args) => cmd_check_config(args),
        Command::Categories => cmd_categories(),
    }
}

/// Execute the `rota categories` command.
fn cmd_categories() -> Result<()> {
    for category in Category::ALL {
        println!("{}", category);
    }
    Ok(())
}
