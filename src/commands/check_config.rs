//! Implementation of the `rota check-config` command.

use crate::cli::CheckConfigArgs;
use crate::config::Config;
use crate::error::Result;

/// Execute the `rota check-config` command.
///
/// Loads and validates the config, then prints the roster with the ids the
/// agents will receive.
pub fn cmd_check_config(args: CheckConfigArgs) -> Result<()> {
    let config = Config::load(&args.path)?;
    let dispatcher = config.dispatcher()?;

    println!("Config OK: {}", args.path.display());
    println!();
    println!("Agents ({}):", config.agents.len());
    for agent in dispatcher.agents() {
        println!("  {}", agent);
    }
    println!();
    match &config.events_file {
        Some(path) => println!("Events file: {}", path.display()),
        None => println!("Events file: (none)"),
    }
    println!(
        "History on exit: {}",
        if config.history_on_exit { "yes" } else { "no" }
    );

    Ok(())
}
