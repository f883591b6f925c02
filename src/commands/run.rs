//! Implementation of the `rota run` command.
//!
//! Seeds a dispatcher from the config roster, runs the scenario, prints
//! the step results, and appends the audit events to the configured
//! events file. Events are written even when the run fails part-way, so
//! the log always covers every change that was committed.

use crate::cli::RunArgs;
use crate::config::Config;
use crate::dispatch::WorkHistory;
use crate::error::{Result, RotaError};
use crate::events::write_ndjson;
use crate::queue::QueueSnapshot;
use crate::scenario::{self, HistoryLine, Scenario, StepReport};
use serde::Serialize;
use tracing::info;

/// Everything a run produced.
#[derive(Debug, Serialize)]
pub(crate) struct RunReport {
    pub scenario: String,
    pub success: bool,
    pub steps: Vec<StepReport>,
    pub history: Vec<WorkHistory>,
    pub waiting: Vec<QueueSnapshot>,
    pub events: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Execute the `rota run` command.
pub fn cmd_run(args: RunArgs) -> Result<()> {
    let config = Config::load_or_default(args.config.as_deref())?;
    let scenario = Scenario::load(&args.scenario)?;

    let (report, failure) = execute(&config, &scenario)?;

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| RotaError::Io(format!("failed to serialize run report: {}", e)))?;
        println!("{}", json);
    } else {
        print_text(&report, config.history_on_exit);
    }

    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Run `scenario` against a dispatcher seeded from `config`.
///
/// Returns the report plus the error that stopped the run, if any. Only
/// setup and events-file failures are returned as `Err`.
pub(crate) fn execute(config: &Config, scenario: &Scenario) -> Result<(RunReport, Option<RotaError>)> {
    let dispatcher = config.dispatcher()?;
    info!(
        scenario = scenario.label(),
        agents = config.agents.len(),
        steps = scenario.steps.len(),
        "running scenario"
    );

    let run = scenario::run(&dispatcher, scenario);

    let events = dispatcher.events();
    if let Some(path) = &config.events_file {
        write_ndjson(path, &events)?;
        info!(path = %path.display(), count = events.len(), "events written");
    }

    let report = RunReport {
        scenario: scenario.label().to_string(),
        success: run.is_success(),
        steps: run.steps,
        history: dispatcher.work_history(),
        waiting: dispatcher.waiting(),
        events: events.len(),
        error: run.failure.as_ref().map(ToString::to_string),
    };
    Ok((report, run.failure))
}

fn print_text(report: &RunReport, history_on_exit: bool) {
    println!("Scenario: {}", report.scenario);
    println!();
    for step in &report.steps {
        println!("{}", step);
    }

    if history_on_exit {
        println!();
        println!("Work history:");
        for entry in &report.history {
            println!("  {}", HistoryLine(entry));
        }
    }

    if !report.waiting.is_empty() {
        println!();
        println!("Still waiting:");
        for queue in &report.waiting {
            let ids: Vec<String> = queue.issues.iter().map(ToString::to_string).collect();
            println!("  {}: {}", queue.category, ids.join(", "));
        }
    }

    if let Some(error) = &report.error {
        println!();
        println!("Stopped: {}", error);
    }
}
