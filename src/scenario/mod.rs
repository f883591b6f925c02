//! Scenario files: a scripted sequence of dispatcher operations.
//!
//! A scenario is YAML with a list of steps. Each step names its `action`
//! and carries that action's fields; `expect_error: true` turns a failure
//! into a pass (and a success into a failure).
//!
//! ```yaml
//! name: payment backlog
//! steps:
//!   - action: add_agent
//!     email: agent1@test.com
//!     name: Agent 1
//!     expertise: [PAYMENT_RELATED]
//!   - action: create_issue
//!     transaction_id: T1
//!     issue_type: Payment Related
//!     subject: Payment Failed
//!     description: My payment failed but money is debited
//!     email: testUser1@test.com
//!   - action: assign
//!     issue: I1
//!   - action: resolve
//!     issue: I1
//!     resolution: PaymentFailed debited amount will get reversed
//!   - action: history
//! ```
//!
//! Issues are referenced by the ids the run allocates, so a scenario run
//! against a fresh dispatcher is deterministic.

mod runner;
#[cfg(test)]
mod tests;

pub use runner::{run, HistoryLine, ScenarioRun, StepOutput, StepReport};

use crate::error::{Result, RotaError};
use crate::ids::IssueId;
use crate::issue::NewIssue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A named list of steps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub steps: Vec<Step>,
}

/// One scripted operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    #[serde(flatten)]
    pub action: Action,

    /// The step passes only if the operation fails.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub expect_error: bool,
}

/// Dispatcher operations a step can run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    AddAgent {
        email: String,
        name: String,
        expertise: Vec<String>,
    },
    CreateIssue(NewIssue),
    Assign {
        issue: IssueId,
    },
    Resolve {
        issue: IssueId,
        resolution: String,
    },
    Update {
        issue: IssueId,
        #[serde(default)]
        status: Option<String>,
        #[serde(default)]
        resolution: Option<String>,
    },
    /// Filter keys as accepted by [`crate::filter::IssueFilter::from_pairs`].
    List {
        #[serde(default)]
        filter: BTreeMap<String, String>,
    },
    Agents,
    Waiting,
    History,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddAgent { .. } => "add_agent",
            Action::CreateIssue(_) => "create_issue",
            Action::Assign { .. } => "assign",
            Action::Resolve { .. } => "resolve",
            Action::Update { .. } => "update",
            Action::List { .. } => "list",
            Action::Agents => "agents",
            Action::Waiting => "waiting",
            Action::History => "history",
        }
    }
}

impl Scenario {
    /// Load a scenario from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            RotaError::Config(format!(
                "failed to read scenario file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse a scenario from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| RotaError::Config(format!("failed to parse scenario YAML: {}", e)))
    }

    /// Display name, falling back to a generic label.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("scenario")
    }
}
