//! Executes scenario steps against a dispatcher.

use super::{Action, Scenario};
use crate::agent::Agent;
use crate::dispatch::{Dispatcher, WorkHistory};
use crate::error::{Result, RotaError};
use crate::filter::IssueFilter;
use crate::ids::{AgentId, IssueId};
use crate::issue::{Issue, IssueStatus, ResolveOutcome};
use crate::queue::QueueSnapshot;
use crate::registry::parse_expertise;
use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

/// What a step produced.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepOutput {
    Agent {
        agent: Agent,
    },
    Issue {
        issue: Issue,
    },
    Assignment {
        issue: IssueId,
        agent: Option<Agent>,
    },
    Resolution {
        issue: Issue,
        /// Set when the issue was already terminal and nothing changed.
        #[serde(skip_serializing_if = "Option::is_none")]
        already: Option<IssueStatus>,
        #[serde(skip_serializing_if = "Option::is_none")]
        freed_agent: Option<AgentId>,
        #[serde(skip_serializing_if = "Option::is_none")]
        drained: Option<Issue>,
    },
    Issues {
        issues: Vec<Issue>,
    },
    Agents {
        agents: Vec<Agent>,
    },
    Waiting {
        queues: Vec<QueueSnapshot>,
    },
    History {
        history: Vec<WorkHistory>,
    },
    /// The operation failed and the step expected it to.
    ExpectedError {
        error: String,
    },
}

/// One executed step.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    /// 1-based position in the scenario.
    pub step: usize,
    pub action: &'static str,
    #[serde(flatten)]
    pub output: StepOutput,
}

/// Steps that ran, and the failure that stopped the run, if any.
#[derive(Debug, Clone)]
pub struct ScenarioRun {
    pub steps: Vec<StepReport>,
    pub failure: Option<RotaError>,
}

impl ScenarioRun {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    pub fn into_result(self) -> Result<Vec<StepReport>> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(self.steps),
        }
    }
}

/// Run every step in order, stopping at the first unexpected outcome.
pub fn run(dispatcher: &Dispatcher, scenario: &Scenario) -> ScenarioRun {
    let mut steps = Vec::with_capacity(scenario.steps.len());

    for (index, step) in scenario.steps.iter().enumerate() {
        let number = index + 1;
        let action = step.action.name();

        let output = match (execute(dispatcher, &step.action), step.expect_error) {
            (Ok(output), false) => output,
            (Err(err), true) => {
                info!(step = number, action, error = %err, "step failed as expected");
                StepOutput::ExpectedError {
                    error: err.to_string(),
                }
            }
            (Ok(_), true) => {
                let err = RotaError::Scenario(format!(
                    "step {} ({}) was expected to fail but succeeded",
                    number, action
                ));
                warn!(step = number, action, "step unexpectedly succeeded");
                return ScenarioRun {
                    steps,
                    failure: Some(err),
                };
            }
            (Err(err), false) => {
                warn!(step = number, action, error = %err, "step failed");
                return ScenarioRun {
                    steps,
                    failure: Some(err),
                };
            }
        };

        steps.push(StepReport {
            step: number,
            action,
            output,
        });
    }

    ScenarioRun {
        steps,
        failure: None,
    }
}

fn execute(dispatcher: &Dispatcher, action: &Action) -> Result<StepOutput> {
    match action {
        Action::AddAgent {
            email,
            name,
            expertise,
        } => {
            let expertise = parse_expertise(expertise)?;
            let agent = dispatcher.add_agent(email, name, &expertise)?;
            Ok(StepOutput::Agent { agent })
        }
        Action::CreateIssue(input) => {
            let issue = dispatcher.create_issue(input.clone())?;
            Ok(StepOutput::Issue { issue })
        }
        Action::Assign { issue } => {
            let agent = dispatcher.assign_issue(*issue)?;
            Ok(StepOutput::Assignment {
                issue: *issue,
                agent,
            })
        }
        Action::Resolve { issue, resolution } => {
            let result = dispatcher.resolve_issue(*issue, resolution)?;
            let already = match result.outcome {
                ResolveOutcome::Resolved => None,
                ResolveOutcome::AlreadyTerminal(status) => Some(status),
            };
            Ok(StepOutput::Resolution {
                issue: result.issue,
                already,
                freed_agent: result.freed_agent,
                drained: result.drained,
            })
        }
        Action::Update {
            issue,
            status,
            resolution,
        } => {
            let status = status.as_deref().map(str::parse::<IssueStatus>).transpose()?;
            let issue = dispatcher.update_issue(*issue, status, resolution.as_deref())?;
            Ok(StepOutput::Issue { issue })
        }
        Action::List { filter } => {
            let filter = IssueFilter::from_pairs(filter)?;
            Ok(StepOutput::Issues {
                issues: dispatcher.issues(&filter),
            })
        }
        Action::Agents => Ok(StepOutput::Agents {
            agents: dispatcher.agents(),
        }),
        Action::Waiting => Ok(StepOutput::Waiting {
            queues: dispatcher.waiting(),
        }),
        Action::History => Ok(StepOutput::History {
            history: dispatcher.work_history(),
        }),
    }
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: ", self.step, self.action)?;

        match &self.output {
            StepOutput::Agent { agent } => write!(f, "{}", agent),
            StepOutput::Issue { issue } => write!(f, "{}", issue),
            StepOutput::Assignment {
                issue,
                agent: Some(agent),
            } => write!(f, "{} -> {} ({})", issue, agent.id, agent.name),
            StepOutput::Assignment { issue, agent: None } => {
                write!(f, "{} waiting, no free agent", issue)
            }
            StepOutput::Resolution {
                issue,
                already: Some(status),
                ..
            } => write!(f, "{} already {}, nothing to do", issue.id, status),
            StepOutput::Resolution {
                issue,
                freed_agent,
                drained,
                ..
            } => {
                write!(f, "{} resolved", issue.id)?;
                if let Some(agent) = freed_agent {
                    write!(f, ", {} freed", agent)?;
                }
                if let Some(next) = drained
                    && let Some(agent) = next.assigned_agent()
                {
                    write!(f, ", {} picked up {}", agent, next.id)?;
                }
                Ok(())
            }
            StepOutput::Issues { issues } => {
                write!(f, "{} issue(s)", issues.len())?;
                for issue in issues {
                    write!(f, "\n  {}", issue)?;
                }
                Ok(())
            }
            StepOutput::Agents { agents } => {
                write!(f, "{} agent(s)", agents.len())?;
                for agent in agents {
                    write!(f, "\n  {}", agent)?;
                }
                Ok(())
            }
            StepOutput::Waiting { queues } if queues.is_empty() => f.write_str("no waiting issues"),
            StepOutput::Waiting { queues } => {
                f.write_str("waiting queues")?;
                for queue in queues {
                    let ids: Vec<String> = queue.issues.iter().map(ToString::to_string).collect();
                    write!(f, "\n  {}: {}", queue.category, ids.join(", "))?;
                }
                Ok(())
            }
            StepOutput::History { history } => {
                f.write_str("work history")?;
                for entry in history {
                    write!(f, "\n  {}", HistoryLine(entry))?;
                }
                Ok(())
            }
            StepOutput::ExpectedError { error } => write!(f, "failed as expected: {}", error),
        }
    }
}

/// `A1 Agent 1 <agent1@test.com>: I1, I3`
pub struct HistoryLine<'a>(pub &'a WorkHistory);

impl fmt::Display for HistoryLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entry = self.0;
        let ids: Vec<String> = entry.issues.iter().map(ToString::to_string).collect();
        let ids = if ids.is_empty() {
            "(none)".to_string()
        } else {
            ids.join(", ")
        };
        write!(f, "{} {} <{}>: {}", entry.agent_id, entry.name, entry.email, ids)
    }
}
