//! Issue lifecycle operations on the dispatcher.

use super::{Desk, Dispatcher};
use crate::agent::Agent;
use crate::category::Category;
use crate::error::{Result, RotaError};
use crate::events::{Event, EventAction};
use crate::ids::{AgentId, IssueId};
use crate::issue::{Issue, IssueStatus, NewIssue, ResolveOutcome};
use crate::store::{AgentStore, IssueStore};
use serde_json::json;
use tracing::{info, warn};

/// What a `resolve_issue` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The issue as stored after the call.
    pub issue: Issue,
    pub outcome: ResolveOutcome,
    /// The agent released by this call, if any.
    pub freed_agent: Option<AgentId>,
    /// A waiting issue the freed agent picked up, now IN_PROGRESS.
    pub drained: Option<Issue>,
}

impl<A: AgentStore, I: IssueStore> Dispatcher<A, I> {
    /// Validate and store a new OPEN issue.
    ///
    /// An unrecognized issue type is filed as OTHER with a warning. The
    /// issue is not assigned; call [`Dispatcher::assign_issue`] for that.
    pub fn create_issue(&self, input: NewIssue) -> Result<Issue> {
        input.validate()?;
        let category = Category::resolve(&input.issue_type);

        let mut desk = self.desk();
        let issue = Issue::new(IssueId::new(desk.issue_ids.next()), category, input);
        desk.issues.put(issue.clone());
        desk.events.append(
            Event::new(EventAction::IssueCreated)
                .with_issue(issue.id)
                .with_details(json!({
                    "category": issue.category.as_str(),
                    "transaction_id": issue.transaction_id,
                    "email": issue.email,
                })),
        );

        info!(issue = %issue.id, category = %issue.category, "issue created");
        Ok(issue)
    }

    /// Assign an issue to the next free eligible agent, or queue it.
    ///
    /// Returns the agent now working the issue, or `None` when the issue is
    /// WAITING. An issue that already has an agent, or whose status is
    /// neither OPEN nor WAITING, is left alone and its current agent (if
    /// any) is returned.
    pub fn assign_issue(&self, id: IssueId) -> Result<Option<Agent>> {
        let mut guard = self.desk();
        let desk = &mut *guard;

        let mut issue = desk
            .issues
            .get(&id)
            .ok_or_else(|| RotaError::IssueNotFound(id.to_string()))?;

        if let Some(agent_id) = issue.assigned_agent() {
            info!(issue = %id, agent = %agent_id, "issue already assigned");
            return Ok(desk.agents.get(&agent_id));
        }

        if !issue.status().is_assignable() {
            info!(issue = %id, status = %issue.status(), "issue not assignable, skipping");
            return Ok(None);
        }

        let roster = desk.agents.list();
        let assigned = desk.engine.find_and_assign(&mut issue, roster);

        let event = match &assigned {
            Some(agent) => {
                desk.agents.put(agent.clone());
                Event::new(EventAction::IssueAssigned)
                    .with_issue(id)
                    .with_agent(agent.id)
                    .with_details(json!({ "category": issue.category.as_str() }))
            }
            None => Event::new(EventAction::IssueQueued)
                .with_issue(id)
                .with_details(json!({
                    "category": issue.category.as_str(),
                    "queued": desk.engine.queues().len(issue.category),
                    "waiting_total": desk.engine.queues().total_len(),
                })),
        };
        desk.issues.put(issue);
        desk.events.append(event);

        Ok(assigned)
    }

    /// Resolve an IN_PROGRESS issue and free its agent.
    ///
    /// The freed agent immediately picks up the oldest waiting issue in its
    /// expertise, if there is one. Resolving an issue that is already
    /// RESOLVED or CLOSED changes nothing.
    pub fn resolve_issue(&self, id: IssueId, resolution: &str) -> Result<Resolution> {
        let mut guard = self.desk();
        let desk = &mut *guard;

        let mut issue = desk
            .issues
            .get(&id)
            .ok_or_else(|| RotaError::IssueNotFound(id.to_string()))?;

        let outcome = issue.resolve(resolution)?;
        if let ResolveOutcome::AlreadyTerminal(status) = outcome {
            info!(issue = %id, %status, "issue already terminal, nothing to resolve");
            return Ok(Resolution {
                issue,
                outcome,
                freed_agent: None,
                drained: None,
            });
        }

        let agent = match issue.assigned_agent() {
            Some(agent_id) => Some(
                desk.agents
                    .get(&agent_id)
                    .ok_or_else(|| RotaError::AgentNotFound(agent_id.to_string()))?,
            ),
            None => None,
        };

        desk.issues.put(issue.clone());

        let Some(mut agent) = agent else {
            warn!(issue = %id, "resolved issue had no assigned agent");
            desk.events.append(Event::new(EventAction::IssueResolved).with_issue(id));
            return Ok(Resolution {
                issue,
                outcome,
                freed_agent: None,
                drained: None,
            });
        };

        agent.record_resolved(id);
        agent.release();
        desk.agents.put(agent.clone());
        desk.events.append(
            Event::new(EventAction::IssueResolved)
                .with_issue(id)
                .with_agent(agent.id)
                .with_details(json!({ "resolution": issue.resolution() })),
        );
        info!(issue = %id, agent = %agent.id, "issue resolved, agent freed");

        let drained = drain(desk, &mut agent);

        Ok(Resolution {
            issue,
            outcome,
            freed_agent: Some(agent.id),
            drained,
        })
    }

    /// Edit status and/or resolution text of a non-terminal issue.
    pub fn update_issue(
        &self,
        id: IssueId,
        status: Option<IssueStatus>,
        resolution: Option<&str>,
    ) -> Result<Issue> {
        let mut desk = self.desk();

        let mut issue = desk
            .issues
            .get(&id)
            .ok_or_else(|| RotaError::IssueNotFound(id.to_string()))?;
        let previous = issue.status();

        issue.apply_update(status, resolution)?;
        desk.issues.put(issue.clone());
        desk.events.append(
            Event::new(EventAction::IssueUpdated)
                .with_issue(id)
                .with_details(json!({
                    "from": previous.as_str(),
                    "to": issue.status().as_str(),
                    "resolution": issue.resolution(),
                })),
        );

        info!(issue = %id, from = %previous, to = %issue.status(), "issue updated");
        Ok(issue)
    }
}

/// Let a freshly freed agent take the oldest waiting issue it can handle.
fn drain<A: AgentStore, I: IssueStore>(desk: &mut Desk<A, I>, agent: &mut Agent) -> Option<Issue> {
    let picked = desk.engine.drain_waiting_for(agent, &desk.issues)?;

    desk.issues.put(picked.clone());
    desk.agents.put(agent.clone());
    desk.events.append(
        Event::new(EventAction::IssueDrained)
            .with_issue(picked.id)
            .with_agent(agent.id)
            .with_details(json!({ "category": picked.category.as_str() })),
    );
    Some(picked)
}
