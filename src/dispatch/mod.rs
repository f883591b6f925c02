//! Dispatch orchestrator: the single synchronization boundary.
//!
//! [`Dispatcher`] owns the entity stores, the assignment engine (rotation
//! counters and waiting queues), the id sequences, and the event log, all
//! behind one mutex. Every public method, queries included, takes the lock
//! for its whole duration, so operations run one at a time in arrival order
//! and a paired agent/issue change is never observed half-done.
//!
//! Work done under the lock is bounded and CPU-local: store lookups plus a
//! scan over the roster. Nothing blocks on I/O inside it, and there is no
//! background thread; waiting work is picked up synchronously by the
//! `resolve_issue` call that frees an agent.
//!
//! # Failure model
//!
//! Every check runs against local copies before anything is written back, so
//! an `Err` means no store, queue, counter, or log was touched. Repeating an
//! operation that already took effect (resolving a resolved issue, assigning
//! an assigned one) is a benign no-op, not an error.

mod issues;

pub use issues::Resolution;

use crate::agent::Agent;
use crate::category::Category;
use crate::engine::AssignmentEngine;
use crate::error::{Result, RotaError};
use crate::events::{Event, EventAction, EventLog};
use crate::filter::IssueFilter;
use crate::ids::{AgentId, IdSequence, IssueId};
use crate::issue::Issue;
use crate::queue::QueueSnapshot;
use crate::registry::{self, Registration};
use crate::store::{AgentStore, InMemoryAgentStore, InMemoryIssueStore, IssueStore};
use serde::Serialize;
use serde_json::json;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Everything the lock protects.
struct Desk<A, I> {
    agents: A,
    issues: I,
    engine: AssignmentEngine,
    agent_ids: IdSequence,
    issue_ids: IdSequence,
    events: EventLog,
}

/// One agent's resolved work, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkHistory {
    pub agent_id: AgentId,
    pub name: String,
    pub email: String,
    pub issues: Vec<IssueId>,
}

/// Thread-safe issue dispatcher.
pub struct Dispatcher<A = InMemoryAgentStore, I = InMemoryIssueStore> {
    desk: Mutex<Desk<A, I>>,
}

impl Dispatcher {
    /// A dispatcher over empty in-memory stores.
    pub fn new() -> Self {
        Self::with_stores(InMemoryAgentStore::new(), InMemoryIssueStore::new())
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: AgentStore, I: IssueStore> Dispatcher<A, I> {
    /// A dispatcher over caller-supplied stores.
    ///
    /// Id sequences resume after the highest id already present. Waiting
    /// queues start empty; issues already WAITING in `issues` are picked up
    /// again only when `assign_issue` is called for them.
    pub fn with_stores(agents: A, issues: I) -> Self {
        let last_agent = agents.list().iter().map(|a| a.id.number()).max().unwrap_or(0);
        let last_issue = issues.list().iter().map(|i| i.id.number()).max().unwrap_or(0);

        Self {
            desk: Mutex::new(Desk {
                agents,
                issues,
                engine: AssignmentEngine::new(),
                agent_ids: IdSequence::after(last_agent),
                issue_ids: IdSequence::after(last_issue),
                events: EventLog::default(),
            }),
        }
    }

    /// Acquire the dispatcher lock.
    ///
    /// A poisoned lock is recovered: every critical section finishes its
    /// checks before its first write, so a panic cannot leave a half-applied
    /// transition behind.
    fn desk(&self) -> MutexGuard<'_, Desk<A, I>> {
        self.desk.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ========================================================================
    // Agents
    // ========================================================================

    /// Register an agent. A duplicate email returns the existing agent.
    pub fn add_agent(&self, email: &str, name: &str, expertise: &[Category]) -> Result<Agent> {
        let mut guard = self.desk();
        let desk = &mut *guard;

        let registration =
            registry::register(&mut desk.agents, &mut desk.agent_ids, email, name, expertise)?;
        if let Registration::Created(agent) = &registration {
            let expertise: Vec<&str> = agent.expertise().iter().map(|c| c.as_str()).collect();
            desk.events.append(
                Event::new(EventAction::AgentAdded)
                    .with_agent(agent.id)
                    .with_details(json!({
                        "email": agent.email,
                        "name": agent.name,
                        "expertise": expertise,
                    })),
            );
        }
        Ok(registration.into_agent())
    }

    pub fn agent(&self, id: AgentId) -> Result<Agent> {
        self.desk()
            .agents
            .get(&id)
            .ok_or_else(|| RotaError::AgentNotFound(id.to_string()))
    }

    pub fn agent_by_email(&self, email: &str) -> Result<Agent> {
        self.desk()
            .agents
            .get_by_key(email)
            .ok_or_else(|| RotaError::AgentNotFound(format!("no agent with email '{}'", email)))
    }

    /// All agents in enumeration order.
    pub fn agents(&self) -> Vec<Agent> {
        self.desk().agents.list()
    }

    // ========================================================================
    // Reporting
    // ========================================================================

    pub fn issue(&self, id: IssueId) -> Result<Issue> {
        self.desk()
            .issues
            .get(&id)
            .ok_or_else(|| RotaError::IssueNotFound(id.to_string()))
    }

    /// Issues matching `filter`, in id order.
    pub fn issues(&self, filter: &IssueFilter) -> Vec<Issue> {
        self.desk()
            .issues
            .list()
            .into_iter()
            .filter(|issue| filter.matches(issue))
            .collect()
    }

    /// Resolved work per agent, in agent id order.
    pub fn work_history(&self) -> Vec<WorkHistory> {
        self.desk()
            .agents
            .list()
            .into_iter()
            .map(|agent| WorkHistory {
                agent_id: agent.id,
                issues: agent.work_history().to_vec(),
                name: agent.name,
                email: agent.email,
            })
            .collect()
    }

    /// Current waiting queues, non-empty ones only.
    pub fn waiting(&self) -> Vec<QueueSnapshot> {
        self.desk().engine.queues().snapshot()
    }

    /// Copy of the event log, in commit order.
    pub fn events(&self) -> Vec<Event> {
        self.desk().events.events().to_vec()
    }
}
