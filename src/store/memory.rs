//! Ordered in-memory stores.

use super::{AgentStore, EntityStore, IssueStore};
use crate::agent::Agent;
use crate::ids::{AgentId, IssueId};
use crate::issue::Issue;
use std::collections::{BTreeMap, HashMap};

/// In-memory agent store keyed by id, with a secondary email index.
#[derive(Debug, Default)]
pub struct InMemoryAgentStore {
    by_id: BTreeMap<AgentId, Agent>,
    by_email: HashMap<String, AgentId>,
}

impl InMemoryAgentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntityStore<Agent> for InMemoryAgentStore {
    type Id = AgentId;

    fn put(&mut self, agent: Agent) {
        // An overwrite that changes the email must not leave the old key
        // pointing at this agent.
        if let Some(previous) = self.by_id.get(&agent.id)
            && previous.email != agent.email
        {
            self.by_email.remove(&previous.email);
        }
        self.by_email.insert(agent.email.clone(), agent.id);
        self.by_id.insert(agent.id, agent);
    }

    fn get(&self, id: &AgentId) -> Option<Agent> {
        self.by_id.get(id).cloned()
    }

    fn list(&self) -> Vec<Agent> {
        self.by_id.values().cloned().collect()
    }
}

impl AgentStore for InMemoryAgentStore {
    fn get_by_key(&self, email: &str) -> Option<Agent> {
        self.by_email
            .get(email)
            .and_then(|id| self.by_id.get(id))
            .cloned()
    }
}

/// In-memory issue store keyed by id.
#[derive(Debug, Default)]
pub struct InMemoryIssueStore {
    by_id: BTreeMap<IssueId, Issue>,
}

impl InMemoryIssueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntityStore<Issue> for InMemoryIssueStore {
    type Id = IssueId;

    fn put(&mut self, issue: Issue) {
        self.by_id.insert(issue.id, issue);
    }

    fn get(&self, id: &IssueId) -> Option<Issue> {
        self.by_id.get(id).cloned()
    }

    fn list(&self) -> Vec<Issue> {
        self.by_id.values().cloned().collect()
    }
}

impl IssueStore for InMemoryIssueStore {}
