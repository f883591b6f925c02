//! Assignment engine: round-robin selection among free eligible agents, and
//! draining of waiting queues when an agent frees up.
//!
//! The engine owns both pieces of scheduling state, the per-category
//! rotation counters and the waiting queues, so the two are always updated
//! under whatever lock guards the engine itself.
//!
//! # Selection
//!
//! 1. The category roster is every agent whose expertise contains the
//!    issue's category, in the store's enumeration order.
//! 2. Starting one past the category's last picked index (wrapping), the
//!    first FREE agent in the roster is chosen, the counter is set to its
//!    index, and both sides are assigned. If the issue was queued, its
//!    queue entry is removed.
//! 3. No FREE agent in the roster: the issue is queued under its category
//!    (unless it is already queued) and marked WAITING.
//!
//! Indexing into the full category roster rather than into the free subset
//! keeps positions stable while agents go busy, so fresh agents are handed
//! work in enumeration order and the rotation never skips a free agent.
//!
//! # Drain
//!
//! When an agent becomes free, its expertise categories are scanned in
//! declaration order. Each category yields at most one pop. A popped id
//! whose issue is gone, no longer WAITING, or already has an agent is
//! discarded and the scan moves on. The first valid issue is assigned and the scan stops.


use crate::agent::Agent;
use crate::category::Category;
use crate::issue::{Issue, IssueStatus};
use crate::queue::WaitingQueues;
use crate::store::IssueStore;
use std::collections::HashMap;
use tracing::{debug, info};

/// Scheduling state plus the two assignment operations.
#[derive(Debug, Default)]
pub struct AssignmentEngine {
    /// Roster index of the last agent picked, per category.
    last_assigned: HashMap<Category, usize>,
    queues: WaitingQueues,
}

impl AssignmentEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `issue` to the next free eligible agent, or queue it.
    ///
    /// `agents` is the full roster in enumeration order. On success the
    /// chosen agent is returned already marked BUSY, and `issue` is
    /// IN_PROGRESS; the caller persists both. On `None`, `issue` is WAITING
    /// and sits in its category's queue exactly once.
    pub fn find_and_assign(&mut self, issue: &mut Issue, agents: Vec<Agent>) -> Option<Agent> {
        debug_assert!(issue.status().is_assignable());

        let category = issue.category;
        let mut roster: Vec<Agent> = agents
            .into_iter()
            .filter(|agent| agent.can_handle(category))
            .collect();

        let count = roster.len();
        let start = match self.last_assigned.get(&category) {
            Some(last) if count > 0 => (last + 1) % count,
            _ => 0,
        };
        let pick = (0..count)
            .map(|offset| (start + offset) % count)
            .find(|&index| roster[index].is_free());

        let Some(next) = pick else {
            // An issue already in line keeps its place, whatever its status.
            if !self.queues.contains(issue.id) {
                self.queues.enqueue(category, issue.id);
            }
            issue.mark_waiting();
            info!(
                issue = %issue.id,
                %category,
                queued = self.queues.len(category),
                "no free agent, issue is waiting"
            );
            return None;
        };

        self.last_assigned.insert(category, next);
        if self.queues.remove(issue.id) {
            debug!(issue = %issue.id, "assigned issue left the waiting queue");
        }

        let mut agent = roster.swap_remove(next);
        agent.assign(issue.id);
        issue.assign_agent(agent.id);

        info!(
            issue = %issue.id,
            agent = %agent.id,
            %category,
            rotation = next,
            "issue assigned"
        );
        Some(agent)
    }

    /// Hand the freed `agent` the oldest eligible waiting issue, if any.
    ///
    /// On success the issue is returned IN_PROGRESS and `agent` is BUSY;
    /// the caller persists both. Runs a single scan; other idle agents are
    /// not revisited.
    pub fn drain_waiting_for<S>(&mut self, agent: &mut Agent, issues: &S) -> Option<Issue>
    where
        S: IssueStore + ?Sized,
    {
        let expertise = agent.expertise().to_vec();
        let mut start = 0;

        while let Some((category, issue_id)) = self.queues.dequeue_eligible(&expertise[start..]) {
            match issues.get(&issue_id) {
                Some(mut issue)
                    if issue.status() == IssueStatus::Waiting && issue.assigned_agent().is_none() =>
                {
                    agent.assign(issue.id);
                    issue.assign_agent(agent.id);
                    info!(
                        agent = %agent.id,
                        issue = %issue.id,
                        %category,
                        "picked up waiting issue"
                    );
                    return Some(issue);
                }
                Some(issue) => {
                    debug!(issue = %issue_id, status = %issue.status(), "discarding stale queue entry");
                }
                None => {
                    debug!(issue = %issue_id, "discarding queue entry for unknown issue");
                }
            }

            // Next category after the one that was just popped.
            start = expertise
                .iter()
                .position(|c| *c == category)
                .map_or(expertise.len(), |pos| pos + 1);
        }

        debug!(agent = %agent.id, "no eligible waiting issues");
        None
    }

    /// The waiting queues, for reporting.
    pub fn queues(&self) -> &WaitingQueues {
        &self.queues
    }
}
