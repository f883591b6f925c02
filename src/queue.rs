//! Per-category FIFO queues of issues waiting for a free agent.

use crate::category::Category;
use crate::ids::IssueId;
use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};

/// One FIFO queue of issue ids per category, created lazily.
#[derive(Debug, Default)]
pub struct WaitingQueues {
    queues: BTreeMap<Category, VecDeque<IssueId>>,
}

/// Read-only view of one category's queue, head first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueSnapshot {
    pub category: Category,
    pub issues: Vec<IssueId>,
}

impl WaitingQueues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the tail of the category's queue.
    pub fn enqueue(&mut self, category: Category, issue_id: IssueId) {
        self.queues.entry(category).or_default().push_back(issue_id);
    }

    /// Pop the head of the first non-empty queue, scanning `categories` in
    /// the order given. Returns the category it came from along with the id.
    pub fn dequeue_eligible(&mut self, categories: &[Category]) -> Option<(Category, IssueId)> {
        categories.iter().find_map(|category| {
            self.queues
                .get_mut(category)
                .and_then(VecDeque::pop_front)
                .map(|issue_id| (*category, issue_id))
        })
    }

    /// Drop the id from whichever queue holds it. Returns whether it was found.
    pub fn remove(&mut self, issue_id: IssueId) -> bool {
        for queue in self.queues.values_mut() {
            if let Some(pos) = queue.iter().position(|id| *id == issue_id) {
                queue.remove(pos);
                return true;
            }
        }
        false
    }

    /// Whether the id sits in any queue.
    pub fn contains(&self, issue_id: IssueId) -> bool {
        self.queues.values().any(|queue| queue.contains(&issue_id))
    }

    /// Number of ids waiting in one category.
    pub fn len(&self, category: Category) -> usize {
        self.queues.get(&category).map_or(0, VecDeque::len)
    }

    /// Number of ids waiting across all categories.
    pub fn total_len(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }

    /// Non-empty queues in category order.
    pub fn snapshot(&self) -> Vec<QueueSnapshot> {
        self.queues
            .iter()
            .filter(|(_, queue)| !queue.is_empty())
            .map(|(category, queue)| QueueSnapshot {
                category: *category,
                issues: queue.iter().copied().collect(),
            })
            .collect()
    }
}
