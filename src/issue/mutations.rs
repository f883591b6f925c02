//! Raw lifecycle setters. Each one refreshes `updated_at`.
//!
//! These do not check the state machine; callers outside the crate go
//! through `resolve` / `apply_update` in `transitions`.

use super::{Issue, IssueStatus};
use crate::ids::AgentId;
use chrono::Utc;

impl Issue {
    /// Attach an agent and move to IN_PROGRESS in one step.
    pub(crate) fn assign_agent(&mut self, agent_id: AgentId) {
        self.assigned_agent = Some(agent_id);
        self.status = IssueStatus::InProgress;
        self.touch();
    }

    /// Park the issue until an eligible agent frees up.
    pub(crate) fn mark_waiting(&mut self) {
        self.status = IssueStatus::Waiting;
        self.touch();
    }

    pub(crate) fn set_status(&mut self, status: IssueStatus) {
        self.status = status;
        self.touch();
    }

    pub(crate) fn set_resolution(&mut self, resolution: impl Into<String>) {
        self.resolution = Some(resolution.into());
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
