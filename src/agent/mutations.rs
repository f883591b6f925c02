//! State changes on an agent. Only the dispatcher and the assignment
//! engine call these, always under the dispatcher lock.

use super::{Agent, AgentState};
use crate::ids::IssueId;

impl Agent {
    /// Take on an issue and become busy.
    pub(crate) fn assign(&mut self, issue_id: IssueId) {
        self.current_issue = Some(issue_id);
        self.state = AgentState::Busy;
    }

    /// Drop the current issue and become free. Returns the issue that was
    /// being worked on.
    pub(crate) fn release(&mut self) -> Option<IssueId> {
        self.state = AgentState::Free;
        self.current_issue.take()
    }

    /// Append a resolved issue to the work history.
    pub(crate) fn record_resolved(&mut self, issue_id: IssueId) {
        self.work_history.push(issue_id);
    }
}
