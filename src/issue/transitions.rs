//! Status machine checks for resolve and generic update.
//!
//! Every check runs before the first write, so a rejected call leaves the
//! issue exactly as it was.

use super::{Issue, IssueStatus};
use crate::error::{Result, RotaError};

/// Result of a resolve request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// IN_PROGRESS -> RESOLVED happened now.
    Resolved,
    /// The issue was already RESOLVED or CLOSED; nothing changed.
    AlreadyTerminal(IssueStatus),
}

impl Issue {
    /// Move an IN_PROGRESS issue to RESOLVED.
    ///
    /// - RESOLVED or CLOSED: benign no-op, reported as
    ///   [`ResolveOutcome::AlreadyTerminal`].
    /// - Any other status but IN_PROGRESS: `InvalidTransition`.
    /// - Blank resolution: `Validation`.
    pub fn resolve(&mut self, resolution: &str) -> Result<ResolveOutcome> {
        if self.status.is_terminal() {
            return Ok(ResolveOutcome::AlreadyTerminal(self.status));
        }

        if self.status != IssueStatus::InProgress {
            return Err(RotaError::InvalidTransition(format!(
                "issue {} must be IN_PROGRESS to be resolved (currently {})",
                self.id, self.status
            )));
        }

        if resolution.trim().is_empty() {
            return Err(RotaError::Validation(format!(
                "resolution text is required to resolve issue {}",
                self.id
            )));
        }

        self.set_status(IssueStatus::Resolved);
        self.set_resolution(resolution);
        Ok(ResolveOutcome::Resolved)
    }

    /// Generic editor for non-terminal issues.
    ///
    /// Rules:
    /// - `status` may not be RESOLVED or CLOSED (use [`Issue::resolve`]).
    /// - A RESOLVED or CLOSED issue cannot be updated at all.
    /// - IN_PROGRESS requires an assigned agent.
    ///
    /// A `status` equal to the current one is left alone. A blank
    /// `resolution` is ignored.
    pub fn apply_update(&mut self, status: Option<IssueStatus>, resolution: Option<&str>) -> Result<()> {
        if let Some(target) = status
            && target.is_terminal()
        {
            return Err(RotaError::InvalidTransition(format!(
                "cannot set issue {} to {} via update; use resolve instead",
                self.id, target
            )));
        }

        if self.status.is_terminal() {
            return Err(RotaError::InvalidTransition(format!(
                "cannot update issue {}: it is already {}",
                self.id, self.status
            )));
        }

        let status_change = status.filter(|target| *target != self.status);

        if status_change == Some(IssueStatus::InProgress) && self.assigned_agent.is_none() {
            return Err(RotaError::InvalidTransition(format!(
                "issue {} cannot be IN_PROGRESS without an assigned agent",
                self.id
            )));
        }

        if let Some(target) = status_change {
            self.set_status(target);
        }

        if let Some(text) = resolution
            && !text.trim().is_empty()
        {
            self.set_resolution(text);
        }

        Ok(())
    }
}
