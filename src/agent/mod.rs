//! Agent model.
//!
//! An agent handles issues in a declared, ordered set of categories and works
//! on at most one issue at a time. The availability state and the current
//! issue are kept private so they can only change together:
//! `state == Busy` iff `current_issue().is_some()`.

use crate::category::Category;
use crate::ids::{AgentId, IssueId};
use serde::{Deserialize, Serialize};
use std::fmt;

mod mutations;

/// Availability of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentState {
    Free,
    Busy,
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentState::Free => write!(f, "FREE"),
            AgentState::Busy => write!(f, "BUSY"),
        }
    }
}

/// A worker that can be assigned issues.
///
/// Serialize-only: agents are only built through [`Agent::new`] and the
/// crate's mutations, never from external input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Agent {
    /// Sequential identifier (e.g., "A1").
    pub id: AgentId,

    /// Unique contact key.
    pub email: String,

    /// Display name.
    pub name: String,

    /// Categories this agent handles, in declaration order.
    expertise: Vec<Category>,

    state: AgentState,

    current_issue: Option<IssueId>,

    /// Resolved issues, oldest first.
    work_history: Vec<IssueId>,
}

impl Agent {
    /// Create a free agent with an empty history.
    ///
    /// Duplicate categories are collapsed, keeping the first occurrence so
    /// the declaration order (which drives drain order) is preserved.
    /// Callers validate that `expertise` is non-empty.
    pub fn new(
        id: AgentId,
        email: impl Into<String>,
        name: impl Into<String>,
        expertise: impl IntoIterator<Item = Category>,
    ) -> Self {
        let mut ordered: Vec<Category> = Vec::new();
        for category in expertise {
            if !ordered.contains(&category) {
                ordered.push(category);
            }
        }

        Self {
            id,
            email: email.into(),
            name: name.into(),
            expertise: ordered,
            state: AgentState::Free,
            current_issue: None,
            work_history: Vec::new(),
        }
    }

    /// Categories in declaration order.
    pub fn expertise(&self) -> &[Category] {
        &self.expertise
    }

    /// Whether this agent handles the given category.
    pub fn can_handle(&self, category: Category) -> bool {
        self.expertise.contains(&category)
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    pub fn is_free(&self) -> bool {
        self.state == AgentState::Free
    }

    /// The issue currently being worked on, if any.
    pub fn current_issue(&self) -> Option<IssueId> {
        self.current_issue
    }

    /// Resolved issues, oldest first.
    pub fn work_history(&self) -> &[IssueId] {
        &self.work_history
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expertise: Vec<&str> = self.expertise.iter().map(|c| c.as_str()).collect();
        write!(
            f,
            "{} {} <{}> [{}] {}",
            self.id,
            self.name,
            self.email,
            expertise.join(", "),
            self.state
        )?;
        if let Some(issue) = self.current_issue {
            write!(f, " on {}", issue)?;
        }
        Ok(())
    }
}
