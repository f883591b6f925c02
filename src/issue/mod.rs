//! Issue model for rota.
//!
//! An issue is a unit of customer work with a category, a lifecycle status,
//! and an optional assigned agent. Descriptive fields are immutable after
//! creation; the lifecycle fields are private and change only through the
//! helpers in `mutations` and the state machine checks in `transitions`.
//!
//! # Lifecycle
//!
//! ```text
//! OPEN ──assign──► IN_PROGRESS ──resolve──► RESOLVED ──(external)──► CLOSED
//!   │                  ▲
//!   └──no free agent──► WAITING ──drained by engine──┘
//! ```

use crate::category::Category;
use crate::error::{Result, RotaError};
use crate::ids::{AgentId, IssueId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

mod mutations;
mod transitions;

pub use transitions::ResolveOutcome;

/// Issue lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueStatus {
    Open,
    Waiting,
    InProgress,
    Resolved,
    Closed,
}

impl IssueStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [IssueStatus; 5] = [
        IssueStatus::Open,
        IssueStatus::Waiting,
        IssueStatus::InProgress,
        IssueStatus::Resolved,
        IssueStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::Open => "OPEN",
            IssueStatus::Waiting => "WAITING",
            IssueStatus::InProgress => "IN_PROGRESS",
            IssueStatus::Resolved => "RESOLVED",
            IssueStatus::Closed => "CLOSED",
        }
    }

    /// RESOLVED and CLOSED accept no further edits.
    pub fn is_terminal(&self) -> bool {
        matches!(self, IssueStatus::Resolved | IssueStatus::Closed)
    }

    /// Statuses from which the engine may assign an agent.
    pub fn is_assignable(&self) -> bool {
        matches!(self, IssueStatus::Open | IssueStatus::Waiting)
    }
}

impl FromStr for IssueStatus {
    type Err = RotaError;

    /// Strict parse: case-insensitive, spaces read as underscores.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_uppercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| {
                RotaError::Validation(format!(
                    "unknown issue status '{}' (expected one of: {})",
                    s,
                    Self::ALL.map(|st| st.as_str()).join(", ")
                ))
            })
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied fields for a new issue.
///
/// `issue_type` is free text; it is mapped to a [`Category`] leniently at
/// creation time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewIssue {
    pub transaction_id: String,
    pub issue_type: String,
    pub subject: String,
    pub description: String,
    pub email: String,
}

impl NewIssue {
    /// Reject blank fields before anything is allocated or stored.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("transaction_id", &self.transaction_id),
            ("issue_type", &self.issue_type),
            ("subject", &self.subject),
            ("description", &self.description),
            ("email", &self.email),
        ];

        let blank: Vec<&str> = fields
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if !blank.is_empty() {
            return Err(RotaError::Validation(format!(
                "issue fields must be non-empty: {}",
                blank.join(", ")
            )));
        }

        Ok(())
    }
}

/// A customer issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Sequential identifier (e.g., "I1").
    pub id: IssueId,

    /// External transaction reference.
    pub transaction_id: String,

    pub category: Category,

    pub subject: String,

    pub description: String,

    /// Requester contact.
    pub email: String,

    pub created_at: DateTime<Utc>,

    status: IssueStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    resolution: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    assigned_agent: Option<AgentId>,

    updated_at: DateTime<Utc>,
}

impl Issue {
    /// Create an OPEN issue from already-validated input.
    pub fn new(id: IssueId, category: Category, input: NewIssue) -> Self {
        let now = Utc::now();
        Self {
            id,
            transaction_id: input.transaction_id,
            category,
            subject: input.subject,
            description: input.description,
            email: input.email,
            created_at: now,
            status: IssueStatus::Open,
            resolution: None,
            assigned_agent: None,
            updated_at: now,
        }
    }

    pub fn status(&self) -> IssueStatus {
        self.status
    }

    pub fn resolution(&self) -> Option<&str> {
        self.resolution.as_deref()
    }

    pub fn assigned_agent(&self) -> Option<AgentId> {
        self.assigned_agent
    }

    /// Time of the last mutation.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {} ({}) txn={} from {}",
            self.id, self.status, self.subject, self.category, self.transaction_id, self.email
        )?;
        if let Some(agent) = self.assigned_agent {
            write!(f, " -> {}", agent)?;
        }
        if let Some(resolution) = &self.resolution {
            write!(f, " resolution=\"{}\"", resolution)?;
        }
        Ok(())
    }
}
