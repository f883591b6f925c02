//! Audit event log for rota.
//!
//! Every state-changing dispatcher operation appends one [`Event`] to an
//! in-memory, append-only [`EventLog`] while the dispatcher lock is held, so
//! the log order is the commit order. The log can be exported as NDJSON
//! (one JSON object per line) once the caller is done with the dispatcher;
//! no file I/O happens inside the lock.
//!
//! # Event Format
//!
//! - `ts`: RFC3339 timestamp
//! - `action`: what happened (agent_added, issue_created, issue_assigned, ...)
//! - `actor`: `USER@HOST` of the process
//! - `issue` / `agent`: ids involved, when relevant
//! - `details`: freeform object with action-specific details
//!
//! ```
//! use rota::events::{Event, EventAction, EventLog};
//! use serde_json::json;
//!
//! let mut log = EventLog::default();
//! log.append(Event::new(EventAction::IssueCreated).with_issue("I1").with_details(json!({"category": "OTHER"})));
//! assert_eq!(log.events().len(), 1);
//! ```

use crate::error::{Result, RotaError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::LazyLock;

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Agent registered
    AgentAdded,
    /// Issue created (OPEN)
    IssueCreated,
    /// Issue assigned to an agent (-> IN_PROGRESS)
    IssueAssigned,
    /// No free agent; issue queued (-> WAITING)
    IssueQueued,
    /// Issue resolved (IN_PROGRESS -> RESOLVED), agent freed
    IssueResolved,
    /// Freed agent picked up a waiting issue
    IssueDrained,
    /// Generic status/resolution edit
    IssueUpdated,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::AgentAdded => write!(f, "agent_added"),
            EventAction::IssueCreated => write!(f, "issue_created"),
            EventAction::IssueAssigned => write!(f, "issue_assigned"),
            EventAction::IssueQueued => write!(f, "issue_queued"),
            EventAction::IssueResolved => write!(f, "issue_resolved"),
            EventAction::IssueDrained => write!(f, "issue_drained"),
            EventAction::IssueUpdated => write!(f, "issue_updated"),
        }
    }
}

/// An event record for the audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// RFC3339 timestamp when the event occurred.
    pub ts: DateTime<Utc>,

    /// The action that was performed.
    pub action: EventAction,

    /// The actor who performed the action (e.g., `user@HOST`).
    pub actor: String,

    /// Issue id, for issue events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,

    /// Agent id, for agent events and assignments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,

    /// Freeform details object with action-specific information.
    pub details: Value,
}

impl Event {
    /// Create a new event with the given action.
    ///
    /// The timestamp is set to the current time. The actor
    /// (USER@HOSTNAME) is looked up once per process.
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: ACTOR.clone(),
            issue: None,
            agent: None,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    pub fn with_issue(mut self, issue_id: impl ToString) -> Self {
        self.issue = Some(issue_id.to_string());
        self
    }

    pub fn with_agent(mut self, agent_id: impl ToString) -> Self {
        self.agent = Some(agent_id.to_string());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| RotaError::Io(format!("failed to serialize event to JSON: {}", e)))
    }
}

/// `USER@HOST` of this process, resolved once.
static ACTOR: LazyLock<String> = LazyLock::new(actor_string);

fn actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append-only in-memory event log.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn append(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

/// Append events to an NDJSON file, one line each.
///
/// The file and its parent directory are created if missing. All lines are
/// serialized before the file is opened, so a serialization failure writes
/// nothing.
pub fn write_ndjson<P: AsRef<Path>>(path: P, events: &[Event]) -> Result<()> {
    let path = path.as_ref();

    let lines = events
        .iter()
        .map(Event::to_ndjson_line)
        .collect::<Result<Vec<String>>>()?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            RotaError::Io(format!(
                "failed to create events directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            RotaError::Io(format!(
                "failed to open events file '{}': {}",
                path.display(),
                e
            ))
        })?;

    for line in &lines {
        writeln!(file, "{}", line).map_err(|e| {
            RotaError::Io(format!(
                "failed to write event to '{}': {}",
                path.display(),
                e
            ))
        })?;
    }

    file.sync_all().map_err(|e| {
        RotaError::Io(format!(
            "failed to sync events file '{}': {}",
            path.display(),
            e
        ))
    })?;

    Ok(())
}
