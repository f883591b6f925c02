//! Shared fixtures for unit tests.

use crate::agent::Agent;
use crate::category::Category;
use crate::dispatch::Dispatcher;
use crate::ids::{AgentId, IssueId};
use crate::issue::{Issue, NewIssue};
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Switches the process working directory for the lifetime of the guard.
pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(dir: &Path) -> Self {
        // The working directory is process-global; hold a lock even under #[serial].
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// A free agent `A{n}` with the given expertise.
pub(crate) fn agent(n: u64, expertise: &[Category]) -> Agent {
    Agent::new(
        AgentId::new(n),
        format!("agent{}@test.com", n),
        format!("Agent {}", n),
        expertise.iter().copied(),
    )
}

/// Creation input with every field filled in.
pub(crate) fn new_issue(transaction_id: &str, issue_type: &str) -> NewIssue {
    NewIssue {
        transaction_id: transaction_id.to_string(),
        issue_type: issue_type.to_string(),
        subject: "Payment Failed".to_string(),
        description: "My payment failed but money is debited".to_string(),
        email: "testUser1@test.com".to_string(),
    }
}

/// An OPEN issue `I{n}` in the given category.
pub(crate) fn issue(n: u64, category: Category) -> Issue {
    Issue::new(
        IssueId::new(n),
        category,
        new_issue(&format!("T{}", n), category.as_str()),
    )
}

/// A dispatcher seeded with agents, each `(email, expertise)`.
pub(crate) fn dispatcher_with_agents(agents: &[(&str, &[Category])]) -> Dispatcher {
    let dispatcher = Dispatcher::new();
    for (email, expertise) in agents {
        dispatcher
            .add_agent(email, &format!("Agent {}", email), expertise)
            .unwrap();
    }
    dispatcher
}
