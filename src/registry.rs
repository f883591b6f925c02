//! Agent registration.
//!
//! Registration validates input, deduplicates by email, and allocates the
//! next sequential agent id. It runs inside the dispatcher lock like every
//! other mutation, so two registrations can never race for the same id or
//! email.

use crate::agent::Agent;
use crate::category::Category;
use crate::error::{Result, RotaError};
use crate::ids::{AgentId, IdSequence};
use crate::store::AgentStore;
use tracing::{info, warn};

/// Outcome of a registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// A new agent was stored.
    Created(Agent),
    /// An agent with this email already existed; it is returned unchanged.
    Existing(Agent),
}

impl Registration {
    pub fn into_agent(self) -> Agent {
        match self {
            Registration::Created(agent) | Registration::Existing(agent) => agent,
        }
    }
}

/// Register an agent, or return the existing one with the same email.
pub fn register<S>(
    store: &mut S,
    ids: &mut IdSequence,
    email: &str,
    name: &str,
    expertise: &[Category],
) -> Result<Registration>
where
    S: AgentStore + ?Sized,
{
    let email = email.trim();
    let name = name.trim();

    if email.is_empty() || name.is_empty() || expertise.is_empty() {
        return Err(RotaError::Validation(
            "agent email, name, and expertise must be non-empty".to_string(),
        ));
    }

    if let Some(existing) = store.get_by_key(email) {
        warn!(email, agent = %existing.id, "agent already registered, returning existing");
        return Ok(Registration::Existing(existing));
    }

    let agent = Agent::new(
        AgentId::new(ids.next()),
        email,
        name,
        expertise.iter().copied(),
    );
    store.put(agent.clone());
    info!(agent = %agent.id, email, "agent registered");
    Ok(Registration::Created(agent))
}

/// Parse expertise names strictly. Unknown names are a validation error.
pub fn parse_expertise<S: AsRef<str>>(names: &[S]) -> Result<Vec<Category>> {
    names.iter().map(|name| name.as_ref().parse()).collect()
}
