//! Entity store interfaces and in-memory implementations.
//!
//! Stores are plain key-value holders with overwrite-by-id semantics and no
//! business logic. They hand out clones; a caller that changes an entity
//! writes it back with [`EntityStore::put`].
//!
//! `list` returns entities in the store's natural enumeration order. For the
//! in-memory stores that is ascending id, which is creation order. The
//! assignment engine's round-robin rotation depends on that order being
//! stable between calls.

mod memory;

pub use memory::{InMemoryAgentStore, InMemoryIssueStore};

use crate::agent::Agent;
use crate::ids::{AgentId, IssueId};
use crate::issue::Issue;

/// Key-value storage for one entity type.
pub trait EntityStore<E> {
    /// Key type of the entity.
    type Id;

    /// Insert or overwrite by id.
    fn put(&mut self, entity: E);

    /// Look up by id.
    fn get(&self, id: &Self::Id) -> Option<E>;

    /// All entities, in natural enumeration order.
    fn list(&self) -> Vec<E>;
}

/// Agent storage, additionally indexed by contact key.
pub trait AgentStore: EntityStore<Agent, Id = AgentId> + Send {
    /// Look up by email.
    fn get_by_key(&self, email: &str) -> Option<Agent>;
}

/// Issue storage.
pub trait IssueStore: EntityStore<Issue, Id = IssueId> + Send {}
