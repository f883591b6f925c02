//! Rota: round-robin issue routing for support desks.
//!
//! Agents register with a set of categories they can handle. Issues are
//! filed under a category and assigned to the next free agent for it, in
//! rotation; when nobody is free they wait in a per-category FIFO queue
//! and are handed out as agents resolve their current work.
//!
//! [`dispatch::Dispatcher`] is the entry point and the only type that
//! needs sharing across threads.

pub mod agent;
pub mod category;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod filter;
pub mod ids;
pub mod issue;
pub mod queue;
pub mod registry;
pub mod scenario;
pub mod store;

#[cfg(test)]
mod test_support;

pub use category::Category;
pub use dispatch::{Dispatcher, Resolution, WorkHistory};
pub use error::{Result, RotaError};
pub use filter::IssueFilter;
pub use ids::{AgentId, IssueId};
pub use issue::{Issue, IssueStatus, NewIssue};
