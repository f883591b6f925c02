//! Sequential identifiers for agents and issues.
//!
//! Ids are allocated from a counter starting at 1 and rendered with a
//! one-letter prefix: agents as `A1`, `A2`, ..., issues as `I1`, `I2`, ...
//! Parsing is case-insensitive (`i3` reads as `I3`).

use crate::error::{Result, RotaError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static AGENT_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^A([1-9]\d*)$").expect("Invalid agent ID regex"));

static ISSUE_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^I([1-9]\d*)$").expect("Invalid issue ID regex"));

macro_rules! sequential_id {
    ($name:ident, $prefix:literal, $regex:ident, $what:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(into = "String", try_from = "String")]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw sequence number.
            pub fn new(number: u64) -> Self {
                Self(number)
            }

            /// The raw sequence number.
            pub fn number(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl FromStr for $name {
            type Err = RotaError;

            fn from_str(s: &str) -> Result<Self> {
                let normalized = s.trim().to_uppercase();
                $regex
                    .captures(&normalized)
                    .and_then(|caps| caps[1].parse().ok())
                    .map(Self)
                    .ok_or_else(|| {
                        RotaError::Validation(format!(
                            concat!("invalid ", $what, " id '{}': expected ", $prefix, "<number> (e.g., ", $prefix, "1)"),
                            s
                        ))
                    })
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.to_string()
            }
        }

        impl TryFrom<String> for $name {
            type Error = RotaError;

            fn try_from(s: String) -> Result<Self> {
                s.parse()
            }
        }
    };
}

sequential_id!(AgentId, "A", AGENT_ID_REGEX, "agent");
sequential_id!(IssueId, "I", ISSUE_ID_REGEX, "issue");

/// Monotonic allocator for sequential ids.
///
/// Counters only move forward, so ids stay unique even if entities are
/// ever removed from a store.
#[derive(Debug, Clone, Default)]
pub struct IdSequence {
    last: u64,
}

impl IdSequence {
    /// A sequence whose next allocation is `last + 1`.
    pub fn after(last: u64) -> Self {
        Self { last }
    }

    /// Allocate the next number (first call returns 1).
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u64 {
        self.last += 1;
        self.last
    }
}
