//! Issue filter for listing queries.
//!
//! Filters are built from string key/value pairs. Category and status values
//! are parsed strictly: an unknown value is an `InvalidFilter` error rather
//! than a filter that silently matches nothing. Issue creation, by contrast,
//! maps unknown types to `OTHER`; the asymmetry is intentional, since a
//! typo in a query should be reported while a typo in an incoming ticket
//! should not lose the ticket.
//!
//! | Key                  | Matches                          |
//! |----------------------|----------------------------------|
//! | `email`, `contact`   | requester email, case-insensitive |
//! | `type`, `category`   | issue category                   |
//! | `issueId`, `id`      | issue id, case-insensitive       |
//! | `status`             | issue status                     |
//!
//! Blank values are ignored. Unknown keys are rejected.

use crate::category::Category;
use crate::error::{Result, RotaError};
use crate::issue::{Issue, IssueStatus};
use serde::{Deserialize, Serialize};

/// Conjunction of optional predicates over issues. The default matches all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<IssueStatus>,
}

impl IssueFilter {
    /// A filter that matches every issue.
    pub fn all() -> Self {
        Self::default()
    }

    /// Build a filter from key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filter = Self::default();

        for (key, value) in pairs {
            let key = key.as_ref();
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }

            match key {
                "email" | "contact" => filter.email = Some(value.to_string()),
                "type" | "category" => {
                    let category = value.parse::<Category>().map_err(|_| {
                        RotaError::InvalidFilter(format!("unknown issue type '{}'", value))
                    })?;
                    filter.category = Some(category);
                }
                "issueId" | "id" => filter.issue_id = Some(value.to_string()),
                "status" => {
                    let status = value.parse::<IssueStatus>().map_err(|_| {
                        RotaError::InvalidFilter(format!("unknown issue status '{}'", value))
                    })?;
                    filter.status = Some(status);
                }
                other => {
                    return Err(RotaError::InvalidFilter(format!(
                        "unknown filter key '{}' (expected email, type, issueId, or status)",
                        other
                    )));
                }
            }
        }

        Ok(filter)
    }

    /// Whether every set predicate holds for `issue`.
    pub fn matches(&self, issue: &Issue) -> bool {
        self.email
            .as_ref()
            .is_none_or(|email| issue.email.eq_ignore_ascii_case(email))
            && self.category.is_none_or(|category| issue.category == category)
            && self
                .issue_id
                .as_ref()
                .is_none_or(|id| issue.id.to_string().eq_ignore_ascii_case(id))
            && self.status.is_none_or(|status| issue.status() == status)
    }
}
