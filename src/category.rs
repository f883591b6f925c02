//! Work-type categories shared by agent expertise and issue types.
//!
//! Two parsers are provided on purpose:
//! - [`Category::resolve`] is total. Unknown names fall back to
//!   [`Category::Other`] with a warning. Issue creation uses it.
//! - [`str::parse`] (`FromStr`) is strict and errors on unknown names. Filters,
//!   agent expertise, and config use it.

use crate::error::{Result, RotaError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical suffix shared by most category names.
const RELATED_SUFFIX: &str = "_RELATED";

/// A work-type category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    #[serde(rename = "PAYMENT_RELATED")]
    Payment,
    #[serde(rename = "MUTUAL_FUND_RELATED")]
    MutualFund,
    #[serde(rename = "GOLD_RELATED")]
    Gold,
    #[serde(rename = "INSURANCE_RELATED")]
    Insurance,
    Other,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; 5] = [
        Category::Payment,
        Category::MutualFund,
        Category::Gold,
        Category::Insurance,
        Category::Other,
    ];

    /// Canonical upper-case name (e.g., `PAYMENT_RELATED`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Payment => "PAYMENT_RELATED",
            Category::MutualFund => "MUTUAL_FUND_RELATED",
            Category::Gold => "GOLD_RELATED",
            Category::Insurance => "INSURANCE_RELATED",
            Category::Other => "OTHER",
        }
    }

    /// Map free text to a category, falling back to [`Category::Other`].
    ///
    /// Never fails. A warning is logged when the fallback is taken so that
    /// misspelled types surface in the logs instead of silently piling up
    /// under `OTHER`.
    pub fn resolve(input: &str) -> Category {
        match Self::lookup(input) {
            Some(category) => category,
            None => {
                tracing::warn!(input, "unknown issue type, filing under OTHER");
                Category::Other
            }
        }
    }

    /// Normalize and match a name: case-insensitive, spaces and hyphens
    /// read as underscores, `_RELATED` suffix optional.
    fn lookup(input: &str) -> Option<Category> {
        let normalized: String = input
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();
        if normalized.is_empty() {
            return None;
        }

        Self::ALL.into_iter().find(|category| {
            let name = category.as_str();
            name == normalized
                || name
                    .strip_suffix(RELATED_SUFFIX)
                    .is_some_and(|short| short == normalized)
        })
    }
}

impl FromStr for Category {
    type Err = RotaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::lookup(s).ok_or_else(|| {
            RotaError::Validation(format!(
                "unknown category '{}' (expected one of: {})",
                s,
                Self::ALL.map(|c| c.as_str()).join(", ")
            ))
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
