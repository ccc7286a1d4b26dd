//! Design-token checkers.
//!
//! Each checker is a lexical scanner: it treats CSS as flat text, finds
//! property patterns anywhere (comments and strings included) and compares
//! the captured literals against a [`RuleSet`](crate::tokens::RuleSet).
//! Checkers never fail; text that does not match a pattern is ignored.

pub mod accessibility;
pub mod color;
pub mod elevation;
pub mod layout;
pub mod typography;

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

// Re-exports for concise imports
pub use accessibility::AccessibilityChecker;
pub use color::ColorSpacingChecker;
pub use elevation::ElevationChecker;
pub use layout::{Breakpoint, LayoutChecker};
pub use typography::TypographyChecker;

/// The report bucket a checker's violations land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Color,
    Typography,
    Elevation,
    Layout,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Color => "color",
            Category::Typography => "typography",
            Category::Elevation => "elevation",
            Category::Layout => "layout",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation pass over CSS text.
pub trait Checker: Send + Sync {
    fn category(&self) -> Category;

    /// Returns the unique violations found in `css`, in first-seen order.
    fn validate(&self, css: &str) -> Vec<String>;
}

/// Removes repeated messages, keeping the first occurrence of each.
pub fn dedup_preserving_order(issues: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    issues
        .into_iter()
        .filter(|issue| seen.insert(issue.clone()))
        .collect()
}

/// Joins approved values for inclusion in a message.
pub(crate) fn join_values<I, T>(values: I) -> String
where
    I: IntoIterator<Item = T>,
    T: fmt::Display,
{
    values
        .into_iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_keeps_first_seen_order() {
        let issues = vec![
            "b".to_string(),
            "a".to_string(),
            "b".to_string(),
            "c".to_string(),
            "a".to_string(),
        ];
        assert_eq!(dedup_preserving_order(issues), vec!["b", "a", "c"]);
    }

    #[test]
    fn categories_serialize_lowercase() {
        let json = serde_json::to_string(&Category::Typography).unwrap();
        assert_eq!(json, "\"typography\"");
        assert_eq!(Category::Layout.to_string(), "layout");
    }
}
