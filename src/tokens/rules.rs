use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

use super::model::{DesignTokens, GridTokens, TypographyTokens};

/// Whitelists derived once from a [`DesignTokens`] document.
///
/// A rule set is never mutated after construction; checkers hold it behind an
/// `Arc` and any number of validations may read it concurrently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    /// Uppercase hex colors.
    pub colors: HashSet<String>,
    pub spacing: HashSet<String>,
    pub typography: TypographyTokens,
    /// Exact box-shadow values, in document order.
    pub elevation: IndexSet<String>,
    /// Border-radius literals, in document order.
    pub border_radius: IndexSet<String>,
    pub breakpoints: IndexMap<String, String>,
    pub grid: GridTokens,
}

impl RuleSet {
    pub fn from_tokens(tokens: &DesignTokens) -> Self {
        Self {
            colors: collect_colors(&tokens.colors),
            spacing: tokens.spacing.values().cloned().collect(),
            typography: tokens.typography.clone(),
            elevation: tokens.elevation.values().cloned().collect(),
            border_radius: tokens.border_radius.values().cloned().collect(),
            breakpoints: tokens.breakpoints.clone(),
            grid: tokens.grid.clone(),
        }
    }

    /// Builds the color/spacing part of a rule set from literal lists.
    pub fn with_colors_and_spacing<C, S>(colors: C, spacing: S) -> Self
    where
        C: IntoIterator,
        C::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            colors: colors
                .into_iter()
                .map(|color| color.as_ref().to_uppercase())
                .collect(),
            spacing: spacing.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Numeric pixel values of every breakpoint that parses as `<N>px`.
    pub fn breakpoint_values(&self) -> Vec<i64> {
        self.breakpoints
            .values()
            .filter_map(|value| parse_px(value))
            .collect()
    }
}

/// Recursively collects every string starting with `#` in a color tree,
/// normalized to uppercase.
pub fn collect_colors(tree: &Value) -> HashSet<String> {
    let mut colors = HashSet::new();
    walk_colors(tree, &mut colors);
    colors
}

fn walk_colors(node: &Value, colors: &mut HashSet<String>) {
    match node {
        Value::String(s) if s.starts_with('#') => {
            colors.insert(s.to_uppercase());
        }
        Value::Object(map) => map.values().for_each(|child| walk_colors(child, colors)),
        Value::Array(items) => items.iter().for_each(|child| walk_colors(child, colors)),
        _ => {}
    }
}

/// Parses the leading integer of a pixel literal (`"1024px"` -> 1024).
///
/// Like a lenient integer parse, trailing units are ignored; a value without
/// leading digits yields `None`. Out-of-range digits saturate to
/// `i64::MAX`/`i64::MIN`.
pub fn parse_px(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    let digits_end = trimmed
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || (*i == 0 && *c == '-')))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    let digits = &trimmed[..digits_end];
    match digits.parse() {
        Ok(number) => Some(number),
        Err(_) if digits.trim_start_matches('-').is_empty() => None,
        Err(_) if digits.starts_with('-') => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}
