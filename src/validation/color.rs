use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{dedup_preserving_order, Category, Checker};
use crate::tokens::RuleSet;

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#[0-9A-Fa-f]{6}|#[0-9A-Fa-f]{3}").expect("valid hex color pattern"));

static PX_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[0-9]+px\b").expect("valid pixel literal pattern"));

/// Flags hex colors and pixel literals that are not design tokens.
#[derive(Debug, Clone)]
pub struct ColorSpacingChecker {
    rules: Arc<RuleSet>,
}

impl ColorSpacingChecker {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    fn color_issues<'a>(&'a self, css: &'a str) -> impl Iterator<Item = String> + 'a {
        HEX_COLOR
            .find_iter(css)
            .map(|m| m.as_str().to_uppercase())
            .filter(|color| !self.rules.colors.contains(color))
            .map(|color| format!("unapproved color '{color}' is used"))
    }

    fn spacing_issues<'a>(&'a self, css: &'a str) -> impl Iterator<Item = String> + 'a {
        PX_LITERAL
            .find_iter(css)
            .map(|m| m.as_str())
            .filter(|spacing| !self.rules.spacing.contains(*spacing))
            .map(|spacing| format!("unapproved spacing '{spacing}' is used"))
    }
}

impl Checker for ColorSpacingChecker {
    fn category(&self) -> Category {
        Category::Color
    }

    fn validate(&self, css: &str) -> Vec<String> {
        let issues: Vec<String> = self
            .color_issues(css)
            .chain(self.spacing_issues(css))
            .collect();
        debug!(count = issues.len(), "color/spacing check finished");
        dedup_preserving_order(issues)
    }
}
