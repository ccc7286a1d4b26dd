use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{dedup_preserving_order, join_values, Category, Checker};
use crate::tokens::RuleSet;

static BOX_SHADOW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"box-shadow:\s*([^;]+);").expect("valid box-shadow pattern"));

static BORDER_RADIUS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"border-radius:\s*([^;]+);").expect("valid border-radius pattern"));

static DROP_SHADOW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"filter:\s*drop-shadow\(([^)]+)\)").expect("valid drop-shadow pattern")
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

const SHADOW_KEYWORDS: [&str; 4] = ["none", "initial", "inherit", "unset"];
const RADIUS_KEYWORDS: [&str; 3] = ["initial", "inherit", "unset"];

/// Checks box-shadow and border-radius against the elevation tokens and
/// discourages `filter: drop-shadow(...)`.
#[derive(Debug, Clone)]
pub struct ElevationChecker {
    rules: Arc<RuleSet>,
}

impl ElevationChecker {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    fn check_box_shadows(&self, css: &str, issues: &mut Vec<String>) {
        let approved: Vec<String> = self
            .rules
            .elevation
            .iter()
            .map(|shadow| normalize_whitespace(shadow))
            .collect();

        for caps in BOX_SHADOW.captures_iter(css) {
            let shadow = caps[1].trim();
            if shadow.is_empty() || SHADOW_KEYWORDS.contains(&shadow) {
                continue;
            }
            let normalized = normalize_whitespace(shadow);
            if !approved.iter().any(|valid| *valid == normalized) {
                issues.push(format!("unapproved box-shadow '{shadow}' is used"));
            }
        }
    }

    fn check_border_radii(&self, css: &str, issues: &mut Vec<String>) {
        let approved = &self.rules.border_radius;

        for caps in BORDER_RADIUS.captures_iter(css) {
            let radius = caps[1].trim();
            if radius.is_empty() || approved.contains(radius) || RADIUS_KEYWORDS.contains(&radius) {
                continue;
            }
            // Per-corner shorthand such as `8px 8px 0 0`.
            let every_corner_approved = WHITESPACE
                .split(radius)
                .all(|corner| corner == "0" || approved.contains(corner));
            if !every_corner_approved {
                issues.push(format!(
                    "unapproved border-radius '{radius}' is used. approved values: {}",
                    join_values(approved)
                ));
            }
        }
    }

    fn check_drop_shadows(&self, css: &str, issues: &mut Vec<String>) {
        for caps in DROP_SHADOW.captures_iter(css) {
            let argument = caps[1].trim();
            if argument.is_empty() {
                continue;
            }
            issues.push(format!(
                "drop-shadow is discouraged; use box-shadow instead: '{argument}'"
            ));
        }
    }
}

impl Checker for ElevationChecker {
    fn category(&self) -> Category {
        Category::Elevation
    }

    fn validate(&self, css: &str) -> Vec<String> {
        let mut issues = Vec::new();
        self.check_box_shadows(css, &mut issues);
        self.check_border_radii(css, &mut issues);
        self.check_drop_shadows(css, &mut issues);
        debug!(count = issues.len(), "elevation check finished");
        dedup_preserving_order(issues)
    }
}

/// Collapses whitespace runs to single spaces and trims.
fn normalize_whitespace(value: &str) -> String {
    WHITESPACE.replace_all(value, " ").trim().to_string()
}
