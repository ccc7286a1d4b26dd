use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use super::{dedup_preserving_order, join_values, Category, Checker};
use crate::tokens::{parse_px, RuleSet};

static MEDIA_QUERY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@media[^{]+\((?:min|max)-width:\s*([0-9]+)px\)").expect("valid media query pattern")
});

static GRID_COLUMNS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"grid-template-columns:\s*repeat\(([0-9]+),").expect("valid grid columns pattern")
});

static GAP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:gap|grid-gap|column-gap|row-gap):\s*([0-9]+px)").expect("valid gap pattern")
});

static MARGIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"margin(?:-(?:left|right))?\s*:\s*([0-9]+px)").expect("valid margin pattern")
});

static MAX_WIDTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"max-width:\s*([0-9]+)px").expect("valid max-width pattern"));

/// Allowed distance, in pixels, between a value and a breakpoint.
const BREAKPOINT_TOLERANCE: u64 = 1;

/// Margins below this are treated as component spacing and ignored.
const CONTAINER_MARGIN_FLOOR: i64 = 16;

/// Max-widths at or below this are not treated as container widths.
const CONTAINER_MAX_WIDTH_FLOOR: i64 = 600;

/// Breakpoint minus its container margin: tablet, desktop, wide and full.
const CONTAINER_WIDTHS: [i64; 4] = [1024 - 64, 1280 - 128, 1440 - 160, 1920 - 240];

/// A named breakpoint and its literal value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breakpoint {
    pub name: String,
    pub value: String,
}

/// Checks media-query breakpoints, grid columns, gaps, container margins and
/// max-widths against the breakpoint and grid tokens.
#[derive(Debug, Clone)]
pub struct LayoutChecker {
    rules: Arc<RuleSet>,
}

impl LayoutChecker {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    /// The breakpoint numerically closest to `value`. Ties keep the first
    /// breakpoint in document order; an empty rule set yields `unknown`/`0`.
    pub fn closest_breakpoint(&self, value: i64) -> Breakpoint {
        self.rules
            .breakpoints
            .iter()
            .filter_map(|(name, literal)| {
                parse_px(literal).map(|px| (name, literal, px.abs_diff(value)))
            })
            .fold(None, |best: Option<(&String, &String, u64)>, candidate| match best {
                Some(current) if current.2 <= candidate.2 => Some(current),
                _ => Some(candidate),
            })
            .map(|(name, literal, _)| Breakpoint {
                name: name.clone(),
                value: literal.clone(),
            })
            .unwrap_or_else(|| Breakpoint {
                name: "unknown".to_string(),
                value: "0".to_string(),
            })
    }

    fn near_breakpoint(breakpoints: &[i64], value: i64) -> bool {
        breakpoints
            .iter()
            .any(|bp| value.abs_diff(*bp) <= BREAKPOINT_TOLERANCE)
    }

    fn check_media_queries(&self, css: &str, breakpoints: &[i64], issues: &mut Vec<String>) {
        for caps in MEDIA_QUERY.captures_iter(css) {
            let Some(width) = parse_px(&caps[1]) else {
                continue;
            };
            if Self::near_breakpoint(breakpoints, width) {
                continue;
            }
            let closest = self.closest_breakpoint(width);
            issues.push(format!(
                "non-standard breakpoint '{width}px' is used. nearest standard value: {} ({})",
                closest.name, closest.value
            ));
        }
    }

    fn check_grid_columns(&self, css: &str, issues: &mut Vec<String>) {
        let approved: Vec<u32> = self.rules.grid.columns.values().copied().collect();

        for caps in GRID_COLUMNS.captures_iter(css) {
            let columns = &caps[1];
            // A count too large for u32 can never be approved.
            let approved_count = columns
                .parse::<u32>()
                .is_ok_and(|count| approved.contains(&count));
            if !approved_count {
                issues.push(format!(
                    "non-standard grid column count '{columns}' is used. standard values: {}",
                    join_values(&approved)
                ));
            }
        }
    }

    fn check_gaps(&self, css: &str, issues: &mut Vec<String>) {
        let approved: Vec<&String> = self.rules.grid.gap.values().collect();

        for caps in GAP.captures_iter(css) {
            let gap = &caps[1];
            if !approved.iter().any(|valid| valid.as_str() == gap) {
                issues.push(format!(
                    "non-standard grid gap '{gap}' is used. standard values: {}",
                    join_values(&approved)
                ));
            }
        }
    }

    fn check_margins(&self, css: &str, issues: &mut Vec<String>) {
        let approved: Vec<&String> = self.rules.grid.margin.values().collect();

        for caps in MARGIN.captures_iter(css) {
            let margin = &caps[1];
            if margin == "0" || approved.iter().any(|valid| valid.as_str() == margin) {
                continue;
            }
            // Only container-sized margins are policed.
            let value = parse_px(margin).unwrap_or(i64::MAX);
            if value >= CONTAINER_MARGIN_FLOOR {
                issues.push(format!(
                    "non-standard margin '{margin}' is used. standard container margins: {}",
                    join_values(&approved)
                ));
            }
        }
    }

    fn check_max_widths(&self, css: &str, breakpoints: &[i64], issues: &mut Vec<String>) {
        for caps in MAX_WIDTH.captures_iter(css) {
            let Some(width) = parse_px(&caps[1]) else {
                continue;
            };
            let matches_breakpoint = Self::near_breakpoint(breakpoints, width);
            let matches_container = Self::near_breakpoint(&CONTAINER_WIDTHS, width);
            if !matches_breakpoint && !matches_container && width > CONTAINER_MAX_WIDTH_FLOOR {
                issues.push(format!(
                    "non-standard max-width '{width}px' is used. align it with a breakpoint or container width"
                ));
            }
        }
    }
}

impl Checker for LayoutChecker {
    fn category(&self) -> Category {
        Category::Layout
    }

    fn validate(&self, css: &str) -> Vec<String> {
        let breakpoints = self.rules.breakpoint_values();
        let mut issues = Vec::new();
        self.check_media_queries(css, &breakpoints, &mut issues);
        self.check_grid_columns(css, &mut issues);
        self.check_gaps(css, &mut issues);
        self.check_margins(css, &mut issues);
        self.check_max_widths(css, &breakpoints, &mut issues);
        debug!(count = issues.len(), "layout check finished");
        dedup_preserving_order(issues)
    }
}
