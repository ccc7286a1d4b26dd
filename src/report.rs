//! Compliance reports: the merged, categorized output of every checker.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::tokens::RuleSet;
use crate::validation::{
    AccessibilityChecker, Category, Checker, ColorSpacingChecker, ElevationChecker, LayoutChecker,
    TypographyChecker,
};

pub const UNKNOWN_COMPONENT: &str = "Unknown";

/// The four CSS checkers, sharing one rule set.
pub struct ValidationSuite {
    checkers: Vec<Box<dyn Checker>>,
}

impl ValidationSuite {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self {
            checkers: vec![
                Box::new(ColorSpacingChecker::new(Arc::clone(&rules))),
                Box::new(TypographyChecker::new(Arc::clone(&rules))),
                Box::new(ElevationChecker::new(Arc::clone(&rules))),
                Box::new(LayoutChecker::new(rules)),
            ],
        }
    }

    /// Runs every checker over `css` and assembles the report.
    pub fn evaluate(&self, css: &str, component: Option<&str>) -> ComplianceReport {
        let mut results = ValidationResults::default();
        for checker in &self.checkers {
            let issues = checker.validate(css);
            *results.slot_mut(checker.category()) = CategoryResult::from_issues(issues);
        }
        let report = ComplianceReport::new(component, results);
        info!(
            component = %report.component,
            total_issues = report.total_issues,
            "design token validation finished"
        );
        report
    }
}

/// Outcome of one checker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryResult {
    pub passed: bool,
    pub issues: Vec<String>,
}

impl CategoryResult {
    pub fn from_issues(issues: Vec<String>) -> Self {
        Self {
            passed: issues.is_empty(),
            issues,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResults {
    pub color: CategoryResult,
    pub typography: CategoryResult,
    pub elevation: CategoryResult,
    pub layout: CategoryResult,
}

impl Default for ValidationResults {
    fn default() -> Self {
        let passed = CategoryResult::from_issues(Vec::new());
        Self {
            color: passed.clone(),
            typography: passed.clone(),
            elevation: passed.clone(),
            layout: passed,
        }
    }
}

impl ValidationResults {
    pub fn get(&self, category: Category) -> &CategoryResult {
        match category {
            Category::Color => &self.color,
            Category::Typography => &self.typography,
            Category::Elevation => &self.elevation,
            Category::Layout => &self.layout,
        }
    }

    fn slot_mut(&mut self, category: Category) -> &mut CategoryResult {
        match category {
            Category::Color => &mut self.color,
            Category::Typography => &mut self.typography,
            Category::Elevation => &mut self.elevation,
            Category::Layout => &mut self.layout,
        }
    }

    /// Every violation tagged with its category, in report order.
    pub fn tagged(&self) -> impl Iterator<Item = (Category, &str)> {
        [
            Category::Color,
            Category::Typography,
            Category::Elevation,
            Category::Layout,
        ]
        .into_iter()
        .flat_map(move |category| {
            self.get(category)
                .issues
                .iter()
                .map(move |issue| (category, issue.as_str()))
        })
    }
}

/// The JSON payload returned by `validate_design_tokens`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceReport {
    pub component: String,
    pub is_compliant: bool,
    pub validation_results: ValidationResults,
    pub summary: String,
    pub total_issues: usize,
}

impl ComplianceReport {
    pub fn new(component: Option<&str>, validation_results: ValidationResults) -> Self {
        let total_issues = validation_results.tagged().count();
        let summary = if total_issues == 0 {
            "fully compliant with design tokens ✓".to_string()
        } else {
            format!("{total_issues} compliance violation(s) found")
        };
        Self {
            component: component_name(component),
            is_compliant: total_issues == 0,
            validation_results,
            summary,
            total_issues,
        }
    }
}

/// The JSON payload returned by `validate_accessibility`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessibilityReport {
    pub component: String,
    pub is_accessible: bool,
    pub issues: Vec<String>,
    pub summary: String,
    pub note: String,
}

impl AccessibilityReport {
    pub fn evaluate(html: &str, component: Option<&str>) -> Self {
        let issues = AccessibilityChecker::new().validate(html);
        let summary = if issues.is_empty() {
            "meets the basic accessibility checks ✓".to_string()
        } else {
            format!("{} accessibility issue(s) found", issues.len())
        };
        Self {
            component: component_name(component),
            is_accessible: issues.is_empty(),
            issues,
            summary,
            note: "only basic checks are performed; use a dedicated tool such as axe-core for a full audit"
                .to_string(),
        }
    }
}

fn component_name(component: Option<&str>) -> String {
    match component {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => UNKNOWN_COMPONENT.to_string(),
    }
}
