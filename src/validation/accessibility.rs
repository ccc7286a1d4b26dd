//! Basic accessibility checks over HTML text.
//!
//! These are substring heuristics, not an audit; a dedicated tool such as
//! axe-core is needed for real coverage.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::dedup_preserving_order;

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"<h([1-6])").expect("valid heading pattern"));

static EMPTY_BUTTON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<button[^>]*>\s*</button>").expect("valid button pattern"));

static EMPTY_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<a[^>]*>\s*</a>").expect("valid link pattern"));

pub const MISSING_ALT: &str = "image has no alt attribute";
pub const SKIPPED_HEADING: &str = "heading levels do not follow a proper hierarchy";
pub const MISSING_LABEL: &str = "form control has no label";
pub const EMPTY_CONTROL: &str = "button or link has no text";

#[derive(Debug, Clone, Copy, Default)]
pub struct AccessibilityChecker;

impl AccessibilityChecker {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, html: &str) -> Vec<String> {
        let mut issues = Vec::new();

        if html.contains("<img") && !html.contains("alt=") {
            issues.push(MISSING_ALT.to_string());
        }

        let levels: Vec<u8> = HEADING
            .captures_iter(html)
            .filter_map(|caps| caps[1].parse().ok())
            .collect();
        if levels.windows(2).any(|pair| pair[1] > pair[0] + 1) {
            issues.push(SKIPPED_HEADING.to_string());
        }

        if html.contains("<input") && !html.contains("<label") {
            issues.push(MISSING_LABEL.to_string());
        }

        if EMPTY_BUTTON.is_match(html) || EMPTY_LINK.is_match(html) {
            issues.push(EMPTY_CONTROL.to_string());
        }

        debug!(count = issues.len(), "accessibility check finished");
        dedup_preserving_order(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_markup_passes() {
        let html = r#"
            <h1>Title</h1><h2>Section</h2><h3>Sub</h3><h2>Next</h2>
            <img src="a.png" alt="A">
            <label for="q">Query</label><input id="q">
            <button>Send</button><a href="/">Home</a>
        "#;
        assert!(AccessibilityChecker::new().validate(html).is_empty());
    }

    #[test]
    fn each_heuristic_reports_once() {
        let html = r#"<h1>a</h1><h3>b</h3><h5>c</h5><img src="x.png"><input><button> </button>"#;
        assert_eq!(
            AccessibilityChecker::new().validate(html),
            vec![MISSING_ALT, SKIPPED_HEADING, MISSING_LABEL, EMPTY_CONTROL]
        );
    }

    #[test]
    fn empty_links_are_flagged() {
        let issues = AccessibilityChecker::new().validate(r#"<a href="/x"></a>"#);
        assert_eq!(issues, vec![EMPTY_CONTROL]);
    }
}
