use std::sync::Arc;

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{dedup_preserving_order, join_values, Category, Checker};
use crate::tokens::{RuleSet, TypeStyle, TypographyTokens};

static FONT_FAMILY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"font-family:\s*([^;]+);").expect("valid font-family pattern"));

static FONT_SIZE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"font-size:\s*([0-9]+(?:\.[0-9]+)?(?:px|rem|em))").expect("valid font-size pattern")
});

static FONT_WEIGHT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"font-weight:\s*([0-9]+|normal|bold)").expect("valid font-weight pattern"));

static LINE_HEIGHT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"line-height:\s*([^;]+);").expect("valid line-height pattern"));

static LETTER_SPACING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"letter-spacing:\s*([^;]+);").expect("valid letter-spacing pattern"));

static UNITLESS_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("valid number pattern"));

const FAMILY_KEYWORDS: [&str; 3] = ["inherit", "initial", "unset"];
const WEIGHT_KEYWORDS: [&str; 3] = ["normal", "bold", "inherit"];
const LINE_HEIGHT_KEYWORDS: [&str; 3] = ["normal", "inherit", "initial"];
const LETTER_SPACING_KEYWORDS: [&str; 4] = ["normal", "inherit", "initial", "0"];

/// Checks font-family, font-size, font-weight, line-height and letter-spacing
/// declarations against the typography tokens.
///
/// `rem`/`em` font sizes and unitless line-heights are accepted without a
/// table lookup.
#[derive(Debug, Clone)]
pub struct TypographyChecker {
    rules: Arc<RuleSet>,
}

impl TypographyChecker {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    fn typography(&self) -> &TypographyTokens {
        &self.rules.typography
    }

    fn check_font_families(&self, css: &str, issues: &mut Vec<String>) {
        let families = &self.typography().font_family;
        let approved: Vec<&str> = [families.primary.as_str(), families.mono.as_str()]
            .into_iter()
            .filter(|name| !name.is_empty())
            .chain(FAMILY_KEYWORDS)
            .collect();

        for caps in FONT_FAMILY.captures_iter(css) {
            let family = caps[1].trim().replace(['\'', '"'], "");
            if !approved.iter().any(|name| family.contains(name)) {
                issues.push(format!("unapproved font-family '{family}' is used"));
            }
        }
    }

    fn check_font_sizes(&self, css: &str, issues: &mut Vec<String>) {
        let approved = collect(self.typography(), |style| style.font_size.as_deref());

        for caps in FONT_SIZE.captures_iter(css) {
            let size = &caps[1];
            // Relative units are not verified against the table.
            if !size.ends_with("px") || approved.contains(size) {
                continue;
            }
            issues.push(format!(
                "unapproved font-size '{size}' is used. approved sizes: {}",
                join_values(&approved)
            ));
        }
    }

    fn check_font_weights(&self, css: &str, issues: &mut Vec<String>) {
        let weights = &self.typography().font_weight;
        let approved: Vec<String> = [weights.normal, weights.medium, weights.bold]
            .iter()
            .map(u32::to_string)
            .chain(WEIGHT_KEYWORDS.iter().map(|kw| kw.to_string()))
            .collect();

        for caps in FONT_WEIGHT.captures_iter(css) {
            let weight = &caps[1];
            if !approved.iter().any(|valid| valid == weight) {
                issues.push(format!("unapproved font-weight '{weight}' is used"));
            }
        }
    }

    fn check_line_heights(&self, css: &str, issues: &mut Vec<String>) {
        let approved = collect(self.typography(), |style| style.line_height.as_deref());

        for caps in LINE_HEIGHT.captures_iter(css) {
            let line_height = caps[1].trim();
            if line_height.is_empty()
                || approved.contains(line_height)
                || UNITLESS_NUMBER.is_match(line_height)
                || LINE_HEIGHT_KEYWORDS.contains(&line_height)
            {
                continue;
            }
            issues.push(format!("unapproved line-height '{line_height}' is used"));
        }
    }

    fn check_letter_spacings(&self, css: &str, issues: &mut Vec<String>) {
        let approved = collect(self.typography(), |style| style.letter_spacing.as_deref());

        for caps in LETTER_SPACING.captures_iter(css) {
            let spacing = caps[1].trim();
            if spacing.is_empty()
                || approved.contains(spacing)
                || LETTER_SPACING_KEYWORDS.contains(&spacing)
            {
                continue;
            }
            issues.push(format!("unapproved letter-spacing '{spacing}' is used"));
        }
    }
}

impl Checker for TypographyChecker {
    fn category(&self) -> Category {
        Category::Typography
    }

    fn validate(&self, css: &str) -> Vec<String> {
        let mut issues = Vec::new();
        self.check_font_families(css, &mut issues);
        self.check_font_sizes(css, &mut issues);
        self.check_font_weights(css, &mut issues);
        self.check_line_heights(css, &mut issues);
        self.check_letter_spacings(css, &mut issues);
        debug!(count = issues.len(), "typography check finished");
        dedup_preserving_order(issues)
    }
}

/// Gathers one attribute across every type style, in document order.
fn collect<'a, F>(typography: &'a TypographyTokens, attribute: F) -> IndexSet<&'a str>
where
    F: Fn(&'a TypeStyle) -> Option<&'a str>,
{
    typography
        .styles()
        .filter_map(attribute)
        .filter(|value| !value.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::DesignTokens;
    use serde_json::json;

    fn checker() -> TypographyChecker {
        let tokens: DesignTokens = serde_json::from_value(json!({
            "typography": {
                "fontFamily": {"primary": "Noto Sans JP", "mono": "monospace"},
                "fontWeight": {"normal": 400, "medium": 500, "bold": 700},
                "display": {"fontSize": "45px", "lineHeight": "1.4", "fontWeight": 700, "letterSpacing": "0"},
                "standard": {
                    "large": {"fontSize": "28px", "lineHeight": "150%", "fontWeight": 700, "letterSpacing": "0.01em"},
                    "base": {"fontSize": "16px", "lineHeight": "1.7", "fontWeight": 400, "letterSpacing": "0.02em"}
                },
                "dense": {"base": {"fontSize": "14px", "lineHeight": "1.5", "fontWeight": 400, "letterSpacing": "0.01em"}},
                "oneline": {},
                "mono": {},
                "link": {}
            }
        }))
        .unwrap();
        TypographyChecker::new(Arc::new(RuleSet::from_tokens(&tokens)))
    }

    #[test]
    fn approved_declarations_pass() {
        let css = r#"
            .title {
                font-family: "Noto Sans JP", sans-serif;
                font-size: 28px;
                font-weight: 700;
                line-height: 150%;
                letter-spacing: 0.01em;
            }
        "#;
        assert!(checker().validate(css).is_empty());
    }

    #[test]
    fn font_family_must_embed_an_approved_name() {
        assert!(checker().validate("font-family: 'Helvetica', Noto Sans JP;").is_empty());
        assert!(checker().validate("font-family: inherit;").is_empty());
        assert_eq!(
            checker().validate("font-family: 'Comic Sans MS';"),
            vec!["unapproved font-family 'Comic Sans MS' is used"]
        );
    }

    #[test]
    fn px_font_sizes_list_the_approved_sizes() {
        assert_eq!(
            checker().validate("font-size: 13px;"),
            vec!["unapproved font-size '13px' is used. approved sizes: 45px, 28px, 16px, 14px"]
        );
    }

    #[test]
    fn relative_font_sizes_are_not_verified() {
        assert!(checker().validate("font-size: 1.3rem; font-size: 0.9em;").is_empty());
    }

    #[test]
    fn font_weight_accepts_token_values_and_keywords() {
        assert!(checker()
            .validate("font-weight: 500; font-weight: bold; font-weight: normal;")
            .is_empty());
        assert_eq!(
            checker().validate("font-weight: 600;"),
            vec!["unapproved font-weight '600' is used"]
        );
    }

    #[test]
    fn unitless_line_heights_bypass_the_table() {
        assert!(checker().validate("line-height: 2.25; line-height: normal;").is_empty());
        assert_eq!(
            checker().validate("line-height: 22px;"),
            vec!["unapproved line-height '22px' is used"]
        );
    }

    #[test]
    fn letter_spacing_accepts_zero_and_tokens() {
        assert!(checker()
            .validate("letter-spacing: 0; letter-spacing: 0.02em; letter-spacing: normal;")
            .is_empty());
        assert_eq!(
            checker().validate("letter-spacing: 1px;"),
            vec!["unapproved letter-spacing '1px' is used"]
        );
    }

    #[test]
    fn empty_font_family_is_flagged() {
        assert_eq!(
            checker().validate("font-family: '';"),
            vec!["unapproved font-family '' is used"]
        );
    }

    #[test]
    fn empty_style_values_are_not_approved_sizes() {
        let tokens: DesignTokens = serde_json::from_value(json!({
            "typography": {
                "display": {"fontSize": "", "lineHeight": ""},
                "standard": {"base": {"fontSize": "16px"}}
            }
        }))
        .unwrap();
        let typography = TypographyChecker::new(Arc::new(RuleSet::from_tokens(&tokens)));
        assert_eq!(
            typography.validate("font-size: 13px;"),
            vec!["unapproved font-size '13px' is used. approved sizes: 16px"]
        );
    }

    #[test]
    fn repeated_violations_collapse() {
        let css = "a { font-weight: 600; } b { font-weight: 600; }";
        assert_eq!(checker().validate(css).len(), 1);
    }
}
