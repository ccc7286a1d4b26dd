//! Handles all user-facing output for the CLI.
//!
//! This module is responsible for colorizing reports and generating JSON. By
//! centralizing output logic here, every command prints the same way.

use std::io;

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::report::{AccessibilityReport, ComplianceReport};
use crate::validation::Category;

const CATEGORIES: [Category; 4] = [
    Category::Color,
    Category::Typography,
    Category::Elevation,
    Category::Layout,
];

/// Prints any serializable payload as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints a compliance report grouped by category.
pub fn print_compliance(report: &ComplianceReport) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    write_compliance(&mut stdout, report)
}

/// Prints an accessibility report.
pub fn print_accessibility(report: &AccessibilityReport) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    write_accessibility(&mut stdout, report)
}

pub fn write_compliance<W: WriteColor>(out: &mut W, report: &ComplianceReport) -> io::Result<()> {
    write_heading(out, &report.component)?;
    for category in CATEGORIES {
        let result = report.validation_results.get(category);
        write_status(out, result.passed, category.as_str())?;
        for issue in &result.issues {
            writeln!(out, "    • {issue}")?;
        }
    }
    writeln!(out)?;
    write_summary(out, report.is_compliant, &report.summary)
}

pub fn write_accessibility<W: WriteColor>(
    out: &mut W,
    report: &AccessibilityReport,
) -> io::Result<()> {
    write_heading(out, &report.component)?;
    for issue in &report.issues {
        writeln!(out, "    • {issue}")?;
    }
    writeln!(out)?;
    write_summary(out, report.is_accessible, &report.summary)?;
    writeln!(out, "{}", report.note)
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn write_heading<W: WriteColor>(out: &mut W, component: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(out, "{component}")?;
    out.reset()
}

fn write_status<W: WriteColor>(out: &mut W, passed: bool, label: &str) -> io::Result<()> {
    let (mark, color) = if passed {
        ("✓", Color::Green)
    } else {
        ("✗", Color::Red)
    };
    out.set_color(ColorSpec::new().set_fg(Some(color)))?;
    write!(out, "  {mark}")?;
    out.reset()?;
    writeln!(out, " {label}")
}

fn write_summary<W: WriteColor>(out: &mut W, ok: bool, summary: &str) -> io::Result<()> {
    let color = if ok { Color::Green } else { Color::Yellow };
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    writeln!(out, "{summary}")?;
    out.reset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{CategoryResult, ValidationResults};
    use termcolor::NoColor;

    #[test]
    fn compliance_text_lists_issues_under_their_category() {
        let results = ValidationResults {
            layout: CategoryResult::from_issues(vec!["non-standard grid gap '10px' is used".to_string()]),
            ..ValidationResults::default()
        };
        let report = ComplianceReport::new(Some("Grid"), results);

        let mut out = NoColor::new(Vec::new());
        write_compliance(&mut out, &report).unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();

        assert!(text.starts_with("Grid\n"));
        assert!(text.contains("  ✓ color\n"));
        assert!(text.contains("  ✗ layout\n    • non-standard grid gap '10px' is used\n"));
        assert!(text.ends_with("1 compliance violation(s) found\n"));
    }

    #[test]
    fn accessibility_text_ends_with_the_note() {
        let report = AccessibilityReport::evaluate("<input>", Some("Form"));
        let mut out = NoColor::new(Vec::new());
        write_accessibility(&mut out, &report).unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();
        assert!(text.contains("form control has no label"));
        assert!(text.trim_end().ends_with(&report.note));
    }
}
