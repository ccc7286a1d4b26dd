//! The design-lint command-line interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

pub mod args;
pub mod output;

use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::{fs, process};

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::analysis::analyze_component;
use crate::errors::{LintError, Result};
use crate::mcp::{McpServer, ServerLimits, StdioTransport};
use crate::report::{AccessibilityReport, ValidationSuite};
use crate::tokens::{load_tokens, resolve_tokens_path, DesignTokens, RuleSet, TokenSection};

pub use args::{Command, LintArgs};

/// Exit status when a report found problems.
pub const EXIT_VIOLATIONS: i32 = 1;

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

/// The main entry point for the CLI.
pub fn run() {
    init_logging();
    let args = LintArgs::parse();

    match execute(args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            let code = e.exit_code();
            eprintln!("{:?}", miette::Report::new(e));
            process::exit(code);
        }
    }
}

/// Runs one command and returns the process exit status.
pub fn execute(args: LintArgs) -> Result<i32> {
    let tokens_path = resolve_tokens_path(args.tokens.as_deref());

    match args.command {
        Command::Validate {
            file,
            component,
            json,
        } => {
            let tokens = load(&tokens_path)?;
            let css = read_input(&file)?;
            let suite = ValidationSuite::new(Arc::new(RuleSet::from_tokens(&tokens)));
            let report = suite.evaluate(&css, component.as_deref());
            if json {
                output::print_json(&report)?;
            } else {
                output::print_compliance(&report).map_err(|e| LintError::io("<stdout>", e))?;
            }
            Ok(exit_status(report.is_compliant))
        }

        Command::A11y {
            file,
            component,
            json,
        } => {
            let html = read_input(&file)?;
            let report = AccessibilityReport::evaluate(&html, component.as_deref());
            if json {
                output::print_json(&report)?;
            } else {
                output::print_accessibility(&report).map_err(|e| LintError::io("<stdout>", e))?;
            }
            Ok(exit_status(report.is_accessible))
        }

        Command::Analyze { dir } => {
            let analysis = analyze_component(&dir)?;
            output::print_json(&analysis)?;
            Ok(0)
        }

        Command::Tokens { section } => {
            let section: TokenSection = section.parse()?;
            let tokens = load(&tokens_path)?;
            output::print_json(&section.extract(&tokens)?)?;
            Ok(0)
        }

        Command::Serve {
            allowed_paths,
            max_file_size,
        } => {
            let tokens = load(&tokens_path)?;
            let limits = ServerLimits::new(allowed_paths, max_file_size);
            debug!(?limits, "starting MCP server");
            let server = McpServer::with_limits(tokens, limits);
            StdioTransport::stdio()
                .serve(&server)
                .map_err(|e| LintError::io("<stdio>", e))?;
            Ok(0)
        }
    }
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Logs go to stderr so stdout stays free for reports and JSON-RPC.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load(path: &Path) -> Result<DesignTokens> {
    debug!(path = %path.display(), "loading design tokens");
    load_tokens(path)
}

/// Reads a file, or stdin when the path is `-`.
fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| LintError::io("<stdin>", e))?;
        return Ok(buffer);
    }
    fs::read_to_string(path).map_err(|e| LintError::io(path, e))
}

fn exit_status(ok: bool) -> i32 {
    if ok {
        0
    } else {
        EXIT_VIOLATIONS
    }
}
