//! Defines the command-line arguments and subcommands for the design-lint CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::mcp::limits::{ALLOWED_PATHS_ENV, DEFAULT_MAX_FILE_SIZE, MAX_FILE_SIZE_ENV};
use crate::tokens::TOKENS_PATH_ENV;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "design-lint",
    version,
    about = "Checks CSS against a design-token whitelist."
)]
pub struct LintArgs {
    /// The design token document (.json, .yaml or .yml).
    #[arg(long, global = true, env = TOKENS_PATH_ENV)]
    pub tokens: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate a stylesheet against the design tokens.
    Validate {
        /// The CSS file to validate, or `-` for stdin.
        #[arg(required = true)]
        file: PathBuf,
        /// Component name shown in the report.
        #[arg(long)]
        component: Option<String>,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Run basic accessibility checks over an HTML file.
    A11y {
        /// The HTML file to check, or `-` for stdin.
        #[arg(required = true)]
        file: PathBuf,
        /// Component name shown in the report.
        #[arg(long)]
        component: Option<String>,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Report which companion files a component directory has.
    Analyze {
        /// The component directory.
        #[arg(required = true)]
        dir: PathBuf,
    },
    /// Print a section of the token document as JSON.
    Tokens {
        /// One of: all, colors, spacing, typography, elevation, layout.
        #[arg(default_value = "all")]
        section: String,
    },
    /// Serve the checkers over MCP (JSON-RPC on stdin/stdout).
    Serve {
        /// Comma-separated directories that component analysis may inspect.
        /// Nothing may be inspected when unset.
        #[arg(long, env = ALLOWED_PATHS_ENV, value_delimiter = ',')]
        allowed_paths: Vec<String>,
        /// Largest accepted CSS or HTML payload, in bytes.
        #[arg(long, env = MAX_FILE_SIZE_ENV, default_value_t = DEFAULT_MAX_FILE_SIZE)]
        max_file_size: usize,
    },
}
