//! Design-lint error handling.
//!
//! The checkers are infallible: text that does not match a pattern is simply
//! not reported. Everything that *can* fail lives at the edges (reading the
//! token document, reading input files, inspecting component directories,
//! decoding JSON-RPC requests) and is represented by [`LintError`], which
//! renders through `miette`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LintError>;

/// Every failure mode outside the checkers.
#[derive(Error, Diagnostic, Debug)]
pub enum LintError {
    #[error("failed to read '{}'", path.display())]
    #[diagnostic(code(design_lint::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed token document: {message}")]
    #[diagnostic(
        code(design_lint::tokens::parse),
        help("the token document must be a JSON or YAML object with colors, typography, spacing, elevation, borderRadius, breakpoints and grid sections")
    )]
    TokenParse {
        message: String,
        #[source_code]
        src: Arc<NamedSource<String>>,
        #[label("here")]
        span: Option<SourceSpan>,
    },

    #[error("unsupported token document format '{extension}'")]
    #[diagnostic(
        code(design_lint::tokens::format),
        help("use a .json, .yaml or .yml file")
    )]
    UnsupportedFormat { extension: String },

    #[error("unknown token section '{0}'")]
    #[diagnostic(
        code(design_lint::tokens::section),
        help("valid sections: all, colors, spacing, typography, elevation, layout")
    )]
    UnknownSection(String),

    #[error("component path '{}' not found", path.display())]
    #[diagnostic(code(design_lint::analysis::not_found))]
    ComponentNotFound { path: PathBuf },

    #[error("invalid request: {0}")]
    #[diagnostic(code(design_lint::mcp::request))]
    InvalidRequest(String),

    #[error("access to '{}' is not allowed", path.display())]
    #[diagnostic(
        code(design_lint::mcp::path_denied),
        help("list the directory (or a parent) in ALLOWED_PATHS or --allowed-paths")
    )]
    PathNotAllowed { path: PathBuf },

    #[error("{field} is {size} bytes, over the {limit}-byte limit")]
    #[diagnostic(
        code(design_lint::mcp::too_large),
        help("raise MAX_FILE_SIZE or --max-file-size")
    )]
    InputTooLarge {
        field: &'static str,
        size: usize,
        limit: usize,
    },

    #[error("failed to encode output")]
    #[diagnostic(code(design_lint::output))]
    Encode(#[from] serde_json::Error),
}

impl LintError {
    /// Wraps an I/O failure with the path that caused it.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        LintError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Builds a parse error pointing at a 1-based line/column of `content`.
    ///
    /// A line of 0 means the parser could not locate the problem, in which case
    /// no label is attached.
    pub fn token_parse(
        name: impl AsRef<str>,
        content: &str,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        let span = offset_of(content, line, column).map(|offset| SourceSpan::from((offset, 1)));
        LintError::TokenParse {
            message: message.into(),
            src: Arc::new(NamedSource::new(name.as_ref(), content.to_string())),
            span,
        }
    }

    /// Exit status used by the CLI for this failure.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

/// Byte offset of a 1-based line/column pair, clamped to the end of `content`.
fn offset_of(content: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let mut offset = 0;
    for (index, text) in content.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let col = column.saturating_sub(1).min(text.len());
            return Some((offset + col).min(content.len().saturating_sub(1)));
        }
        offset += text.len();
    }
    Some(content.len().saturating_sub(1))
}
