pub use crate::errors::{LintError, Result};

pub mod analysis;
pub mod cli;
pub mod errors;
pub mod mcp;
pub mod report;
pub mod tokens;
pub mod validation;
