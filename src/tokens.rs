//! Design tokens: the document model, its derived whitelists and loading.

pub mod loader;
pub mod model;
pub mod rules;

use std::fmt;
use std::str::FromStr;

use serde_json::{json, Value};

use crate::errors::{LintError, Result};

// Re-exports for concise imports
pub use loader::{load_tokens, resolve_tokens_path, DEFAULT_TOKENS_FILE, TOKENS_PATH_ENV};
pub use model::{DesignTokens, FontFamilies, FontWeights, GridTokens, TypeStyle, TypographyTokens};
pub use rules::{collect_colors, parse_px, RuleSet};

/// A projection of the token document, as served by the `design-tokens://` resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenSection {
    All,
    Colors,
    Spacing,
    Typography,
    Elevation,
    Layout,
}

impl TokenSection {
    pub const ALL: [TokenSection; 6] = [
        TokenSection::All,
        TokenSection::Colors,
        TokenSection::Spacing,
        TokenSection::Typography,
        TokenSection::Elevation,
        TokenSection::Layout,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenSection::All => "all",
            TokenSection::Colors => "colors",
            TokenSection::Spacing => "spacing",
            TokenSection::Typography => "typography",
            TokenSection::Elevation => "elevation",
            TokenSection::Layout => "layout",
        }
    }

    pub fn uri(&self) -> String {
        format!("design-tokens://{}", self.as_str())
    }

    pub fn from_uri(uri: &str) -> Result<Self> {
        let name = uri
            .strip_prefix("design-tokens://")
            .ok_or_else(|| LintError::UnknownSection(uri.to_string()))?;
        name.parse()
    }

    pub fn description(&self) -> &'static str {
        match self {
            TokenSection::All => "The complete design token document",
            TokenSection::Colors => "Color tokens",
            TokenSection::Spacing => "Spacing scale",
            TokenSection::Typography => "Font families, weights and type styles",
            TokenSection::Elevation => "Box-shadow elevations and border radii",
            TokenSection::Layout => "Breakpoints and grid definitions",
        }
    }

    /// Projects the section out of a token document.
    pub fn extract(&self, tokens: &DesignTokens) -> Result<Value> {
        let value = match self {
            TokenSection::All => serde_json::to_value(tokens)?,
            TokenSection::Colors => tokens.colors.clone(),
            TokenSection::Spacing => serde_json::to_value(&tokens.spacing)?,
            TokenSection::Typography => serde_json::to_value(&tokens.typography)?,
            TokenSection::Elevation => json!({
                "elevation": tokens.elevation,
                "borderRadius": tokens.border_radius,
            }),
            TokenSection::Layout => json!({
                "breakpoints": tokens.breakpoints,
                "grid": tokens.grid,
            }),
        };
        Ok(value)
    }
}

impl FromStr for TokenSection {
    type Err = LintError;

    fn from_str(s: &str) -> Result<Self> {
        TokenSection::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| LintError::UnknownSection(s.to_string()))
    }
}

impl fmt::Display for TokenSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
