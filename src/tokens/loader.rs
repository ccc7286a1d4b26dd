use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::model::DesignTokens;
use crate::errors::{LintError, Result};

/// Environment variable consulted when no explicit token path is given.
pub const TOKENS_PATH_ENV: &str = "DESIGN_TOKENS_PATH";

/// File looked up in the working directory as a last resort.
pub const DEFAULT_TOKENS_FILE: &str = "design-tokens.json";

/// Picks the token document path: explicit path, then the environment, then
/// `design-tokens.json` in the working directory.
pub fn resolve_tokens_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match std::env::var_os(TOKENS_PATH_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_TOKENS_FILE),
    }
}

/// Reads and parses a token document. The format follows the extension:
/// `.yaml`/`.yml` are YAML, `.json` or no extension is JSON, anything else is rejected.
pub fn load_tokens(path: &Path) -> Result<DesignTokens> {
    let content = fs::read_to_string(path).map_err(|e| LintError::io(path, e))?;
    let name = path.display().to_string();
    let tokens = match path.extension().and_then(|ext| ext.to_str()) {
        None | Some("json") => parse_json_tokens(&name, &content)?,
        Some("yaml") | Some("yml") => parse_yaml_tokens(&name, &content)?,
        Some(other) => {
            return Err(LintError::UnsupportedFormat {
                extension: other.to_string(),
            })
        }
    };
    debug!(path = %name, "loaded design tokens");
    Ok(tokens)
}

pub fn parse_json_tokens(name: &str, content: &str) -> Result<DesignTokens> {
    serde_json::from_str(content)
        .map_err(|e| LintError::token_parse(name, content, e.line(), e.column(), e.to_string()))
}

pub fn parse_yaml_tokens(name: &str, content: &str) -> Result<DesignTokens> {
    serde_yaml::from_str(content).map_err(|e| {
        let (line, column) = e
            .location()
            .map(|loc| (loc.line(), loc.column()))
            .unwrap_or((0, 0));
        LintError::token_parse(name, content, line, column, e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn json_syntax_errors_carry_a_location() {
        let err = parse_json_tokens("tokens.json", "{\n  \"spacing\": {\"sm\": 8px}\n}").unwrap_err();
        match err {
            LintError::TokenParse { span, .. } => assert!(span.is_some()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn wrong_shape_is_a_parse_error() {
        let err = parse_json_tokens("tokens.json", r#"{"spacing": ["8px"]}"#).unwrap_err();
        assert!(matches!(err, LintError::TokenParse { .. }));
    }

    #[test]
    fn yaml_documents_are_accepted() {
        let tokens = parse_yaml_tokens(
            "tokens.yaml",
            "spacing:\n  sm: 8px\nbreakpoints:\n  tablet: 1024px\n",
        )
        .unwrap();
        assert_eq!(tokens.spacing["sm"], "8px");
        assert_eq!(tokens.breakpoints["tablet"], "1024px");
    }

    #[test]
    fn load_tokens_reports_missing_files() {
        let err = load_tokens(Path::new("definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, LintError::Io { .. }));
    }

    #[test]
    fn load_tokens_rejects_unknown_extensions() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "spacing = 1").unwrap();
        let err = load_tokens(file.path()).unwrap_err();
        assert!(matches!(err, LintError::UnsupportedFormat { .. }));
    }

    #[test]
    fn explicit_path_wins() {
        let path = resolve_tokens_path(Some(Path::new("custom.json")));
        assert_eq!(path, PathBuf::from("custom.json"));
    }
}
