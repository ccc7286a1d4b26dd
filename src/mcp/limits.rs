//! Input limits for MCP tool calls.
//!
//! Tool arguments come from an untrusted client. Directory inspection is
//! denied unless the directory lies under an allowed root, and text payloads
//! are capped in size.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::errors::{LintError, Result};

/// Environment variable holding comma-separated allowed roots.
pub const ALLOWED_PATHS_ENV: &str = "ALLOWED_PATHS";

/// Environment variable holding the payload size cap in bytes.
pub const MAX_FILE_SIZE_ENV: &str = "MAX_FILE_SIZE";

pub const DEFAULT_MAX_FILE_SIZE: usize = 100_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerLimits {
    /// Roots under which `analyze_component_structure` may look. Empty denies all.
    pub allowed_paths: Vec<PathBuf>,
    /// Largest accepted `css_content`/`html_content`, in bytes.
    pub max_file_size: usize,
}

impl Default for ServerLimits {
    fn default() -> Self {
        Self {
            allowed_paths: Vec::new(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl ServerLimits {
    pub fn new<I, S>(allowed_paths: I, max_file_size: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed_paths: allowed_paths
                .into_iter()
                .map(|path| path.as_ref().trim().to_string())
                .filter(|path| !path.is_empty())
                .map(PathBuf::from)
                .collect(),
            max_file_size,
        }
    }

    pub fn check_size(&self, field: &'static str, content: &str) -> Result<()> {
        if content.len() > self.max_file_size {
            return Err(LintError::InputTooLarge {
                field,
                size: content.len(),
                limit: self.max_file_size,
            });
        }
        Ok(())
    }

    /// Accepts `path` only when it resolves inside one of the allowed roots.
    pub fn check_path(&self, path: &Path) -> Result<()> {
        let resolved = resolve(path);
        let allowed = self
            .allowed_paths
            .iter()
            .any(|root| resolved.starts_with(resolve(root)));
        if allowed {
            Ok(())
        } else {
            Err(LintError::PathNotAllowed {
                path: path.to_path_buf(),
            })
        }
    }
}

/// Absolute, normalized form of `path` with symlinks resolved in the part
/// that exists on disk. Missing trailing components are kept as written.
fn resolve(path: &Path) -> PathBuf {
    let normalized = normalize(path);
    let mut existing = normalized.as_path();
    let mut missing = Vec::new();
    loop {
        if let Ok(canonical) = fs::canonicalize(existing) {
            return missing
                .iter()
                .rev()
                .fold(canonical, |resolved, part| resolved.join(part));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return normalized.clone(),
        }
    }
}

/// Makes `path` absolute and folds `.` and `..` lexically.
fn normalize(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn no_allowed_paths_denies_everything() {
        let limits = ServerLimits::default();
        let err = limits.check_path(Path::new(".")).unwrap_err();
        assert!(matches!(err, LintError::PathNotAllowed { .. }));
    }

    #[test]
    fn paths_under_an_allowed_root_pass() {
        let root = tempfile::tempdir().unwrap();
        let component = root.path().join("Button");
        fs::create_dir(&component).unwrap();
        let limits = ServerLimits::new([root.path().to_string_lossy()], DEFAULT_MAX_FILE_SIZE);

        assert!(limits.check_path(&component).is_ok());
        assert!(limits.check_path(&root.path().join("Missing")).is_ok());
        assert!(limits.check_path(&component.join("../../elsewhere")).is_err());
    }

    #[test]
    fn blank_entries_are_ignored() {
        let limits = ServerLimits::new(["", "  "], 10);
        assert!(limits.allowed_paths.is_empty());
    }

    #[test]
    fn size_cap_is_inclusive() {
        let limits = ServerLimits::new(Vec::<String>::new(), 4);
        assert!(limits.check_size("css_content", "abcd").is_ok());
        let err = limits.check_size("css_content", "abcde").unwrap_err();
        assert_eq!(
            err.to_string(),
            "css_content is 5 bytes, over the 4-byte limit"
        );
    }
}
