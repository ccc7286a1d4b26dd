//! Component directory analysis.
//!
//! Inspects one component directory (non-recursively) and reports which of
//! the expected companion files exist: a stylesheet named after the
//! component, tests, stories and an index module.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;
use walkdir::WalkDir;

use crate::errors::{LintError, Result};

/// Classification of a file inside a component directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Test,
    Story,
    Style,
    Component,
    Other,
}

impl FileKind {
    pub fn classify(file_name: &str) -> Self {
        if file_name.contains(".test.") || file_name.contains(".spec.") {
            FileKind::Test
        } else if file_name.contains(".stories.") {
            FileKind::Story
        } else if file_name.ends_with(".css") {
            FileKind::Style
        } else if file_name.ends_with(".tsx") || file_name.ends_with(".ts") {
            FileKind::Component
        } else {
            FileKind::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComponentStructure {
    pub has_styles: bool,
    pub has_tests: bool,
    pub has_stories: bool,
    pub has_index: bool,
}

impl ComponentStructure {
    /// Percentage of the four expected companion files that are present.
    pub fn completeness(&self) -> f64 {
        let present = [self.has_styles, self.has_tests, self.has_stories, self.has_index]
            .iter()
            .filter(|present| **present)
            .count();
        present as f64 / 4.0 * 100.0
    }

    pub fn recommendations(&self) -> Vec<String> {
        let mut recommendations = Vec::new();
        if !self.has_styles {
            recommendations.push("add a stylesheet (.css or .module.css)".to_string());
        }
        if !self.has_tests {
            recommendations.push("add a test file (.test.tsx or .spec.tsx)".to_string());
        }
        if !self.has_stories {
            recommendations.push("add a Storybook story (.stories.tsx)".to_string());
        }
        if !self.has_index {
            recommendations.push("add an index.ts that re-exports the component".to_string());
        }
        recommendations
    }
}

/// The JSON payload returned by `analyze_component_structure`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentAnalysis {
    pub path: PathBuf,
    pub structure: ComponentStructure,
    pub completeness: f64,
    pub files: Vec<FileInfo>,
    pub recommendations: Vec<String>,
}

/// Analyzes the component directory at `dir`.
pub fn analyze_component(dir: &Path) -> Result<ComponentAnalysis> {
    if !dir.is_dir() {
        return Err(LintError::ComponentNotFound {
            path: dir.to_path_buf(),
        });
    }

    let files = list_files(dir)?;
    let component = dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let has_file = |wanted: &str| files.iter().any(|file| file.name == wanted);
    let structure = ComponentStructure {
        has_styles: has_file(&format!("{component}.css"))
            || has_file(&format!("{component}.module.css")),
        has_tests: files.iter().any(|file| file.kind == FileKind::Test),
        has_stories: files.iter().any(|file| file.kind == FileKind::Story),
        has_index: has_file("index.ts") || has_file("index.tsx"),
    };
    debug!(path = %dir.display(), files = files.len(), "analyzed component directory");

    Ok(ComponentAnalysis {
        path: dir.to_path_buf(),
        completeness: structure.completeness(),
        recommendations: structure.recommendations(),
        structure,
        files,
    })
}

fn list_files(dir: &Path) -> Result<Vec<FileInfo>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| LintError::io(dir, e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        files.push(FileInfo {
            kind: FileKind::classify(&name),
            path: entry.path().to_path_buf(),
            name,
        });
    }
    Ok(files)
}
