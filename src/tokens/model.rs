//! Serde model of the token definition document.
//!
//! Only the sections the checkers consult are typed. `colors` is an arbitrary
//! nested tree (palettes, semantic groups, ...), and `zIndex`/`transition` are
//! carried through untouched so they can be served back as resources.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The whole token document. Missing sections deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DesignTokens {
    pub colors: Value,
    pub typography: TypographyTokens,
    pub spacing: IndexMap<String, String>,
    pub elevation: IndexMap<String, String>,
    pub border_radius: IndexMap<String, String>,
    pub breakpoints: IndexMap<String, String>,
    pub grid: GridTokens,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub z_index: Value,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub transition: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypographyTokens {
    pub font_family: FontFamilies,
    pub font_weight: FontWeights,
    pub display: TypeStyle,
    pub standard: IndexMap<String, TypeStyle>,
    pub dense: IndexMap<String, TypeStyle>,
    pub oneline: IndexMap<String, TypeStyle>,
    pub mono: IndexMap<String, TypeStyle>,
    pub link: IndexMap<String, TypeStyle>,
}

impl TypographyTokens {
    /// Every type style in document order: `display` first, then the sized
    /// entries of `standard`, `dense`, `oneline`, `mono` and `link`.
    pub fn styles(&self) -> impl Iterator<Item = &TypeStyle> {
        std::iter::once(&self.display).chain(
            [
                &self.standard,
                &self.dense,
                &self.oneline,
                &self.mono,
                &self.link,
            ]
            .into_iter()
            .flat_map(|category| category.values()),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontFamilies {
    pub primary: String,
    pub mono: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontWeights {
    pub normal: u32,
    pub medium: u32,
    pub bold: u32,
}

/// One typographic style: size, leading, weight and tracking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypeStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridTokens {
    pub columns: IndexMap<String, u32>,
    pub gap: IndexMap<String, String>,
    pub margin: IndexMap<String, String>,
}
