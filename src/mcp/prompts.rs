//! Prompt templates served through `prompts/list` and `prompts/get`.

use std::collections::HashMap;

use serde_json::{json, Value};

use crate::errors::{LintError, Result};

/// A prompt and the optional string arguments it interpolates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    DesignSystemReview,
    ComponentAudit,
}

impl Prompt {
    pub const ALL: [Prompt; 2] = [Prompt::DesignSystemReview, Prompt::ComponentAudit];

    pub fn name(&self) -> &'static str {
        match self {
            Prompt::DesignSystemReview => "design_system_review",
            Prompt::ComponentAudit => "component_audit",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Prompt::DesignSystemReview => "Step-by-step design system compliance review of a component",
            Prompt::ComponentAudit => "Structural audit of a component directory",
        }
    }

    /// `(name, description)` of each accepted argument; none are required.
    fn arguments(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Prompt::DesignSystemReview => &[
                ("component_name", "Component name"),
                ("css_content", "CSS to review"),
            ],
            Prompt::ComponentAudit => &[("component_path", "Path of the component directory")],
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        Prompt::ALL
            .into_iter()
            .find(|prompt| prompt.name() == name)
            .ok_or_else(|| LintError::InvalidRequest(format!("unknown prompt '{name}'")))
    }

    /// The `prompts/list` entry.
    pub fn definition(&self) -> Value {
        let arguments: Vec<Value> = self
            .arguments()
            .iter()
            .map(|(name, description)| {
                json!({ "name": name, "description": description, "required": false })
            })
            .collect();
        json!({
            "name": self.name(),
            "description": self.description(),
            "arguments": arguments,
        })
    }

    /// Renders the prompt into a single user message.
    pub fn render(&self, arguments: &HashMap<String, String>) -> Value {
        let mut text = match self {
            Prompt::DesignSystemReview => REVIEW_INSTRUCTIONS.to_string(),
            Prompt::ComponentAudit => AUDIT_INSTRUCTIONS.to_string(),
        };
        match self {
            Prompt::DesignSystemReview => {
                if let Some(component) = given(arguments, "component_name") {
                    text.push_str(&format!("\nComponent: {component}\n"));
                }
                if let Some(css) = given(arguments, "css_content") {
                    text.push_str(&format!("\nCSS:\n```css\n{css}\n```\n"));
                }
            }
            Prompt::ComponentAudit => {
                if let Some(path) = given(arguments, "component_path") {
                    text.push_str(&format!("\nPath: {path}\n"));
                }
            }
        }

        json!({
            "description": self.description(),
            "messages": [{
                "role": "user",
                "content": { "type": "text", "text": text },
            }],
        })
    }
}

/// A non-empty argument value.
fn given<'a>(arguments: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    arguments
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

const REVIEW_INSTRUCTIONS: &str = "\
# Design system compliance review

Review the component in these steps:

## 1. Token validation
Run the `validate_design_tokens` tool on the CSS.

## 2. Approved palette
Compare the colors in use against the `design-tokens://colors` resource.

## 3. Report
Write the report in this shape:

### Compliant
- approved tokens in use

### Needs work
- a token-based replacement for each unapproved value
- a concrete fix for each

### Checklist
- [ ] color tokens
- [ ] spacing tokens
- [ ] typography tokens
";

const AUDIT_INSTRUCTIONS: &str = "\
# Component structure audit

Audit the component in these steps:

## 1. Structure
Run the `analyze_component_structure` tool on the directory.

## 2. Conventions
- file naming
- directory layout
- required companion files

## 3. Improvements
Propose a concrete action plan.

## 4. Priority
- high: required
- medium: recommended
- low: optional
";

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn review_interpolates_component_and_css() {
        let rendered = Prompt::DesignSystemReview.render(&args(&[
            ("component_name", "Button"),
            ("css_content", ".button { color: #0017C1; }"),
        ]));
        let message = &rendered["messages"][0];
        assert_eq!(message["role"], "user");
        let text = message["content"]["text"].as_str().unwrap();
        assert!(text.contains("validate_design_tokens"));
        assert!(text.contains("Component: Button"));
        assert!(text.contains("```css\n.button { color: #0017C1; }\n```"));
    }

    #[test]
    fn missing_arguments_are_left_out() {
        let rendered = Prompt::ComponentAudit.render(&HashMap::new());
        let text = rendered["messages"][0]["content"]["text"].as_str().unwrap();
        assert!(text.starts_with("# Component structure audit"));
        assert!(!text.contains("Path:"));
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(Prompt::from_name("component_audit").unwrap(), Prompt::ComponentAudit);
        assert!(Prompt::from_name("create_component").is_err());
        assert_eq!(
            Prompt::DesignSystemReview.definition()["arguments"][1]["name"],
            "css_content"
        );
    }
}
