use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::limits::ServerLimits;
use super::prompts::Prompt;
use super::protocol::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, INTERNAL_ERROR, INVALID_PARAMS,
    INVALID_REQUEST, METHOD_NOT_FOUND, MCP_PROTOCOL_VERSION, PARSE_ERROR,
};
use crate::analysis::analyze_component;
use crate::errors::LintError;
use crate::report::{AccessibilityReport, ValidationSuite};
use crate::tokens::{DesignTokens, RuleSet, TokenSection};

pub const SERVER_NAME: &str = "design-system-validator";

#[derive(Debug, Deserialize)]
struct ValidateTokensArgs {
    css_content: String,
    #[serde(default)]
    component_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ValidateAccessibilityArgs {
    html_content: String,
    #[serde(default)]
    component_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnalyzeComponentArgs {
    component_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ToolCall {
    name: String,
    #[serde(default)]
    arguments: Value,
}

#[derive(Debug, Deserialize)]
struct ResourceRead {
    uri: String,
}

#[derive(Debug, Deserialize)]
struct PromptGet {
    name: String,
    #[serde(default)]
    arguments: HashMap<String, String>,
}

/// Text content block of a tool result.
#[derive(Debug, Serialize)]
struct TextContent {
    #[serde(rename = "type")]
    kind: &'static str,
    text: String,
}

/// The MCP request handler.
///
/// Holds the token document, the checkers built from it and the input
/// limits; all are immutable, so one server instance can answer any number
/// of requests.
pub struct McpServer {
    tokens: Arc<DesignTokens>,
    rules: Arc<RuleSet>,
    suite: ValidationSuite,
    limits: ServerLimits,
}

impl McpServer {
    /// A server with default limits: no directory may be analyzed.
    pub fn new(tokens: DesignTokens) -> Self {
        Self::with_limits(tokens, ServerLimits::default())
    }

    pub fn with_limits(tokens: DesignTokens, limits: ServerLimits) -> Self {
        let rules = Arc::new(RuleSet::from_tokens(&tokens));
        Self {
            tokens: Arc::new(tokens),
            suite: ValidationSuite::new(Arc::clone(&rules)),
            rules,
            limits,
        }
    }

    /// Decodes one line of input and produces the serialized reply, if any.
    pub fn handle_line(&self, line: &str) -> Option<String> {
        let response = match serde_json::from_str::<Value>(line) {
            Err(e) => {
                warn!(error = %e, "received malformed JSON");
                Some(JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::new(PARSE_ERROR, format!("parse error: {e}")),
                ))
            }
            Ok(value) => match serde_json::from_value::<JsonRpcRequest>(value) {
                Err(e) => {
                    warn!(error = %e, "received invalid request");
                    Some(JsonRpcResponse::failure(
                        Value::Null,
                        JsonRpcError::new(INVALID_REQUEST, format!("invalid request: {e}")),
                    ))
                }
                Ok(request) => self.handle_request(request),
            },
        };
        response.and_then(|response| match serde_json::to_string(&response) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(error = %e, "failed to encode response");
                None
            }
        })
    }

    /// Dispatches a request. Notifications never produce a response.
    pub fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!(method = %request.method, "handling request");
        let outcome = self.dispatch(&request.method, request.params.unwrap_or(Value::Null));
        let id = request.id?;
        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    fn dispatch(&self, method: &str, params: Value) -> Result<Value, JsonRpcError> {
        match method {
            "initialize" => Ok(self.initialize()),
            "notifications/initialized" => {
                info!("client initialized");
                Ok(Value::Null)
            }
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": tool_definitions() })),
            "tools/call" => {
                let call: ToolCall = decode_params(params)?;
                Ok(self.call_tool(&call.name, call.arguments))
            }
            "resources/list" => Ok(json!({ "resources": resource_definitions() })),
            "resources/read" => {
                let read: ResourceRead = decode_params(params)?;
                self.read_resource(&read.uri)
            }
            "prompts/list" => Ok(json!({ "prompts": prompt_definitions() })),
            "prompts/get" => {
                let get: PromptGet = decode_params(params)?;
                let prompt = Prompt::from_name(&get.name)
                    .map_err(|e| JsonRpcError::new(INVALID_PARAMS, e.to_string()))?;
                Ok(prompt.render(&get.arguments))
            }
            other => Err(JsonRpcError::new(
                METHOD_NOT_FOUND,
                format!("method not found: {other}"),
            )),
        }
    }

    fn initialize(&self) -> Value {
        json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "capabilities": { "tools": {}, "resources": {}, "prompts": {} },
            "serverInfo": { "name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION") },
        })
    }

    /// Runs a tool. Tool-level failures are reported in the result with
    /// `isError` set rather than as protocol errors.
    pub fn call_tool(&self, name: &str, arguments: Value) -> Value {
        let outcome = match name {
            "validate_design_tokens" => self.validate_design_tokens(arguments),
            "validate_accessibility" => self.validate_accessibility(arguments),
            "analyze_component_structure" => self.analyze_component_structure(arguments),
            "health_check" => self.health_check(),
            other => Err(LintError::InvalidRequest(format!("unknown tool '{other}'"))),
        };
        match outcome {
            Ok(payload) => tool_result(pretty(&payload), false),
            Err(e) => {
                warn!(tool = name, error = %e, "tool call failed");
                tool_result(e.to_string(), true)
            }
        }
    }

    fn validate_design_tokens(&self, arguments: Value) -> Result<Value, LintError> {
        let args: ValidateTokensArgs = decode_arguments(arguments)?;
        self.limits.check_size("css_content", &args.css_content)?;
        let report = self
            .suite
            .evaluate(&args.css_content, args.component_name.as_deref());
        Ok(serde_json::to_value(report)?)
    }

    fn health_check(&self) -> Result<Value, LintError> {
        Ok(json!({
            "status": "ok",
            "server": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
            "rules": {
                "colors": self.rules.colors.len(),
                "spacing": self.rules.spacing.len(),
                "elevation": self.rules.elevation.len(),
                "border_radius": self.rules.border_radius.len(),
                "breakpoints": self.rules.breakpoints.len(),
            },
            "limits": {
                "max_file_size": self.limits.max_file_size,
                "allowed_paths": self.limits.allowed_paths,
            },
        }))
    }

    fn validate_accessibility(&self, arguments: Value) -> Result<Value, LintError> {
        let args: ValidateAccessibilityArgs = decode_arguments(arguments)?;
        self.limits.check_size("html_content", &args.html_content)?;
        let report =
            AccessibilityReport::evaluate(&args.html_content, args.component_name.as_deref());
        Ok(serde_json::to_value(report)?)
    }

    fn analyze_component_structure(&self, arguments: Value) -> Result<Value, LintError> {
        let args: AnalyzeComponentArgs = decode_arguments(arguments)?;
        self.limits.check_path(&args.component_path)?;
        let analysis = analyze_component(&args.component_path)?;
        Ok(serde_json::to_value(analysis)?)
    }

    fn read_resource(&self, uri: &str) -> Result<Value, JsonRpcError> {
        let section = TokenSection::from_uri(uri)
            .map_err(|e| JsonRpcError::new(INVALID_PARAMS, e.to_string()))?;
        let value = section
            .extract(&self.tokens)
            .map_err(|e| JsonRpcError::new(INTERNAL_ERROR, e.to_string()))?;
        Ok(json!({
            "contents": [{
                "uri": uri,
                "mimeType": "application/json",
                "text": pretty(&value),
            }]
        }))
    }
}

fn decode_params<T: DeserializeOwned>(params: Value) -> Result<T, JsonRpcError> {
    serde_json::from_value(params)
        .map_err(|e| JsonRpcError::new(INVALID_PARAMS, format!("invalid params: {e}")))
}

fn decode_arguments<T: DeserializeOwned>(arguments: Value) -> Result<T, LintError> {
    serde_json::from_value(arguments)
        .map_err(|e| LintError::InvalidRequest(format!("invalid arguments: {e}")))
}

fn tool_result(text: String, is_error: bool) -> Value {
    let content = vec![TextContent { kind: "text", text }];
    if is_error {
        json!({ "content": content, "isError": true })
    } else {
        json!({ "content": content })
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn tool_definitions() -> Value {
    json!([
        {
            "name": "validate_design_tokens",
            "description": "Check CSS against the design tokens (color, typography, elevation, layout)",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "css_content": { "type": "string", "description": "CSS to validate" },
                    "component_name": { "type": "string", "description": "Component name (optional)" }
                },
                "required": ["css_content"]
            }
        },
        {
            "name": "validate_accessibility",
            "description": "Run basic accessibility checks over HTML",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "html_content": { "type": "string", "description": "HTML to check" },
                    "component_name": { "type": "string", "description": "Component name (optional)" }
                },
                "required": ["html_content"]
            }
        },
        {
            "name": "analyze_component_structure",
            "description": "Report which companion files a component directory has (directory must be under an allowed path)",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "component_path": { "type": "string", "description": "Path of the component directory" }
                },
                "required": ["component_path"]
            }
        },
        {
            "name": "health_check",
            "description": "Report server status and loaded rule counts",
            "inputSchema": { "type": "object", "properties": {} }
        }
    ])
}

fn resource_definitions() -> Vec<Value> {
    TokenSection::ALL
        .iter()
        .map(|section| {
            json!({
                "uri": section.uri(),
                "name": format!("design-tokens-{section}"),
                "description": section.description(),
                "mimeType": "application/json",
            })
        })
        .collect()
}

fn prompt_definitions() -> Vec<Value> {
    Prompt::ALL.iter().map(Prompt::definition).collect()
}
