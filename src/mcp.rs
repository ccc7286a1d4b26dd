//! Model Context Protocol server.
//!
//! Exposes the checkers as MCP tools, the token document as
//! `design-tokens://` resources and two review prompts over a line-delimited
//! JSON-RPC 2.0 stdio transport. Requests are handled one at a time; the rule
//! set is shared and read-only. Tool input is bounded by [`ServerLimits`].

pub mod limits;
pub mod prompts;
pub mod protocol;
pub mod server;
pub mod transport;

pub use limits::ServerLimits;
pub use prompts::Prompt;
pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, MCP_PROTOCOL_VERSION};
pub use server::McpServer;
pub use transport::StdioTransport;
