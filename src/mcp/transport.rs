use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use super::server::McpServer;

/// Line-delimited JSON-RPC over any reader/writer pair (stdin/stdout in
/// production). One message per line; replies are flushed immediately.
pub struct StdioTransport<R, W> {
    reader: R,
    writer: W,
}

impl StdioTransport<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> StdioTransport<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Serves requests until the reader reaches end of input.
    pub fn serve(mut self, server: &McpServer) -> io::Result<()> {
        info!("MCP server listening on stdio");
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                break;
            }
            let message = line.trim();
            if message.is_empty() {
                continue;
            }
            debug!(bytes = message.len(), "received message");
            if let Some(reply) = server.handle_line(message) {
                writeln!(self.writer, "{reply}")?;
                self.writer.flush()?;
            }
        }
        info!("input closed, MCP server stopping");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::DesignTokens;

    #[test]
    fn serves_one_reply_per_request() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            "\n",
        );
        let mut output = Vec::new();
        let server = McpServer::new(DesignTokens::default());
        StdioTransport::new(input.as_bytes(), &mut output)
            .serve(&server)
            .unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(r#""id":1"#));
        assert!(lines[1].contains("validate_design_tokens"));
    }
}
