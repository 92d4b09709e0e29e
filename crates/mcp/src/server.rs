use openai_cost_core::PricingTable;
use serde_json::{json, Value};
use std::io::{self, BufRead, Write};

use crate::config::{ServerConfig, UsageClientConfig};
use crate::error::DispatchError;
use crate::tools::{list_tools, model_pricing, query_cost, unknown_tool, ToolCall};
use crate::transport::{JsonRpcRequest, JsonRpcResponse, Method, PARSE_ERROR};
use crate::usage::{OpenAiUsageClient, UsageProvider};

const SERVER_NAME: &str = "openai-cost-mcp";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
const PROTOCOL_VERSION: &str = "2024-11-05";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Uninitialized,
    Initialized,
}

pub struct McpServer {
    state: ServerState,
    config: ServerConfig,
    pricing: &'static PricingTable,
    usage: Box<dyn UsageProvider>,
}

impl McpServer {
    pub fn new() -> Self {
        Self::with_config(
            ServerConfig::default(),
            Box::new(OpenAiUsageClient::new(&UsageClientConfig::default())),
        )
    }

    pub fn with_config(config: ServerConfig, usage: Box<dyn UsageProvider>) -> Self {
        Self {
            state: ServerState::Uninitialized,
            config,
            pricing: PricingTable::builtin(),
            usage,
        }
    }

    pub fn state(&self) -> ServerState {
        self.state
    }

    /// Serves newline-delimited requests until `reader` hits EOF. Lines that
    /// are not UTF-8 are treated like any other unparsable line; only I/O
    /// failures end the loop.
    pub fn serve<R: BufRead, W: Write>(&mut self, mut reader: R, mut writer: W) -> io::Result<()> {
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                return Ok(());
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_request(line.trim()),
                Err(e) => self.reject_line(&e),
            };

            if let Some(resp) = response {
                writeln!(writer, "{}", resp)?;
                writer.flush()?;
            }
        }
    }

    /// Handles one input line. `None` means nothing is written back, which
    /// happens for unparsable lines unless parse errors are answered.
    pub fn handle_request(&mut self, input: &str) -> Option<String> {
        let request = match JsonRpcRequest::parse(input) {
            Ok(r) => r,
            Err(e) => return self.reject_line(&e),
        };

        let response = self.dispatch(request);
        encode(&response)
    }

    fn reject_line(&self, error: &dyn std::error::Error) -> Option<String> {
        tracing::warn!("dropping malformed request: {}", error);
        if !self.config.reply_to_parse_errors {
            return None;
        }
        let resp = JsonRpcResponse::error(None, PARSE_ERROR, format!("Parse error: {}", error));
        encode(&resp)
    }

    pub fn dispatch(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone();
        tracing::debug!(method = %request.method, "dispatching");

        match self.route(request) {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => {
                tracing::error!("request failed: {}", e);
                JsonRpcResponse::error(id, e.code(), e.message())
            }
        }
    }

    fn route(&mut self, request: JsonRpcRequest) -> Result<Value, DispatchError> {
        let method = Method::parse(&request.method)?;

        if method != Method::Initialize
            && self.config.require_initialize
            && self.state == ServerState::Uninitialized
        {
            return Err(DispatchError::NotInitialized(request.method));
        }

        match method {
            Method::Initialize => Ok(self.handle_initialize()),
            Method::ListTools => self.handle_tools_list(),
            Method::CallTool => self.handle_tools_call(ToolCall::from_params(request.params)?),
        }
    }

    fn handle_initialize(&mut self) -> Value {
        self.state = ServerState::Initialized;
        tracing::info!("server initialized");

        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": SERVER_VERSION
            }
        })
    }

    fn handle_tools_list(&self) -> Result<Value, DispatchError> {
        let tools = serde_json::to_value(list_tools())?;
        Ok(json!({ "tools": tools }))
    }

    fn handle_tools_call(&self, call: ToolCall) -> Result<Value, DispatchError> {
        let result = match call {
            ToolCall::QueryCost(args) => query_cost(&args, &*self.usage, self.pricing),
            ToolCall::GetPricing(args) => {
                model_pricing(&args, self.pricing, self.config.unknown_model)
            }
            ToolCall::Unknown(name) => {
                tracing::warn!(tool = %name, "unknown tool");
                unknown_tool(&name)
            }
        };
        Ok(result)
    }
}

impl Default for McpServer {
    fn default() -> Self {
        Self::new()
    }
}

fn encode(response: &JsonRpcResponse) -> Option<String> {
    match serde_json::to_string(response) {
        Ok(line) => Some(line),
        Err(e) => {
            tracing::error!("failed to encode response: {}", e);
            None
        }
    }
}
