use thiserror::Error;

use crate::transport::{INTERNAL_ERROR, METHOD_NOT_FOUND, SERVER_NOT_INITIALIZED};

/// Failures that break the request/response contract and surface as JSON-RPC
/// error envelopes. Expected user-input problems are rendered as tool text
/// instead and never reach this type.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Method not found: {0}")]
    UnknownMethod(String),

    #[error("Server not initialized: call initialize before {0}")]
    NotInitialized(String),

    #[error("invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid params: {0}")]
    InvalidParams(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DispatchError {
    pub fn code(&self) -> i64 {
        match self {
            DispatchError::UnknownMethod(_) => METHOD_NOT_FOUND,
            DispatchError::NotInitialized(_) => SERVER_NOT_INITIALIZED,
            _ => INTERNAL_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self.code() {
            INTERNAL_ERROR => format!("Internal error: {}", self),
            _ => self.to_string(),
        }
    }
}
