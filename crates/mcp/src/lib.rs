pub mod config;
pub mod error;
pub mod server;
pub mod tools;
pub mod transport;
pub mod usage;

pub use config::{ServerConfig, UnknownModelLookup, UsageClientConfig};
pub use error::DispatchError;
pub use server::{McpServer, ServerState};
pub use usage::{OpenAiUsageClient, UsageError, UsageProvider};
