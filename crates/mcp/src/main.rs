use anyhow::Result;
use clap::Parser;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use openai_cost_mcp::config::{DEFAULT_TIMEOUT_SECS, DEFAULT_USAGE_BASE_URL};
use openai_cost_mcp::{
    McpServer, OpenAiUsageClient, ServerConfig, UnknownModelLookup, UsageClientConfig,
};

#[derive(Parser, Debug)]
#[command(name = "openai-cost-mcp")]
#[command(version)]
#[command(about = "MCP server for OpenAI usage cost analysis over stdio")]
struct Args {
    #[arg(long, env = "OPENAI_COST_BASE_URL", default_value = DEFAULT_USAGE_BASE_URL, help = "Base URL of the usage API")]
    usage_base_url: String,

    #[arg(long, env = "OPENAI_COST_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS, help = "Usage API timeout in seconds")]
    timeout_secs: u64,

    #[arg(long, help = "Reject tool requests until initialize has been received")]
    require_initialize: bool,

    #[arg(long, help = "Answer unparsable lines with a parse error instead of dropping them")]
    reply_to_parse_errors: bool,

    #[arg(long, value_enum, default_value_t = UnknownModelLookup::FullTable, help = "Pricing lookup behavior for unknown models")]
    unknown_model: UnknownModelLookup,

    #[arg(long, env = "OPENAI_COST_LOG", default_value = "info", help = "Log filter used when RUST_LOG is unset")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // stdout carries protocol traffic; logs go to stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)))
        .init();

    let usage = OpenAiUsageClient::new(&UsageClientConfig::new(
        args.usage_base_url,
        args.timeout_secs,
    ));
    let config = ServerConfig {
        require_initialize: args.require_initialize,
        reply_to_parse_errors: args.reply_to_parse_errors,
        unknown_model: args.unknown_model,
    };
    let mut server = McpServer::with_config(config, Box::new(usage));

    tracing::info!("openai-cost-mcp starting");

    server.serve(io::stdin().lock(), io::stdout().lock())?;

    tracing::info!("stdin closed, shutting down");
    Ok(())
}
