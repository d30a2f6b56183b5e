//! Design KB server
//!
//! Run with: design-kb-server [--mode mcp|rest]

use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use design_kb::config::{HttpConfig, ServerConfig, TransportMode};
use design_kb::http::HttpServer;
use design_kb::mcp::{DesignHandler, McpServer};
use design_kb::AppContext;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "design-kb-server")]
#[command(about = "Design knowledge base server (MCP over stdio or REST)")]
struct Args {
    /// Transport to serve (mcp or rest)
    #[arg(long, env = "DESIGN_KB_MODE", default_value = "mcp")]
    mode: TransportMode,

    /// Path of the JSON document
    #[arg(
        long,
        env = "DESIGN_KB_DATA_PATH",
        default_value = "~/.local/share/design-kb/design.json"
    )]
    data_path: String,

    /// REST listen host
    #[arg(long, env = "DESIGN_KB_HOST", default_value = "127.0.0.1")]
    host: String,

    /// REST listen port
    #[arg(long, env = "DESIGN_KB_PORT", default_value = "3000")]
    port: u16,

    /// Allowed CORS origin (* for any)
    #[arg(long, env = "DESIGN_KB_CORS_ORIGIN", default_value = "*")]
    cors_origin: String,

    /// Log output format
    #[arg(long, env = "DESIGN_KB_LOG_FORMAT", value_enum, default_value = "pretty")]
    log_format: LogFormat,
}

/// Logs go to stderr; stdout carries the MCP protocol
fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_format);

    // Expand ~ in path
    let data_path = shellexpand::tilde(&args.data_path).to_string();

    let config = ServerConfig {
        mode: args.mode,
        data_path,
        http: HttpConfig {
            host: args.host,
            port: args.port,
            cors_origin: args.cors_origin,
        },
    };
    config.validate()?;

    let ctx = AppContext::open(&config.data_path);
    tracing::info!(
        "Starting design-kb {} in {} mode (data: {})",
        design_kb::VERSION,
        config.mode,
        ctx.data_path()
    );

    match config.mode {
        TransportMode::Mcp => {
            let server = McpServer::new(DesignHandler::new(ctx));
            server.run().await?;
        }
        TransportMode::Rest => {
            HttpServer::new(ctx, config.http).start().await?;
        }
    }

    Ok(())
}
