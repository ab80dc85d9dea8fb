//! series-mcp: MCP server for economic time-series data
//!
//! Serves series lookup, catalog browsing, metadata, and chart-rendering
//! tools over a JSON-RPC envelope, via stdio or HTTP/SSE.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use series_mcp::config;
use series_mcp::data::FixtureProvider;
use series_mcp::http;
use series_mcp::mcp::dispatch::Dispatcher;
use series_mcp::mcp::server::StdioServer;
use series_mcp::tools::build_registry;

/// Which channel the server listens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Transport {
    /// Newline-delimited JSON-RPC on stdin/stdout.
    Stdio,
    /// HTTP POST envelope endpoint plus an SSE keep-alive stream.
    Http,
}

/// MCP server for economic time-series data.
///
/// Exposes series lookup, catalog browsing, metadata, and chart-rendering
/// tools to MCP clients.
#[derive(Parser, Debug)]
#[command(name = "series-mcp")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Transport to serve on
    #[arg(short, long, value_enum, default_value_t = Transport::Stdio)]
    transport: Transport,

    /// Bind address for the HTTP transport (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Bind port for the HTTP transport (overrides config)
    #[arg(long)]
    port: Option<u16>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN, // Default to warn for unknown levels
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
///
/// Logs go to stderr; stdout belongs to the stdio transport.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Entry point for the series-mcp server.
fn main() -> ExitCode {
    let args = Args::parse();

    let mut cfg = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(host) = args.host {
        cfg.http.host = host;
    }
    if let Some(port) = args.port {
        cfg.http.port = port;
    }

    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        transport = ?args.transport,
        "Starting series-mcp server"
    );

    let provider = Arc::new(FixtureProvider::new());
    let registry = build_registry(provider);
    info!(tools = ?registry.names(), "Tool registry built");

    let dispatcher = Arc::new(Dispatcher::new(registry));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to create Tokio runtime");

    let result = match args.transport {
        Transport::Stdio => {
            info!("MCP server ready, waiting for client connection...");
            let mut server = StdioServer::new(dispatcher);
            runtime.block_on(server.run())
        }
        Transport::Http => runtime.block_on(http::serve(&cfg.http, dispatcher)),
    };

    match result {
        Ok(()) => {
            info!("Server shut down gracefully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Server error");
            ExitCode::FAILURE
        }
    }
}
