//! WebServer entry point

use std::net::{IpAddr, SocketAddr};

use clap::Parser;
use copywriter::GeneratorConfig;
use shared::{ProcessId, logging, process_info, process_warn};
use tokio_util::sync::CancellationToken;

use webserver::{RealCopyService, WebServer, WebServerResult, WebServerState};

/// HTTP server for campaign copy generation
#[derive(Parser, Debug)]
#[command(name = "webserver")]
#[command(about = "Serves POST /api/generate for A/B campaign copy")]
struct Args {
    /// Port for the HTTP server
    #[arg(long, env = "PORT", default_value = "5174")]
    port: u16,

    /// Interface to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> WebServerResult<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    ProcessId::init_webserver();
    logging::init_tracing_with_level(Some(&args.log_level));

    let config = GeneratorConfig::from_env()?;
    if !config.has_api_key() {
        process_warn!(
            ProcessId::current(),
            "⚠️ GEMINI_API_KEY is not set; /api/generate will return errors until it is"
        );
    }
    process_info!(ProcessId::current(), "🤖 Using model {}", config.model);

    // Cancelling on shutdown stops any request that is waiting out a retry backoff
    let shutdown = CancellationToken::new();
    let generator = config.build_cancellable_generator(shutdown.clone())?;

    let bind_address = SocketAddr::new(args.host, args.port);
    let state = WebServerState::new(bind_address, config.model.clone());
    let webserver = WebServer::new(state, RealCopyService::new(generator)).with_shutdown(shutdown);

    logging::log_startup(ProcessId::current(), &format!("webserver on http://{}", bind_address));
    webserver.run().await?;

    process_info!(ProcessId::current(), "✅ WebServer stopped gracefully");
    Ok(())
}
