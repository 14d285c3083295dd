//! AI tutor relay server binary.
//!
//! Serves `POST /api/Tutor/ask` and `GET /api/health`, forwarding questions
//! to Gemini.

use clap::Parser;
use tracing::{info, warn};
use tutor_api::AppState;
use tutor_api::config::{ApiConfig, DEFAULT_BIND_ADDR};
use tutor_core::config::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, RelayConfig};

/// CLI arguments for the relay server.
#[derive(Parser, Debug)]
#[command(name = "tutor_api_server", about = "AI tutor relay server", version)]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
    bind_addr: String,

    /// Gemini API key. Requests are answered with a diagnostic when unset.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,

    /// Gemini REST base URL.
    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_GEMINI_BASE_URL)]
    gemini_base_url: String,

    /// Gemini model.
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    gemini_model: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tutor_api=debug,tutor_core=debug".into()),
        )
        .init();

    let args = Args::parse();

    let config = ApiConfig {
        bind_addr: args.bind_addr,
        relay: RelayConfig {
            api_key: args.gemini_api_key,
            base_url: args.gemini_base_url,
            model: args.gemini_model,
        },
    };

    if config.relay.api_key().is_none() {
        warn!("GEMINI_API_KEY is not set; questions will be answered with a configuration diagnostic");
    }

    info!(
        bind_addr = %config.bind_addr,
        model = %config.relay.model,
        "starting tutor_api_server"
    );

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;

    let app = tutor_api::router(AppState::from_config(&config));

    info!(addr = %local_addr, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;

    Ok(())
}
