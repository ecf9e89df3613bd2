mod config;
mod server;

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use advisor_core::gemini::{GeminiClient, GeminiConfig};
use advisor_core::rubric;

use config::ServerConfig;
use server::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(rubric = rubric::RUBRIC_VERSION, "starting advisor-server");

    // 1. Load server config from environment
    let config = ServerConfig::from_env();

    // 2. Configure the Gemini client. A missing credential is not fatal at
    //    startup: the analyze endpoint reports it per request.
    let gemini = match GeminiConfig::from_env() {
        Ok(gemini_config) => {
            info!(
                model = %gemini_config.model,
                base_url = %gemini_config.base_url,
                timeout_ms = gemini_config.default_timeout.as_millis(),
                "gemini client configured"
            );
            Some(Arc::new(GeminiClient::new(gemini_config)?))
        }
        Err(e) => {
            warn!(error = %e, "model credential missing; /api/analyze will answer 500");
            None
        }
    };

    // 3. Serve
    let app = server::create_router(AppState { gemini });
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
