use eduvoice::api::{create_chat_router, shutdown_signal, AppState};
use eduvoice::infrastructure::{telemetry, AppConfig, DEFAULT_CHAT_PORT};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing("chat=debug,eduvoice=debug,tower_http=debug");

    let config = AppConfig::from_env(DEFAULT_CHAT_PORT)?;
    let addr = config.server.socket_addr()?;
    let state = AppState::from_config(config)?;

    if state.agent.is_none() {
        warn!("FOUNDATION_AGENT_ENDPOINT or FOUNDATION_AGENT_API_KEY is not set; /api/chat will answer 500");
    }

    let app = create_chat_router(state);

    info!("Agent chat listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
