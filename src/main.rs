use eduvoice::api::{create_router, shutdown_signal, AppState};
use eduvoice::infrastructure::{telemetry, AppConfig, DEFAULT_API_PORT};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing("api=debug,eduvoice=debug,tower_http=debug");

    let config = AppConfig::from_env(DEFAULT_API_PORT)?;
    let addr = config.server.socket_addr()?;
    let state = AppState::from_config(config)?;

    for (service, configured) in state.vendor_services() {
        if configured {
            info!(service, "service configured");
        } else {
            warn!(service, "service not configured; its route will answer 500");
        }
    }

    let app = create_router(state);

    info!("EduVoice API listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
