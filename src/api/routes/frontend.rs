use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

use crate::api::state::AppState;
use crate::infrastructure::FrontendConfig;

/// `GET /` renders the EduVoice page.
pub fn template_routes(config: &FrontendConfig) -> Router<AppState> {
    Router::new().route_service("/", ServeFile::new(config.template_dir.join("index.html")))
}

/// `GET /` plus everything under `/static`. `ServeDir` answers 404 for
/// missing files and refuses paths that climb out of the directory.
pub fn static_routes(config: &FrontendConfig) -> Router<AppState> {
    Router::new()
        .route_service("/", ServeFile::new(config.static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(&config.static_dir))
}
