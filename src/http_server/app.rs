use std::{path::PathBuf, sync::Arc};

use axum::{
    Router,
    routing::get,
};
use color_eyre::eyre::{Context, eyre};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::database::Database;
use crate::http_server::{
    http_routes::{articles, singers, songs},
    state::AppState,
};

pub struct HttpServerConfig {
    pub port: u16,
    pub database: Database,
    pub media_root: PathBuf,
}

async fn root() -> &'static str {
    "muzine"
}

pub async fn start(config: HttpServerConfig) -> color_eyre::Result<()> {
    let app_state = Arc::new(AppState {
        db: Arc::new(config.database),
        media_root: config.media_root,
    });

    #[cfg(debug_assertions)]
    let cors_layer = CorsLayer::permissive();

    #[cfg(not(debug_assertions))]
    let cors_layer = CorsLayer::new();

    let app = Router::new()
        .route("/", get(root))
        .route(
            "/api/singer",
            get(singers::list_singers).post(singers::create_singer),
        )
        .route("/api/song", get(songs::list_songs).post(songs::create_song))
        .route("/api/preview", get(articles::preview_articles))
        .nest_service("/media", ServeDir::new(&app_state.media_root))
        .layer(ServiceBuilder::new().layer(cors_layer))
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .wrap_err_with(|| eyre!("Failed to bind to port {}", config.port))?;
    axum::serve(listener, app)
        .await
        .wrap_err("Failed to start HTTP server")?;

    Ok(())
}
