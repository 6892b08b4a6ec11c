use axum::{
    http::{HeaderValue, Request},
    routing::get,
    Router,
};
use bl_core::{Error, Result};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::info;

pub mod config;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod state;

pub use config::{CorsOrigins, ServerConfig};
pub use error::ApiError;
pub use state::AppState;

fn cors_layer(origins: &CorsOrigins) -> Result<CorsLayer> {
    match origins {
        CorsOrigins::List(list) if list.iter().any(|o| o == "*") => {
            cors_layer(&CorsOrigins::Any)
        }
        CorsOrigins::Any => Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)),
        CorsOrigins::List(list) => {
            let origins = list
                .iter()
                .map(|origin| {
                    HeaderValue::from_str(origin)
                        .map_err(|e| Error::Config(format!("invalid origin {:?}: {}", origin, e)))
                })
                .collect::<Result<Vec<_>>>()?;
            // Credentials cannot be combined with wildcards, so mirror the request instead.
            Ok(CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true))
        }
    }
}

pub fn create_app(state: AppState, config: &ServerConfig) -> Result<Router> {
    let cors = cors_layer(&config.frontend_origins)?;

    Ok(Router::new()
        .route("/health", get(handlers::health))
        .route("/articles", get(handlers::list_articles))
        .route("/articles/:id", get(handlers::get_article))
        .route("/narratives", get(handlers::list_narratives))
        .route("/openapi.json", get(handlers::openapi))
        .route("/docs", get(handlers::swagger_ui))
        .route("/redoc", get(handlers::redoc))
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .fallback(handlers::fallback)
        .with_state(Arc::new(state))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        ))
}

/// Binds `config.bind_address()` and serves until the process is stopped.
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<()> {
    let app = create_app(state, config)?;
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    match &config.frontend_origins {
        CorsOrigins::Any => info!("🌐 CORS: allowing any origin"),
        CorsOrigins::List(origins) => info!("🌐 CORS: allowing {}", origins.join(", ")),
    }
    info!("🧠 Bias Lab API listening on http://{}", addr);
    info!("📖 Interactive docs at http://{}/docs", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

pub mod prelude {
    pub use bl_core::{ArticleStore, Error, Result};
    pub use crate::{AppState, ServerConfig};
}
