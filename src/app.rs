use std::net::SocketAddr;

use axum::{
    extract::State,
    http::{HeaderName, HeaderValue},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::state::AppState;
use crate::{auth, donors, frontend, hospitals, recipients, users};

/// Tells clients which storage backend served the response.
pub const STORAGE_MODE_HEADER: &str = "x-storage-mode";

pub fn build_app(state: AppState) -> Router {
    let storage_mode = HeaderValue::from_static(state.storage.kind().as_str());

    Router::new()
        .nest(
            "/api",
            Router::new()
                .merge(auth::router())
                .merge(users::router())
                .merge(donors::router())
                .merge(recipients::router())
                .merge(hospitals::router()),
        )
        .route("/health", get(health))
        .merge(frontend::router())
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(STORAGE_MODE_HEADER),
            storage_mode,
        ))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "status": "ok", "storage": state.storage.kind().as_str() }))
}

pub async fn serve(app: Router, config: &AppConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
