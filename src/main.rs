// src/main.rs
mod config;
mod manifest;
mod qr;
mod types;

use axum::{
    extract::{rejection::FormRejection, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    routing::{get, post},
    Form, Router,
};
use chrono::Utc;
use std::{path::PathBuf, sync::Arc, time::Duration as StdDuration};
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::{DefaultOnFailure, TraceLayer},
};
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use config::Config;
use qr::{PngQrEncoder, QrEncoder, QR_LEVEL, QR_SIZE};
use types::*;

const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

#[derive(Clone)]
struct AppState {
    encoder: Arc<dyn QrEncoder>,
    index_template: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let state = AppState {
        encoder: Arc::new(PngQrEncoder),
        index_template: config.index_template.clone(),
    };

    let addr = config.addr();
    info!("ota-manifest listening on {addr}");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/generate", post(generate))
        .route("/qrcode", post(qrcode))
        .route("/", get(index))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(StdDuration::from_secs(10)))
        // handlers already log their own 5xx causes
        .layer(TraceLayer::new_for_http().on_failure(DefaultOnFailure::new().level(Level::DEBUG)))
}

// ---------- API HANDLERS ---------- //

async fn generate(
    form: Result<Form<ManifestReq>, FormRejection>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let Form(req) = form.map_err(internal)?;
    req.validate()?;

    let body = manifest::render(&req).map_err(internal)?;
    let last_modified = Utc::now().format(HTTP_DATE).to_string();

    Ok((
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("Attachment; filename={}", manifest::FILENAME),
            ),
            (header::LAST_MODIFIED, last_modified),
        ],
        body,
    ))
}

async fn qrcode(
    State(state): State<AppState>,
    form: Result<Form<QrReq>, FormRejection>,
) -> Result<Html<String>, (StatusCode, String)> {
    let Form(req) = form.map_err(internal)?;
    req.validate()?;

    let uri = qr::install_uri(&req.manifest);
    let png = state
        .encoder
        .encode(&uri, QR_LEVEL, QR_SIZE)
        .map_err(|e| internal(format!("qr encoding failed: {e:#}")))?;

    Ok(Html(qr::html_page(&png)))
}

/// Serves the landing page; the whole file is read before anything is sent.
async fn index(State(state): State<AppState>) -> Result<Html<String>, (StatusCode, String)> {
    let page = tokio::fs::read_to_string(&state.index_template)
        .await
        .map_err(|e| internal(format!("template {}: {e}", state.index_template.display())))?;
    Ok(Html(page))
}

fn bad(s: &'static str) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, format!("missing/invalid {}", s))
}
fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    error!("{e}");
    (StatusCode::INTERNAL_SERVER_ERROR, String::new())
}
