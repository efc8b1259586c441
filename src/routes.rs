use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::config::Config;
use crate::download::{self, DownloadError};
use crate::models::{DownloadRequest, DownloadResponse};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: reqwest::Client,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/download", post(download_endpoint))
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

async fn download_endpoint(
    State(state): State<AppState>,
    body: Result<Json<DownloadRequest>, JsonRejection>,
) -> Response {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::info!("rejected download request body: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"detail": rejection.body_text()})),
            )
                .into_response();
        }
    };
    let result = download::get_media(&state.client, &state.config, &req.url).await;
    match result.map(DownloadResponse::from_media) {
        Ok(Some(response)) => {
            tracing::info!("extracted {} media URL(s) from {}", response.media_urls.len(), req.url);
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(None) => error_response(&req.url, DownloadError::NotFound),
        Err(e) => error_response(&req.url, e),
    }
}

fn error_response(url: &str, error: DownloadError) -> Response {
    let (status, detail) = match &error {
        DownloadError::InvalidUrl(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        DownloadError::NotFound => (StatusCode::NOT_FOUND, "Media not found".to_string()),
        DownloadError::Fetch(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to fetch media".to_string(),
        ),
    };
    if status.is_server_error() {
        tracing::warn!("download failed for {}: {}", url, error);
    } else {
        tracing::info!("download rejected for {}: {}", url, error);
    }
    (status, Json(json!({"detail": detail}))).into_response()
}
