//! Handlers for the development host

use std::io::ErrorKind;

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ServerError;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "legalease-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Sample names are bare file names; anything that could leave the
/// sample directory is rejected.
pub fn validate_sample_name(name: &str) -> Result<&str, ServerError> {
    if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(ServerError::InvalidName(name.to_string()));
    }
    Ok(name)
}

/// Handler: GET /sample-docs/:filename
pub async fn handle_sample(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    let name = validate_sample_name(&filename)?;
    let path = state.sample_docs_dir.join(name);
    debug!("serving sample {}", path.display());

    match tokio::fs::read_to_string(&path).await {
        Ok(body) => Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body)),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            warn!("sample {} not found", name);
            Err(ServerError::SampleNotFound(name.to_string()))
        }
        Err(err) => Err(ServerError::Internal(err.to_string())),
    }
}
