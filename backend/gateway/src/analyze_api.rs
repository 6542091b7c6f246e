//! Image analysis endpoints.
//!
//! Both handlers validate, forward to the provider, and reshape the result;
//! no image decoding happens locally.

use axum::{
    Json,
    extract::{Multipart, State},
};
use url::Url;

use snapsight_core::{AnalyzeResponse, AnalyzeUrlRequest};

use crate::auth::RequireAuth;
use crate::error::ApiError;
use crate::server::GatewayState;

/// Multipart field that carries the image payload.
const FILE_FIELD: &str = "file";

/// Handler for `POST /analyze-image` (multipart upload).
pub async fn analyze_image(
    State(state): State<GatewayState>,
    _auth: RequireAuth,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let mut upload: Option<(axum::body::Bytes, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let mime = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {e}")))?;
        upload = Some((data, mime));
        break;
    }

    let Some((data, mime)) = upload else {
        return Err(ApiError::bad_request("Missing file"));
    };
    if data.is_empty() {
        return Err(ApiError::bad_request("Empty file"));
    }

    let predictions = state.provider.analyze_bytes(&data, &mime).await?;
    Ok(Json(AnalyzeResponse { predictions }))
}

/// Handler for `POST /analyze-image-url` (JSON body).
pub async fn analyze_image_url(
    State(state): State<GatewayState>,
    _auth: RequireAuth,
    Json(req): Json<AnalyzeUrlRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let url = validate_image_url(&req.url)?;
    let predictions = state.provider.analyze_url(url.as_str()).await?;
    Ok(Json(AnalyzeResponse { predictions }))
}

/// Check that the request URL is well-formed http(s) before forwarding it.
/// The image itself is never fetched here.
fn validate_image_url(raw: &str) -> Result<Url, ApiError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ApiError::bad_request(format!("Invalid image URL: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::bad_request(format!(
            "Unsupported URL scheme: {}",
            url.scheme()
        )));
    }
    Ok(url)
}
