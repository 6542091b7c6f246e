//! Gateway Authentication Module
//!
//! A single static bearer token compared verbatim against the
//! `Authorization` header. No sessions, no per-user identity; when no token
//! is configured the gate is disabled entirely.

use axum::{async_trait, extract::FromRequestParts, http::header, http::request::Parts};
use tracing::warn;

use crate::error::ApiError;
use crate::server::GatewayState;

/// Extractor that enforces the bearer-token gate on a route.
pub struct RequireAuth;

#[async_trait]
impl FromRequestParts<GatewayState> for RequireAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &GatewayState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.bearer_token.as_deref() else {
            // Auth gate disabled (no API_BEARER_TOKEN configured).
            return Ok(RequireAuth);
        };

        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|val| val.to_str().ok());

        match header_value.and_then(parse_bearer) {
            Some(token) if token == expected => Ok(RequireAuth),
            Some(_) => {
                warn!("Rejected request with invalid Bearer token");
                Err(ApiError::unauthorized("Invalid Bearer token"))
            }
            None => {
                warn!("Rejected request with missing Bearer token");
                Err(ApiError::unauthorized("Missing Bearer token"))
            }
        }
    }
}

/// Pull the token out of an `Authorization` header value.
///
/// The scheme match is case-insensitive and surrounding whitespace on the
/// token is ignored.
fn parse_bearer(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    if scheme.eq_ignore_ascii_case("bearer") {
        Some(token.trim())
    } else {
        None
    }
}
