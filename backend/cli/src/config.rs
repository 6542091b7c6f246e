use anyhow::{Context, Result};

use snapsight_clarifai::ClarifaiCredentials;

/// Snapsight runtime configuration, loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// Static API bearer token; unset disables the auth gate
    pub bearer_token: Option<String>,
    /// Clarifai credentials and model coordinates
    pub clarifai: ClarifaiCredentials,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Provider credentials are required: the server refuses to start
    /// without them rather than failing on the first request.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bind_address: optional_env("SNAPSIGHT_BIND")
                .unwrap_or_else(|| "0.0.0.0".to_string()),
            port: port_from_env().unwrap_or(8080),
            bearer_token: optional_env("API_BEARER_TOKEN"),
            clarifai: ClarifaiCredentials {
                pat: require_env("CLARIFAI_PAT")?,
                user_id: require_env("CLARIFAI_USER_ID")?,
                app_id: require_env("CLARIFAI_APP_ID")?,
                model_id: require_env("CLARIFAI_MODEL_ID")?,
                model_version_id: optional_env("CLARIFAI_MODEL_VERSION_ID"),
            },
        })
    }
}

/// The configured HTTP port, if any.
pub fn port_from_env() -> Option<u16> {
    optional_env("SNAPSIGHT_PORT").and_then(|p| p.parse().ok())
}

/// Read an env var, treating unset, empty, and whitespace-only as absent.
fn optional_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn require_env(name: &str) -> Result<String> {
    optional_env(name).with_context(|| format!("{name} is not set"))
}
