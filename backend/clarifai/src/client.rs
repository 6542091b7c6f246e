//! HTTP client for Clarifai model inference.

use anyhow::Context;
use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use tracing::info;

use snapsight_core::{Prediction, SnapsightError};

use crate::provider::AnalysisProvider;
use crate::wire::{self, OutputsRequest, OutputsResponse};

const API_BASE: &str = "https://api.clarifai.com";

/// How much of an error body to keep when relaying provider failures.
const ERROR_BODY_LIMIT: usize = 200;

/// Credentials and model coordinates for Clarifai calls.
#[derive(Debug, Clone)]
pub struct ClarifaiCredentials {
    pub pat: String,
    pub user_id: String,
    pub app_id: String,
    pub model_id: String,
    /// Optional pin to a specific model version.
    pub model_version_id: Option<String>,
}

/// Client for Clarifai's `PostModelOutputs` endpoint.
///
/// Holds a pooled `reqwest::Client`; one POST per analysis call, no retries.
pub struct ClarifaiClient {
    http: reqwest::Client,
    creds: ClarifaiCredentials,
    base_url: String,
}

impl ClarifaiClient {
    pub fn new(creds: ClarifaiCredentials) -> Self {
        Self {
            http: reqwest::Client::new(),
            creds,
            base_url: API_BASE.to_string(),
        }
    }

    /// Point the client at a different API host (for tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn outputs_url(&self) -> String {
        let c = &self.creds;
        match &c.model_version_id {
            Some(version) => format!(
                "{}/v2/users/{}/apps/{}/models/{}/versions/{}/outputs",
                self.base_url, c.user_id, c.app_id, c.model_id, version
            ),
            None => format!(
                "{}/v2/users/{}/apps/{}/models/{}/outputs",
                self.base_url, c.user_id, c.app_id, c.model_id
            ),
        }
    }

    async fn post_outputs(
        &self,
        request: OutputsRequest,
    ) -> Result<Vec<Prediction>, SnapsightError> {
        let resp = self
            .http
            .post(self.outputs_url())
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Key {}", self.creds.pat),
            )
            .json(&request)
            .send()
            .await
            .context("Clarifai request failed")?;

        let http_status = resp.status();
        if !http_status.is_success() {
            let mut body = resp.text().await.unwrap_or_default();
            body.truncate(ERROR_BODY_LIMIT);
            return Err(SnapsightError::Provider {
                code: http_status.as_u16() as u32,
                message: body,
            });
        }

        let parsed: OutputsResponse = resp
            .json()
            .await
            .context("Clarifai response was not valid JSON")?;
        if parsed.status.code != wire::STATUS_SUCCESS {
            return Err(SnapsightError::Provider {
                code: parsed.status.code,
                message: parsed.status.description,
            });
        }

        Ok(wire::into_predictions(parsed))
    }
}

#[async_trait]
impl AnalysisProvider for ClarifaiClient {
    async fn analyze_bytes(
        &self,
        bytes: &[u8],
        mime_type: &str,
    ) -> Result<Vec<Prediction>, SnapsightError> {
        info!(
            size = bytes.len(),
            mime = %mime_type,
            model = %self.creds.model_id,
            "Forwarding uploaded image to Clarifai"
        );
        let b64 = STANDARD.encode(bytes);
        self.post_outputs(OutputsRequest::from_base64(b64)).await
    }

    async fn analyze_url(&self, url: &str) -> Result<Vec<Prediction>, SnapsightError> {
        info!(url = %url, model = %self.creds.model_id, "Forwarding image URL to Clarifai");
        self.post_outputs(OutputsRequest::from_url(url)).await
    }
}
