use serde::{Deserialize, Serialize};

/// A single labeled prediction relayed from the vision model.
///
/// Serializes to exactly two fields regardless of what else the provider
/// attaches to a concept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub name: String,
    pub confidence: f32,
}

impl Prediction {
    /// Build a prediction, clamping confidence into `[0, 1]`.
    pub fn new(name: impl Into<String>, confidence: f32) -> Self {
        Self {
            name: name.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// Response body for both analysis endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub predictions: Vec<Prediction>,
}

/// Request body for `POST /analyze-image-url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeUrlRequest {
    pub url: String,
}

/// Payload returned by `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub service: String,
    pub version: String,
}
