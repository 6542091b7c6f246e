use async_trait::async_trait;
use snapsight_core::{Prediction, SnapsightError};

/// Abstraction over the vision inference backend.
///
/// The gateway only ever talks to this trait, so tests can swap in a stub
/// instead of the real Clarifai client.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Analyze a raw image payload.
    async fn analyze_bytes(
        &self,
        bytes: &[u8],
        mime_type: &str,
    ) -> Result<Vec<Prediction>, SnapsightError>;

    /// Analyze an image the provider fetches itself from a public URL.
    async fn analyze_url(&self, url: &str) -> Result<Vec<Prediction>, SnapsightError>;
}
