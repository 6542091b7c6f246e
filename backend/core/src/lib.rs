pub mod error;
pub mod types;

pub use error::SnapsightError;
pub use types::{AnalyzeResponse, AnalyzeUrlRequest, HealthReport, Prediction};
