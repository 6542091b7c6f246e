//! Clarifai provider client.
//!
//! Forwards image inputs (raw bytes or URLs) to Clarifai's `PostModelOutputs`
//! REST endpoint and reshapes the returned concepts into predictions.

pub mod client;
pub mod provider;
pub mod wire;

pub use client::{ClarifaiClient, ClarifaiCredentials};
pub use provider::AnalysisProvider;
