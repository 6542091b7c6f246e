//! Wire format for Clarifai's `PostModelOutputs` call.
//!
//! Typed serde structs for the subset of the v2 API this service uses:
//! one image input in, a status plus a list of concepts out.

use serde::{Deserialize, Serialize};

use snapsight_core::Prediction;

/// Clarifai's "everything went fine" status code.
pub const STATUS_SUCCESS: u32 = 10000;

#[derive(Debug, Serialize)]
pub struct OutputsRequest {
    pub inputs: Vec<Input>,
}

impl OutputsRequest {
    /// Request carrying a single base64-encoded image.
    pub fn from_base64(b64: String) -> Self {
        Self {
            inputs: vec![Input {
                data: InputData {
                    image: ImageSource {
                        base64: Some(b64),
                        url: None,
                    },
                },
            }],
        }
    }

    /// Request referencing an image by URL; Clarifai fetches it server-side.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            inputs: vec![Input {
                data: InputData {
                    image: ImageSource {
                        base64: None,
                        url: Some(url.into()),
                    },
                },
            }],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Input {
    pub data: InputData,
}

#[derive(Debug, Serialize)]
pub struct InputData {
    pub image: ImageSource,
}

#[derive(Debug, Serialize)]
pub struct ImageSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OutputsResponse {
    pub status: Status,
    #[serde(default)]
    pub outputs: Vec<Output>,
}

#[derive(Debug, Deserialize)]
pub struct Status {
    pub code: u32,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Output {
    #[serde(default)]
    pub data: OutputData,
}

#[derive(Debug, Default, Deserialize)]
pub struct OutputData {
    #[serde(default)]
    pub concepts: Vec<Concept>,
}

#[derive(Debug, Deserialize)]
pub struct Concept {
    #[serde(default)]
    pub name: String,
    /// Model confidence for this concept, nominally in `[0, 1]`.
    #[serde(default)]
    pub value: f32,
}

/// Reshape a successful outputs response into the public prediction list.
///
/// Unnamed concepts are dropped; confidences are clamped so the `[0, 1]`
/// invariant holds even for malformed provider payloads.
pub fn into_predictions(resp: OutputsResponse) -> Vec<Prediction> {
    resp.outputs
        .into_iter()
        .flat_map(|output| output.data.concepts)
        .filter(|concept| !concept.name.is_empty())
        .map(|concept| Prediction::new(concept.name, concept.value))
        .collect()
}
