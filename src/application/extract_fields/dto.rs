use serde::{Deserialize, Serialize};

/// Body of both extraction endpoints. A missing `photo` key is treated the
/// same as an empty one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionRequest {
    #[serde(default)]
    pub photo: String,
}
