use crate::domain::extraction::ImagePayload;
use async_trait::async_trait;
use serde_json::Value;

/// Everything a provider needs for one single-shot vision call.
#[derive(Debug, Clone)]
pub struct InferenceRequest {
    pub flow: &'static str,
    pub instruction: String,
    pub output_schema: Value,
    pub image: ImagePayload,
}

impl InferenceRequest {
    /// Instruction text with the expected output shape spelled out, for
    /// providers that read the schema from the prompt.
    pub fn prompt_text(&self) -> String {
        format!(
            "{}\n\nOutput should be in JSON format and conform to the following schema:\n\n```\n{}\n```",
            self.instruction, self.output_schema
        )
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Model identifier, reported by the health endpoint.
    fn model(&self) -> &str;

    /// Issue exactly one inference call and return the model's JSON output.
    async fn generate(&self, request: InferenceRequest) -> anyhow::Result<Value>;
}
