use super::traits::{InferenceProvider, InferenceRequest};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Client for the Gemini `generateContent` REST endpoint.
///
/// Constructed once at startup and shared through application state. The
/// underlying HTTP client carries the only timeout applied to inference calls.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text { text: String },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build inference HTTP client: {}", e))?;

        Ok(Self {
            http,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl InferenceProvider for GeminiClient {
    fn model(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, request), fields(flow = request.flow, model = %self.model, image_bytes = request.image.byte_len()))]
    async fn generate(&self, request: InferenceRequest) -> anyhow::Result<Value> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![
                    Part::Text {
                        text: request.prompt_text(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: request.image.media_type(),
                            data: request.image.data(),
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: to_gemini_schema(&request.output_schema),
            },
        };

        let res = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Gemini request failed: {}", e))?;

        let status = res.status();
        if !status.is_success() {
            let detail = res.text().await.unwrap_or_default();
            warn!(%status, "Gemini returned an error status");
            anyhow::bail!(
                "Gemini returned {}: {}",
                status,
                detail.chars().take(512).collect::<String>()
            );
        }

        let parsed: GenerateContentResponse = res
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("Gemini response was not valid JSON: {}", e))?;

        let text = response_text(parsed)?;
        debug!(chars = text.len(), "Gemini returned structured output");

        serde_json::from_str(strip_code_fence(&text))
            .map_err(|e| anyhow::anyhow!("Model output is not JSON: {}", e))
    }
}

fn response_text(response: GenerateContentResponse) -> anyhow::Result<String> {
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        anyhow::bail!("Prompt blocked by provider: {}", reason);
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("Gemini returned no candidates"))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        anyhow::bail!(
            "Gemini returned an empty candidate (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        );
    }
    Ok(text)
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

/// Gemini's schema dialect is an OpenAPI subset with upper-case type names.
fn to_gemini_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(key, _)| key.as_str() != "additionalProperties" && key.as_str() != "$schema")
                .map(|(key, value)| {
                    let converted = match (key.as_str(), value) {
                        ("type", Value::String(t)) => Value::String(t.to_ascii_uppercase()),
                        ("properties", Value::Object(props)) => Value::Object(
                            props
                                .iter()
                                .map(|(name, prop)| (name.clone(), to_gemini_schema(prop)))
                                .collect(),
                        ),
                        ("items", item) => to_gemini_schema(item),
                        _ => value.clone(),
                    };
                    (key.clone(), converted)
                })
                .collect(),
        ),
        other => other.clone(),
    }
}
