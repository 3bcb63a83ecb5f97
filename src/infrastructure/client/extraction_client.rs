use crate::{
    application::{capture::workflow::PhotoExtractor, extract_fields::dto::ExtractionRequest},
    domain::extraction::{ExtractionFields, ExtractionOutcome},
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{error, instrument};

/// Calls a running gatehouse server's extraction endpoints.
///
/// Error bodies carry the same tagged-union shape as success bodies, so the
/// status code is not consulted. Transport failures collapse into the flow's
/// generic failure message.
#[derive(Clone)]
pub struct HttpExtractionClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpExtractionClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build extraction HTTP client: {}", e))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint<F: ExtractionFields>(&self) -> String {
        format!("{}/api/v1/extractions/{}", self.base_url, F::SLUG)
    }

    async fn post<F: ExtractionFields>(&self, photo: &str) -> anyhow::Result<ExtractionOutcome<F>> {
        let res = self
            .http
            .post(self.endpoint::<F>())
            .json(&ExtractionRequest {
                photo: photo.to_string(),
            })
            .send()
            .await?;
        Ok(res.json::<ExtractionOutcome<F>>().await?)
    }
}

#[async_trait]
impl<F: ExtractionFields> PhotoExtractor<F> for HttpExtractionClient {
    #[instrument(skip(self, photo), fields(flow = F::FLOW_NAME))]
    async fn extract(&self, photo: &str) -> ExtractionOutcome<F> {
        match self.post::<F>(photo).await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(error = %err, "extraction endpoint unreachable");
                ExtractionOutcome::failed(F::FAILURE_MESSAGE)
            }
        }
    }
}
