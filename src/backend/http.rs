use async_trait::async_trait;
use reqwest::Client;

use crate::backend::traits::GenerationBackend;
use crate::config::BackendConfig;
use crate::error::{GenerationError, Result};
use crate::models::{GenerationRequest, GenerationResponse};

/// Shown when the endpoint rejects a request without saying why.
pub const FALLBACK_FAILURE_MESSAGE: &str = "Failed to generate image";

pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GenerationError::Config(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.resolved_base_url(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }

    fn build_headers(&self) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        headers
    }
}

#[async_trait]
impl GenerationBackend for HttpBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        log::info!(
            "Requesting {}x{} image from {}",
            request.width,
            request.height,
            self.endpoint()
        );

        let response = self
            .client
            .post(self.endpoint())
            .headers(self.build_headers())
            .json(request)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        if response.status().is_success() {
            response
                .json::<GenerationResponse>()
                .await
                .map_err(|e| GenerationError::Decoding(e.to_string()))
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::warn!("Generation endpoint returned {}", status);
            Err(GenerationError::Service(failure_message(body)))
        }
    }
}

/// Failure bodies are plain text and shown verbatim; only a fully empty
/// body falls back to the generic message.
fn failure_message(body: String) -> String {
    if body.is_empty() {
        FALLBACK_FAILURE_MESSAGE.to_string()
    } else {
        body
    }
}
