//! HTTP screening hook.
//!
//! Posts the upload as base64 JSON to an NSFW-classification service and
//! maps the response onto a [`ScreeningVerdict`]. Screening is advisory:
//! any transport error, non-200 status or malformed body yields `Safe`
//! (fail-open), so an unavailable classifier never blocks uploads.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::ports::{ScreeningHook, ScreeningVerdict};

/// Screening service configuration.
#[derive(Clone)]
pub struct HttpScreeningConfig {
    /// Classification endpoint.
    api_url: String,

    /// Bearer key for the endpoint.
    api_key: String,

    /// Per-call timeout.
    timeout: Duration,
}

impl HttpScreeningConfig {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(5),
        }
    }

    /// Override the call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Serialize)]
struct ScreeningRequestBody {
    /// Base64-encoded upload bytes.
    image: String,
}

#[derive(Debug, Deserialize)]
struct ScreeningResponseBody {
    #[serde(default = "default_is_safe")]
    is_safe: bool,
    #[serde(default)]
    confidence: f32,
}

fn default_is_safe() -> bool {
    true
}

/// HTTP implementation of the screening hook.
pub struct HttpScreeningHook {
    config: HttpScreeningConfig,
    http_client: reqwest::Client,
}

impl HttpScreeningHook {
    pub fn new(config: HttpScreeningConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_default();
        Self {
            config,
            http_client,
        }
    }

    async fn classify(&self, bytes: &[u8]) -> Option<ScreeningResponseBody> {
        let body = ScreeningRequestBody {
            image: BASE64.encode(bytes),
        };

        let response = self
            .http_client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "screening service unreachable, failing open");
            })
            .ok()?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "screening service error, failing open");
            return None;
        }

        response
            .json::<ScreeningResponseBody>()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "screening response unreadable, failing open");
            })
            .ok()
    }
}

#[async_trait]
impl ScreeningHook for HttpScreeningHook {
    async fn assess(&self, bytes: &[u8], _content_type: &str) -> ScreeningVerdict {
        match self.classify(bytes).await {
            Some(result) if !result.is_safe => ScreeningVerdict::Unsafe {
                confidence: result.confidence,
            },
            _ => ScreeningVerdict::Safe,
        }
    }
}
