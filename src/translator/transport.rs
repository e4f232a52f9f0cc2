use async_trait::async_trait;
use serde::Serialize;

use super::interface::{TranslateError, TranslationResponse};

/// JSON body accepted by an MTranServer-compatible `/translate` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct WirePayload<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub text: &'a str,
}

/// Network capability used by the pooled provider to reach one endpoint.
#[async_trait]
pub trait TranslateTransport: Send + Sync {
    /// POST a payload to `{endpoint}/translate` and decode the response.
    async fn post(
        &self,
        endpoint: &str,
        payload: WirePayload<'_>,
    ) -> Result<TranslationResponse, TranslateError>;
}

/// reqwest-backed transport used in production.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl TranslateTransport for HttpTransport {
    async fn post(
        &self,
        endpoint: &str,
        payload: WirePayload<'_>,
    ) -> Result<TranslationResponse, TranslateError> {
        let url = format!("{}/translate", endpoint);
        let response = self.client.post(&url).json(&payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::UpstreamStatus(status.as_u16()));
        }

        // Decode from the raw body so malformed responses surface as a
        // decode failure rather than a generic client error.
        let body = response.text().await?;
        let parsed: TranslationResponse = serde_json::from_str(&body)?;
        Ok(parsed)
    }
}
