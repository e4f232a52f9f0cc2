use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single translation job.
///
/// `from` may be the sentinel `"auto"` to request source-language detection;
/// `to` is always a concrete language code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub from: String,
    pub to: String,
    pub text: String,
}

/// Normalized translation result.
///
/// `detected_source_lang` is present only when the provider actually ran
/// language detection for this request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationResponse {
    #[serde(
        rename = "detectedSourceLang",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub detected_source_lang: Option<String>,
    pub result: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchTranslationRequest {
    pub from: String,
    pub to: String,
    pub texts: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchTranslationResponse {
    #[serde(
        rename = "detectedSourceLang",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub detected_source_lang: Option<String>,
    pub results: Vec<String>,
}

/// Errors produced by translation providers.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("invalid provider configuration: {0}")]
    Config(String),

    #[error("request to endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("endpoint returned HTTP {0}")]
    UpstreamStatus(u16),

    #[error("malformed endpoint response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("all {attempts} endpoints failed, last error: {last}")]
    Exhausted {
        attempts: usize,
        last: Box<TranslateError>,
    },

    #[error("failed to translate to English: {0}")]
    PivotHop(Box<TranslateError>),

    #[error("unsupported provider: {0}")]
    UnknownProvider(String),

    #[error("upstream error: {0}")]
    Upstream(String),
}

/// Interface implemented by every translation backend.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Translate a single text.
    async fn translate(
        &self,
        request: TranslationRequest,
    ) -> Result<TranslationResponse, TranslateError>;

    /// Translate a batch of texts, one `translate` call per text, in input
    /// order. The first failing item fails the whole batch;
    /// `detectedSourceLang` reflects only the first item.
    async fn batch_translate(
        &self,
        request: BatchTranslationRequest,
    ) -> Result<BatchTranslationResponse, TranslateError> {
        let mut results = Vec::with_capacity(request.texts.len());
        let mut detected_source_lang = None;

        for (i, text) in request.texts.iter().enumerate() {
            let response = self
                .translate(TranslationRequest {
                    from: request.from.clone(),
                    to: request.to.clone(),
                    text: text.clone(),
                })
                .await?;
            if i == 0 {
                detected_source_lang = response.detected_source_lang;
            }
            results.push(response.result);
        }

        Ok(BatchTranslationResponse {
            detected_source_lang,
            results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detected_source_lang_is_omitted_when_absent() {
        let response = TranslationResponse {
            detected_source_lang: None,
            result: "hello".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"result":"hello"}"#
        );

        let response = TranslationResponse {
            detected_source_lang: Some("fr".to_string()),
            result: "hello".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"detectedSourceLang":"fr","result":"hello"}"#
        );
    }

    #[test]
    fn wire_response_without_detection_decodes() {
        let response: TranslationResponse =
            serde_json::from_str(r#"{"result":"你好"}"#).unwrap();
        assert_eq!(response.result, "你好");
        assert!(response.detected_source_lang.is_none());
    }
}
