use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::interface::{Provider, TranslateError, TranslationRequest, TranslationResponse};

const TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// Pass-through provider for Google's public web translation endpoint.
pub struct GoogleProvider {
    client: reqwest::Client,
}

impl GoogleProvider {
    /// `proxy` may be empty; otherwise all requests are routed through it.
    pub fn new(proxy: &str) -> Result<Self, TranslateError> {
        let mut builder = reqwest::Client::builder();
        if !proxy.is_empty() {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| TranslateError::Config(format!("invalid proxy URL: {e}")))?;
            builder = builder.proxy(proxy);
        }
        let client = builder
            .build()
            .map_err(|e| TranslateError::Config(e.to_string()))?;
        Ok(Self { client })
    }
}

/// The body is a nested array, e.g.
/// `[[["你好","hello",null,null,10]],null,"en",...]`: translated fragments
/// under index 0, the detected source language at index 2.
fn parse_body(value: &Value) -> TranslationResponse {
    let mut result = String::new();
    if let Some(sentences) = value.get(0).and_then(Value::as_array) {
        for sentence in sentences {
            if let Some(fragment) = sentence.get(0).and_then(Value::as_str) {
                result.push_str(fragment);
            }
        }
    }

    let detected = value
        .get(2)
        .and_then(Value::as_str)
        .unwrap_or("auto")
        .to_string();

    TranslationResponse {
        detected_source_lang: Some(detected),
        result,
    }
}

#[async_trait]
impl Provider for GoogleProvider {
    async fn translate(
        &self,
        request: TranslationRequest,
    ) -> Result<TranslationResponse, TranslateError> {
        let response = self
            .client
            .get(TRANSLATE_URL)
            .query(&[
                ("client", "gtx"),
                ("sl", request.from.as_str()),
                ("tl", request.to.as_str()),
                ("dt", "t"),
                ("q", request.text.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::UpstreamStatus(status.as_u16()));
        }

        let body = response.text().await?;
        debug!("google response: {}", body);

        let value: Value = serde_json::from_str(&body)?;
        Ok(parse_body(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_nested_array_body() {
        let value: Value = serde_json::from_str(
            r#"[[["你好","hello",null,null,10]],null,"en",null,null,null,null,[]]"#,
        )
        .unwrap();
        let response = parse_body(&value);
        assert_eq!(response.result, "你好");
        assert_eq!(response.detected_source_lang.as_deref(), Some("en"));
    }

    #[test]
    fn concatenates_sentence_fragments() {
        let value: Value = serde_json::from_str(
            r#"[[["Bonjour. ","Hello. "],["Au revoir.","Goodbye."]],null,"en"]"#,
        )
        .unwrap();
        let response = parse_body(&value);
        assert_eq!(response.result, "Bonjour. Au revoir.");
    }

    #[test]
    fn missing_detection_defaults_to_auto() {
        let value: Value = serde_json::from_str(r#"[[["hola","hello"]]]"#).unwrap();
        let response = parse_body(&value);
        assert_eq!(response.detected_source_lang.as_deref(), Some("auto"));
    }
}
