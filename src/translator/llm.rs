use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::interface::{Provider, TranslateError, TranslationRequest, TranslationResponse};

const DEFAULT_SYSTEM_PROMPT: &str = "You are a professional translation engine.";
const DEFAULT_USER_PROMPT: &str = "Translate to {{to}}. Keep untranslatable parts (like proper nouns, code) as is. *Output ONLY the translation*:\n{{text}}";

/// Configuration for an OpenAI-compatible chat-completion backend.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    /// Overrides the default system prompt when non-empty.
    pub system_prompt: Option<String>,
    /// Overrides the default user prompt when non-empty; supports the
    /// `{{to}}` and `{{text}}` placeholders.
    pub user_prompt: Option<String>,
}

/// Pass-through provider translating via an OpenAI-compatible chat API.
///
/// Never populates `detectedSourceLang`; the model handles the source
/// language on its own.
pub struct LlmProvider {
    config: LlmConfig,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

impl LlmProvider {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn system_prompt(&self) -> &str {
        self.config
            .system_prompt
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_SYSTEM_PROMPT)
    }

    fn render_user_prompt(&self, to: &str, text: &str) -> String {
        let template = self
            .config
            .user_prompt
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_USER_PROMPT);
        template.replace("{{to}}", to).replace("{{text}}", text)
    }
}

#[async_trait]
impl Provider for LlmProvider {
    async fn translate(
        &self,
        request: TranslationRequest,
    ) -> Result<TranslationResponse, TranslateError> {
        let body = json!({
            "model": self.config.model,
            "messages": [
                {"role": "system", "content": self.system_prompt()},
                {"role": "user", "content": self.render_user_prompt(&request.to, &request.text)},
            ],
        });

        let url = format!("{}/chat/completions", self.config.base_url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::UpstreamStatus(status.as_u16()));
        }

        let body = response.text().await?;
        let completion: ChatCompletionResponse = serde_json::from_str(&body)?;
        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| TranslateError::Upstream("no choices returned".to_string()))?;

        Ok(TranslationResponse {
            detected_source_lang: None,
            result: choice.message.content,
        })
    }
}
