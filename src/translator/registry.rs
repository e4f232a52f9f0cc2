use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::Config;

use super::detect::LinguaDetector;
use super::google::GoogleProvider;
use super::interface::{Provider, TranslateError};
use super::llm::{LlmConfig, LlmProvider};
use super::mtran::MTranProvider;
use super::transport::HttpTransport;

/// Provider used when a request does not name one.
pub const DEFAULT_PROVIDER: &str = "mtranserver";

pub type ProviderMap = HashMap<String, Arc<dyn Provider>>;

/// Build the name -> provider map from configuration.
///
/// Disabled entries are skipped. A misconfigured enabled provider (e.g. an
/// empty endpoint pool) is fatal.
pub fn build_providers(config: &Config) -> Result<ProviderMap, TranslateError> {
    let mut providers: ProviderMap = HashMap::new();

    for (name, provider_config) in &config.providers {
        if !provider_config.enable {
            continue;
        }

        let provider: Arc<dyn Provider> = match name.as_str() {
            "mtranserver" => Arc::new(MTranProvider::new(
                provider_config.endpoints.clone(),
                provider_config.strategy,
                Arc::new(HttpTransport::new()),
                Arc::new(LinguaDetector::new()),
            )?),
            "google" => Arc::new(GoogleProvider::new(
                provider_config.proxy.as_deref().unwrap_or(""),
            )?),
            _ if provider_config.llm => Arc::new(LlmProvider::new(LlmConfig {
                base_url: provider_config.base_url.clone().unwrap_or_default(),
                api_key: provider_config.api_key.clone().unwrap_or_default(),
                model: provider_config.model.clone().unwrap_or_default(),
                system_prompt: provider_config.system_prompt.clone(),
                user_prompt: provider_config.user_prompt.clone(),
            })),
            _ => {
                warn!("ignoring provider {} with no known backend kind", name);
                continue;
            }
        };

        info!("Initialized provider: {}", name);
        providers.insert(name.clone(), provider);
    }

    Ok(providers)
}

/// Resolve a provider by name.
pub fn lookup<'a>(
    providers: &'a ProviderMap,
    name: &str,
) -> Result<&'a Arc<dyn Provider>, TranslateError> {
    providers
        .get(name)
        .ok_or_else(|| TranslateError::UnknownProvider(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderConfig;

    fn entry() -> ProviderConfig {
        ProviderConfig {
            enable: true,
            ..ProviderConfig::default()
        }
    }

    fn config(providers: Vec<(&str, ProviderConfig)>) -> Config {
        Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            providers: providers
                .into_iter()
                .map(|(name, p)| (name.to_string(), p))
                .collect(),
        }
    }

    #[test]
    fn builds_configured_providers() {
        let mtran = ProviderConfig {
            endpoints: vec!["http://127.0.0.1:8989".to_string()],
            ..entry()
        };
        let llm = ProviderConfig {
            llm: true,
            base_url: Some("https://api.example.com/v1".to_string()),
            model: Some("test-model".to_string()),
            ..entry()
        };
        let disabled = ProviderConfig::default();

        let providers = build_providers(&config(vec![
            ("mtranserver", mtran),
            ("deepseek", llm),
            ("google", disabled),
        ]))
        .unwrap();

        assert!(providers.contains_key("mtranserver"));
        assert!(providers.contains_key("deepseek"));
        assert!(!providers.contains_key("google"));
    }

    #[test]
    fn empty_endpoint_pool_is_fatal() {
        let result = build_providers(&config(vec![("mtranserver", entry())]));
        assert!(matches!(result, Err(TranslateError::Config(_))));
    }

    #[test]
    fn enabled_entry_without_a_backend_kind_is_skipped() {
        let providers = build_providers(&config(vec![("mystery", entry())])).unwrap();
        assert!(providers.is_empty());
    }

    #[test]
    fn lookup_reports_unknown_providers() {
        let providers = ProviderMap::new();
        let err = lookup(&providers, "nope").err().unwrap();
        assert!(matches!(err, TranslateError::UnknownProvider(_)));
    }
}
