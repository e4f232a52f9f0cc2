use std::collections::BTreeMap;
use std::fs;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::translator::pool::BalanceStrategy;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderConfig>,
}

/// One entry under `providers`.
///
/// The entry name selects the backend kind: `mtranserver` and `google` are
/// built in, and any other name with `llm: true` becomes an
/// OpenAI-compatible chat backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub enable: bool,
    #[serde(default)]
    pub llm: bool,

    // mtranserver
    #[serde(default)]
    pub endpoints: Vec<String>,
    #[serde(default)]
    pub strategy: BalanceStrategy,

    // google
    pub proxy: Option<String>,

    // llm backends
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub system_prompt: Option<String>,
    pub user_prompt: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            providers: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_provider_table() {
        let yaml = r#"
host: 127.0.0.1
port: 9000
providers:
  mtranserver:
    enable: true
    endpoints:
      - http://127.0.0.1:8989
      - http://127.0.0.1:8990
    strategy: round_robin
  google:
    enable: true
    proxy: http://127.0.0.1:7890
  deepseek:
    enable: false
    llm: true
    base_url: https://api.deepseek.com/v1
    api_key: sk-test
    model: deepseek-chat
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);

        let mtran = &config.providers["mtranserver"];
        assert!(mtran.enable);
        assert_eq!(mtran.endpoints.len(), 2);
        assert_eq!(mtran.strategy, BalanceStrategy::RoundRobin);

        let google = &config.providers["google"];
        assert_eq!(google.proxy.as_deref(), Some("http://127.0.0.1:7890"));

        let deepseek = &config.providers["deepseek"];
        assert!(!deepseek.enable);
        assert!(deepseek.llm);
        assert_eq!(deepseek.model.as_deref(), Some("deepseek-chat"));
    }

    #[test]
    fn omitted_fields_use_defaults() {
        let config: Config = serde_yaml::from_str("providers: {}").unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert!(config.providers.is_empty());

        let provider: ProviderConfig = serde_yaml::from_str("enable: true").unwrap();
        assert!(provider.enable);
        assert!(!provider.llm);
        assert_eq!(provider.strategy, BalanceStrategy::LeastLoad);
        assert!(provider.endpoints.is_empty());
    }
}
