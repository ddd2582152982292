//! Page configuration.
//!
//! A page may embed
//! `<script id="portal-config" type="application/json">{ ... }</script>`;
//! every field is optional. Without a `base_url` the API is assumed to live
//! on the page's own origin.

use edu_portal_client::{ClientConfig, RetryConfig};
use edu_portal_controllers::Locale;
use serde::Deserialize;
use std::time::Duration;

pub const CONFIG_ELEMENT_ID: &str = "portal-config";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub base_url: Option<String>,
    pub request_timeout_ms: u64,
    pub retry: RetryConfig,
    pub locale: Locale,
    /// `tracing` filter directive, e.g. `"debug"` or `"edu_portal_client=trace"`.
    pub log_filter: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            request_timeout_ms: 30_000,
            retry: RetryConfig::default(),
            locale: Locale::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl WebConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Raw JSON of the embedded config element, if the page has one.
    pub fn embedded_json() -> Option<String> {
        gloo_utils::document()
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|element| element.text_content())
            .filter(|json| !json.trim().is_empty())
    }

    pub fn client_config(&self, origin: &str) -> ClientConfig {
        ClientConfig::builder()
            .base_url(self.base_url.clone().unwrap_or_else(|| origin.to_string()))
            .request_timeout(Duration::from_millis(self.request_timeout_ms))
            .retry(self.retry.clone())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_page_origin() {
        let config = WebConfig::from_json("{}").unwrap();
        let client = config.client_config("https://school.example");

        assert_eq!(client.base_url, "https://school.example");
        assert_eq!(client.request_timeout, Duration::from_secs(30));
        assert_eq!(config.locale, Locale::Ru);
    }

    #[test]
    fn test_explicit_values() {
        let config = WebConfig::from_json(
            r#"{
                "base_url": "https://api.school.example",
                "request_timeout_ms": 5000,
                "retry": { "max_attempts": 1 },
                "locale": "en",
                "log_filter": "debug"
            }"#,
        )
        .unwrap();
        let client = config.client_config("https://school.example");

        assert_eq!(client.base_url, "https://api.school.example");
        assert_eq!(client.request_timeout, Duration::from_secs(5));
        assert_eq!(client.retry.max_attempts, 1);
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        assert!(WebConfig::from_json("{ locale: ").is_err());
        assert!(WebConfig::from_json(r#"{ "locale": "de" }"#).is_err());
    }
}
