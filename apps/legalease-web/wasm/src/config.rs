//! Controller configuration
//!
//! Defaults match the stock page and a backend on `127.0.0.1:5000`. A page
//! can override them with `data-*` attributes on `<body>`, or the host script
//! can pass a JSON object to `mountWithConfig`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// DOM ids of the widgets the controller drives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub drop_area: String,
    pub file_input: String,
    pub analyze_button: String,
    pub preview: String,
    pub busy_indicator: String,
    pub doc_name: String,
    pub chat_container: String,
    pub chat_input: String,
    pub send_button: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            drop_area: "dropArea".to_string(),
            file_input: "fileInput".to_string(),
            analyze_button: "analyzeBtn".to_string(),
            preview: "docPreview".to_string(),
            busy_indicator: "processingIndicator".to_string(),
            doc_name: "docName".to_string(),
            chat_container: "chatContainer".to_string(),
            chat_input: "userInput".to_string(),
            send_button: "sendBtn".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Origin of the analysis backend, without a trailing `/api`
    pub api_base: String,
    /// Path prefix of the canned sample documents
    pub sample_docs_base: String,
    /// Pause between loading a sample and analyzing it
    pub settle_delay_ms: u32,
    /// Selector of the sample document buttons
    pub sample_button_selector: String,
    pub ids: ElementIds,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: "http://127.0.0.1:5000".to_string(),
            sample_docs_base: "/sample-docs".to_string(),
            settle_delay_ms: 500,
            sample_button_selector: ".sample-doc-btn".to_string(),
            ids: ElementIds::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        serde_json::from_str(json).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Apply `data-api-base`, `data-sample-docs-base` and
    /// `data-settle-delay-ms` overrides. `lookup` receives dataset keys.
    pub fn with_dataset<F>(mut self, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = lookup("apiBase") {
            self.api_base = base;
        }
        if let Some(base) = lookup("sampleDocsBase") {
            self.sample_docs_base = base;
        }
        if let Some(delay) = lookup("settleDelayMs") {
            self.settle_delay_ms = delay
                .trim()
                .parse()
                .map_err(|_| AppError::Config(format!("settle delay '{}' is not a number", delay)))?;
        }
        Ok(self)
    }

    pub fn upload_url(&self) -> String {
        format!("{}/api/upload", self.api_base.trim_end_matches('/'))
    }

    pub fn chat_url(&self) -> String {
        format!("{}/api/chat", self.api_base.trim_end_matches('/'))
    }

    pub fn sample_url(&self, filename: &str) -> String {
        format!(
            "{}/{}",
            self.sample_docs_base.trim_end_matches('/'),
            filename.trim_start_matches('/')
        )
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.settle_delay_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_urls() {
        let config = AppConfig::default();
        assert_eq!(config.upload_url(), "http://127.0.0.1:5000/api/upload");
        assert_eq!(config.chat_url(), "http://127.0.0.1:5000/api/chat");
        assert_eq!(config.sample_url("lease.txt"), "/sample-docs/lease.txt");
        assert_eq!(config.settle_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_trailing_slashes() {
        let config = AppConfig {
            api_base: "https://legal.example/".to_string(),
            sample_docs_base: "/static/samples/".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.chat_url(), "https://legal.example/api/chat");
        assert_eq!(config.sample_url("nda.txt"), "/static/samples/nda.txt");
    }

    #[test]
    fn test_partial_json() {
        let config = AppConfig::from_json(r#"{"api_base": "", "ids": {"preview": "out"}}"#).unwrap();
        assert_eq!(config.upload_url(), "/api/upload");
        assert_eq!(config.ids.preview, "out");
        assert_eq!(config.ids.chat_input, "userInput");
        assert_eq!(config.settle_delay_ms, 500);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            AppConfig::from_json("{"),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_dataset_overrides() {
        let config = AppConfig::default()
            .with_dataset(|key| match key {
                "apiBase" => Some("http://localhost:8000".to_string()),
                "settleDelayMs" => Some(" 0 ".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.chat_url(), "http://localhost:8000/api/chat");
        assert_eq!(config.sample_docs_base, "/sample-docs");
        assert_eq!(config.settle_delay_ms, 0);
    }

    #[test]
    fn test_dataset_bad_delay() {
        let result = AppConfig::default().with_dataset(|key| {
            (key == "settleDelayMs").then(|| "soon".to_string())
        });
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
