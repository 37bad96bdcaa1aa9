use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::TranslationConfig;
use super::interface::{TranslateError, Translator};

/// Client for the Google Translate v2 REST endpoint
///
/// One GET per call, no retry, no caching. The API key is injected at
/// construction and never appears in configuration files.
pub struct GoogleTranslateClient {
    client: Client,
    endpoint: String,
    api_key: String,
    fallback_text: String,
}

#[derive(Debug, Deserialize)]
struct TranslateResponseBody {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

impl GoogleTranslateClient {
    pub fn new(config: &TranslationConfig, api_key: String) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
            fallback_text: config.fallback_text.clone(),
        })
    }

    /// Build the outbound GET request. The query serializer percent-encodes
    /// `q`, so decoding the built URL's query yields the input exactly.
    fn build_request(&self, text: &str, target_language: &str) -> Result<reqwest::Request, TranslateError> {
        self.client
            .get(&self.endpoint)
            .query(&[
                ("q", text),
                ("target", target_language),
                ("format", "text"),
                ("key", self.api_key.as_str()),
            ])
            .build()
            .map_err(|e| TranslateError::Encoding(e.to_string()))
    }
}

#[async_trait]
impl Translator for GoogleTranslateClient {
    async fn try_translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, TranslateError> {
        let request = self.build_request(text, target_language)?;
        debug!("Requesting translation to '{}'", target_language);

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| TranslateError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Remote(status.as_u16()));
        }

        let body: TranslateResponseBody = response
            .json()
            .await
            .map_err(|e| TranslateError::Parse(e.to_string()))?;

        body.data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or_else(|| TranslateError::Parse("empty translations array".to_string()))
    }

    fn fallback_text(&self) -> &str {
        &self.fallback_text
    }
}
