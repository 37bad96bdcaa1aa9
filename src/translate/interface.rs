use async_trait::async_trait;
use tracing::warn;

/// Failure kinds inside a translation call. All of them collapse into
/// the fallback string at the `translate` boundary; `try_translate`
/// exposes them for logging and tests.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("failed to build translation request: {0}")]
    Encoding(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("translation service returned status {0}")]
    Remote(u16),
    #[error("unexpected response body: {0}")]
    Parse(String),
}

/// Translation capability trait
///
/// The session core takes a translator as an injected dependency so
/// tests can substitute a scripted implementation.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target_language`, surfacing the failure kind.
    async fn try_translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, TranslateError>;

    /// String rendered in place of a translation when the call fails.
    fn fallback_text(&self) -> &str;

    /// Translate `text` into `target_language`, never failing.
    ///
    /// The result is suitable for direct assignment into a display field:
    /// any failure yields the fallback string. Empty input short-circuits
    /// to an empty result without a network call.
    async fn translate(&self, text: &str, target_language: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        match self.try_translate(text, target_language).await {
            Ok(translated) => translated,
            Err(e) => {
                warn!("Translation to '{}' failed: {}", target_language, e);
                self.fallback_text().to_string()
            }
        }
    }
}
