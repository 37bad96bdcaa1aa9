use async_trait::async_trait;

/// Event from a speech recognizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    /// The recognizer started listening.
    Started,
    /// A recognized block of speech text.
    Utterance(String),
    /// End of speech.
    Ended,
    /// The recognizer gave up on this capture.
    Failed,
}

/// Capability boundary over a platform speech recognizer
///
/// A lazy, finite sequence of recognition events; `None` means the
/// source is exhausted. The actual recognizer lives with the UI layer,
/// outside this service.
#[async_trait]
pub trait SpeechSource: Send {
    async fn next_event(&mut self) -> Option<SpeechEvent>;
}
