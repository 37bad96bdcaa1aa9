pub mod interface;
pub mod scripted;

pub use interface::{SpeechEvent, SpeechSource};
pub use scripted::ScriptedSpeechSource;

use tokio::sync::mpsc;

use crate::session::SessionEvent;

/// Forward a speech source into session events until it is exhausted or
/// the session is gone. End-of-speech and recognizer errors both clear
/// the recording flag.
pub async fn pump(mut source: impl SpeechSource, events: mpsc::Sender<SessionEvent>) {
    while let Some(event) = source.next_event().await {
        let session_event = match event {
            SpeechEvent::Started => SessionEvent::RecordingStarted,
            SpeechEvent::Utterance(text) => SessionEvent::Utterance { text },
            SpeechEvent::Ended | SpeechEvent::Failed => SessionEvent::RecordingStopped,
        };
        if events.send(session_event).await.is_err() {
            break;
        }
    }
}
