use serde_json::{json, Value};
use tracing::warn;

use crate::session::{SessionEvent, SessionUpdate};

/// Parse one inbound client message into a session event.
///
/// Unknown message types are logged and ignored; malformed JSON or a
/// missing required field is an error.
pub fn parse_client_message(text: &str) -> anyhow::Result<Option<SessionEvent>> {
    let msg: Value = serde_json::from_str(text)?;
    let msg_type = msg.get("type").and_then(|v| v.as_str());

    let event = match msg_type {
        Some("utterance") => {
            let text = require_str(&msg, "text")?;
            Some(SessionEvent::Utterance { text })
        }
        Some("speech-start") => Some(SessionEvent::RecordingStarted),
        Some("speech-end") | Some("speech-error") => Some(SessionEvent::RecordingStopped),
        Some("set-target") => {
            let language = require_str(&msg, "language")?;
            Some(SessionEvent::TargetLanguageChanged { language })
        }
        Some("toggle-language") => {
            let language = require_str(&msg, "language")?;
            Some(SessionEvent::LanguageToggled { language })
        }
        other => {
            warn!("Unknown message type: {:?}", other);
            None
        }
    };
    Ok(event)
}

fn require_str(msg: &Value, field: &str) -> anyhow::Result<String> {
    msg.get(field)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| anyhow::anyhow!("message missing '{}' field", field))
}

/// Serialize a session snapshot as the outbound `session-update` message.
pub fn session_update_message(update: &SessionUpdate) -> String {
    json!({
        "type": "session-update",
        "recognized_text": update.recognized_text,
        "translated_text": update.translated_text,
        "recording": update.recording,
        "target_language": update.target_language,
        "enabled_languages": update.enabled_languages,
    })
    .to_string()
}
