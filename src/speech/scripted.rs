use std::collections::VecDeque;

use async_trait::async_trait;

use super::interface::{SpeechEvent, SpeechSource};

/// Queue-backed speech source, the in-process stand-in for a platform
/// recognizer.
pub struct ScriptedSpeechSource {
    events: VecDeque<SpeechEvent>,
}

impl ScriptedSpeechSource {
    pub fn new(events: Vec<SpeechEvent>) -> Self {
        Self {
            events: events.into(),
        }
    }
}

#[async_trait]
impl SpeechSource for ScriptedSpeechSource {
    async fn next_event(&mut self) -> Option<SpeechEvent> {
        self.events.pop_front()
    }
}
