use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

use crate::config::SessionConfig;

/// Events fed into the session reducer
///
/// External events arrive from the speech and UI layers; `TranslationCompleted`
/// is fed back by the runner when a spawned translation finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    RecordingStarted,
    RecordingStopped,
    Utterance { text: String },
    TranslationCompleted { seq: u64, text: String },
    TargetLanguageChanged { language: String },
    LanguageToggled { language: String },
}

/// Instruction to run one translation off the event loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateCommand {
    pub seq: u64,
    pub text: String,
    pub target_language: String,
}

/// Snapshot sent to the client after every applied event. The client
/// renders these fields verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionUpdate {
    pub recognized_text: String,
    pub translated_text: String,
    pub recording: bool,
    pub target_language: String,
    pub enabled_languages: BTreeSet<String>,
}

/// Application state for one client session
///
/// Recognized text, translated text, the recording flag, and the language
/// selection live here; the reducer is the only writer. Sequence
/// bookkeeping guards against a stale translation overwriting a newer one.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub recognized_text: String,
    pub translated_text: String,
    pub recording: bool,
    pub target_language: String,
    pub enabled_languages: BTreeSet<String>,
    next_seq: u64,
    pending_seq: Option<u64>,
}

impl SessionState {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            recognized_text: String::new(),
            translated_text: String::new(),
            recording: false,
            target_language: config.default_target_language.clone(),
            enabled_languages: config.enabled_languages.clone(),
            next_seq: 0,
            pending_seq: None,
        }
    }

    pub fn snapshot(&self) -> SessionUpdate {
        SessionUpdate {
            recognized_text: self.recognized_text.clone(),
            translated_text: self.translated_text.clone(),
            recording: self.recording,
            target_language: self.target_language.clone(),
            enabled_languages: self.enabled_languages.clone(),
        }
    }

    /// Advance the state by one event. Returns a command when a
    /// translation has to be issued for the event.
    pub fn apply(&mut self, event: SessionEvent) -> Option<TranslateCommand> {
        match event {
            SessionEvent::RecordingStarted => {
                self.recording = true;
                None
            }
            SessionEvent::RecordingStopped => {
                self.recording = false;
                None
            }
            SessionEvent::Utterance { text } => self.apply_utterance(text),
            SessionEvent::TranslationCompleted { seq, text } => {
                if self.pending_seq == Some(seq) {
                    self.pending_seq = None;
                    self.translated_text = text;
                } else {
                    debug!("Dropping stale translation result (seq {})", seq);
                }
                None
            }
            SessionEvent::TargetLanguageChanged { language } => {
                self.target_language = language;
                None
            }
            SessionEvent::LanguageToggled { language } => {
                if !self.enabled_languages.remove(&language) {
                    self.enabled_languages.insert(language);
                }
                None
            }
        }
    }

    fn apply_utterance(&mut self, text: String) -> Option<TranslateCommand> {
        self.recognized_text = text.clone();

        if text.is_empty() {
            self.translated_text.clear();
            self.pending_seq = None;
            return None;
        }

        // Target outside the enabled set passes the utterance through
        // untranslated, as on the original language-filter toggle.
        if !self.enabled_languages.contains(&self.target_language) {
            self.translated_text = text;
            self.pending_seq = None;
            return None;
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending_seq = Some(seq);
        Some(TranslateCommand {
            seq,
            text,
            target_language: self.target_language.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> SessionState {
        SessionState::new(&SessionConfig::default())
    }

    #[test]
    fn defaults_from_config() {
        let s = state();
        assert_eq!(s.target_language, "zh");
        assert!(s.enabled_languages.contains("en"));
        assert!(!s.recording);
        assert_eq!(s.recognized_text, "");
        assert_eq!(s.translated_text, "");
    }

    #[test]
    fn recording_flag_follows_start_and_stop() {
        let mut s = state();
        assert!(s.apply(SessionEvent::RecordingStarted).is_none());
        assert!(s.recording);
        assert!(s.apply(SessionEvent::RecordingStopped).is_none());
        assert!(!s.recording);
    }

    #[test]
    fn utterance_issues_translate_command() {
        let mut s = state();
        let cmd = s
            .apply(SessionEvent::Utterance { text: "hello".to_string() })
            .unwrap();
        assert_eq!(cmd.text, "hello");
        assert_eq!(cmd.target_language, "zh");
        assert_eq!(s.recognized_text, "hello");
    }

    #[test]
    fn sequence_numbers_are_monotonic() {
        let mut s = state();
        let a = s.apply(SessionEvent::Utterance { text: "one".to_string() }).unwrap();
        let b = s.apply(SessionEvent::Utterance { text: "two".to_string() }).unwrap();
        assert!(b.seq > a.seq);
    }

    #[test]
    fn stale_completion_is_dropped() {
        let mut s = state();
        let a = s.apply(SessionEvent::Utterance { text: "one".to_string() }).unwrap();
        let b = s.apply(SessionEvent::Utterance { text: "two".to_string() }).unwrap();

        // Latest result lands first, then the stale one arrives.
        s.apply(SessionEvent::TranslationCompleted { seq: b.seq, text: "二".to_string() });
        assert_eq!(s.translated_text, "二");
        s.apply(SessionEvent::TranslationCompleted { seq: a.seq, text: "一".to_string() });
        assert_eq!(s.translated_text, "二");
    }

    #[test]
    fn latest_completion_wins_regardless_of_order() {
        let mut s = state();
        let a = s.apply(SessionEvent::Utterance { text: "one".to_string() }).unwrap();
        let b = s.apply(SessionEvent::Utterance { text: "two".to_string() }).unwrap();

        // Stale result arrives first and must not be displayed.
        s.apply(SessionEvent::TranslationCompleted { seq: a.seq, text: "一".to_string() });
        assert_eq!(s.translated_text, "");
        s.apply(SessionEvent::TranslationCompleted { seq: b.seq, text: "二".to_string() });
        assert_eq!(s.translated_text, "二");
    }

    #[test]
    fn empty_utterance_clears_translation_without_command() {
        let mut s = state();
        let cmd = s.apply(SessionEvent::Utterance { text: "hello".to_string() }).unwrap();
        let none = s.apply(SessionEvent::Utterance { text: String::new() });
        assert!(none.is_none());
        assert_eq!(s.translated_text, "");

        // The earlier in-flight translation may no longer land.
        s.apply(SessionEvent::TranslationCompleted { seq: cmd.seq, text: "你好".to_string() });
        assert_eq!(s.translated_text, "");
    }

    #[test]
    fn disabled_target_passes_text_through() {
        let mut s = state();
        s.apply(SessionEvent::LanguageToggled { language: "zh".to_string() });
        let cmd = s.apply(SessionEvent::Utterance { text: "hello".to_string() });
        assert!(cmd.is_none());
        assert_eq!(s.translated_text, "hello");
    }

    #[test]
    fn pass_through_invalidates_pending_translation() {
        let mut s = state();
        let cmd = s.apply(SessionEvent::Utterance { text: "hello".to_string() }).unwrap();

        s.apply(SessionEvent::LanguageToggled { language: "zh".to_string() });
        s.apply(SessionEvent::Utterance { text: "newer".to_string() });
        assert_eq!(s.translated_text, "newer");

        s.apply(SessionEvent::TranslationCompleted { seq: cmd.seq, text: "你好".to_string() });
        assert_eq!(s.translated_text, "newer");
    }

    #[test]
    fn language_toggle_flips_membership() {
        let mut s = state();
        assert!(s.enabled_languages.contains("ja"));
        s.apply(SessionEvent::LanguageToggled { language: "ja".to_string() });
        assert!(!s.enabled_languages.contains("ja"));
        s.apply(SessionEvent::LanguageToggled { language: "ja".to_string() });
        assert!(s.enabled_languages.contains("ja"));
    }

    #[test]
    fn target_change_replaces_code() {
        let mut s = state();
        s.apply(SessionEvent::TargetLanguageChanged { language: "en".to_string() });
        assert_eq!(s.target_language, "en");
        let cmd = s.apply(SessionEvent::Utterance { text: "bonjour".to_string() }).unwrap();
        assert_eq!(cmd.target_language, "en");
    }

    #[test]
    fn target_change_keeps_pending_translation_valid() {
        let mut s = state();
        let cmd = s.apply(SessionEvent::Utterance { text: "hello".to_string() }).unwrap();
        s.apply(SessionEvent::TargetLanguageChanged { language: "en".to_string() });
        s.apply(SessionEvent::TranslationCompleted { seq: cmd.seq, text: "你好".to_string() });
        assert_eq!(s.translated_text, "你好");
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut s = state();
        s.apply(SessionEvent::RecordingStarted);
        s.apply(SessionEvent::Utterance { text: "hi".to_string() });
        let update = s.snapshot();
        assert!(update.recording);
        assert_eq!(update.recognized_text, "hi");
        assert_eq!(update.target_language, "zh");
        assert_eq!(update.enabled_languages, s.enabled_languages);
    }
}
