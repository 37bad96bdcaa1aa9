use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

use crate::translate::Translator;
use super::types::{SessionEvent, SessionState, SessionUpdate, TranslateCommand};

/// Drive one session: apply inbound events, emit a snapshot after every
/// applied event, and run issued translations off the event loop.
///
/// Returns the final state once the inbound channel closes and every
/// in-flight translation has completed. The loop itself never waits on
/// the network.
pub async fn run_session(
    mut state: SessionState,
    translator: Arc<dyn Translator>,
    mut events: mpsc::Receiver<SessionEvent>,
    updates: mpsc::Sender<SessionUpdate>,
) -> SessionState {
    let (done_tx, mut done_rx) = mpsc::channel::<(u64, String)>(16);
    let mut in_flight: usize = 0;
    let mut events_open = true;

    loop {
        tokio::select! {
            event = events.recv(), if events_open => {
                match event {
                    Some(event) => {
                        let command = state.apply(event);
                        if updates.send(state.snapshot()).await.is_err() {
                            debug!("Session update receiver dropped");
                        }
                        if let Some(command) = command {
                            in_flight += 1;
                            dispatch_translation(command, translator.clone(), done_tx.clone());
                        }
                    }
                    None => {
                        events_open = false;
                        if in_flight == 0 {
                            break;
                        }
                    }
                }
            }
            completed = done_rx.recv(), if in_flight > 0 => {
                if let Some((seq, text)) = completed {
                    in_flight -= 1;
                    state.apply(SessionEvent::TranslationCompleted { seq, text });
                    if updates.send(state.snapshot()).await.is_err() {
                        debug!("Session update receiver dropped");
                    }
                    if !events_open && in_flight == 0 {
                        break;
                    }
                }
            }
        }
    }

    state
}

fn dispatch_translation(
    command: TranslateCommand,
    translator: Arc<dyn Translator>,
    done_tx: mpsc::Sender<(u64, String)>,
) {
    tokio::spawn(async move {
        let TranslateCommand { seq, text, target_language } = command;
        let translated = translator.translate(&text, &target_language).await;
        let _ = done_tx.send((seq, translated)).await;
    });
}
