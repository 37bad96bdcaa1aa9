use axum::{
    extract::{ws::Message, State, WebSocketUpgrade},
    response::Response,
};
use axum::extract::ws::WebSocket;
use tracing::{error, info};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::handlers;
use crate::session::{run_session, SessionState};
use crate::state::AppState;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> Response {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let session_uid = state.generate_session_uid();
    info!("New WebSocket connection: {}", session_uid);

    let (mut sender, mut receiver) = socket.split();

    let initial = SessionState::new(&state.config.session_config);

    // Initial snapshot so the client can render before the first event
    let first = handlers::session_update_message(&initial.snapshot());
    if let Err(e) = sender.send(Message::Text(first)).await {
        error!("Failed to send initial snapshot: {}", e);
        return;
    }

    let (event_tx, event_rx) = mpsc::channel(32);
    let (update_tx, mut update_rx) = mpsc::channel(32);

    let runner = tokio::spawn(run_session(
        initial,
        state.translator.clone(),
        event_rx,
        update_tx,
    ));
    state
        .session_tasks
        .insert(session_uid.clone(), runner.abort_handle());

    // Forward session snapshots to the client
    let forwarder = tokio::spawn(async move {
        while let Some(update) = update_rx.recv().await {
            let msg = handlers::session_update_message(&update);
            if sender.send(Message::Text(msg)).await.is_err() {
                break;
            }
        }
    });

    // Handle incoming messages
    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => match handlers::parse_client_message(&text) {
                Ok(Some(event)) => {
                    if event_tx.send(event).await.is_err() {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    error!("Error handling message: {}", e);
                }
            },
            Ok(Message::Close(_)) => {
                info!("Client {} disconnected", session_uid);
                break;
            }
            Err(e) => {
                error!("WebSocket error: {}", e);
                break;
            }
            _ => {}
        }
    }

    // Cleanup
    drop(event_tx);
    if let Some((_, handle)) = state.session_tasks.remove(&session_uid) {
        handle.abort();
    }
    forwarder.abort();
    info!("Cleaned up session {}", session_uid);
}
