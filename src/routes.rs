use axum::{
    extract::{Query, State},
    routing::get,
    Router,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::state::AppState;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        // WebSocket
        .route("/client-ws", get(crate::websocket::websocket_handler))
        // Health check
        .route("/api/health", get(health_check))
        // One-shot translation
        .route("/api/translate", get(translate))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok"
    }))
}

#[derive(Debug, Deserialize)]
struct TranslateParams {
    text: String,
    target: String,
}

/// One-shot translation endpoint. Translation failures surface as the
/// fallback string, never as an error status.
async fn translate(
    State(state): State<AppState>,
    Query(params): Query<TranslateParams>,
) -> Json<Value> {
    let translated = state
        .translator
        .translate(&params.text, &params.target)
        .await;
    Json(json!({
        "translated_text": translated
    }))
}
