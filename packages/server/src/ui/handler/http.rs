//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{infrastructure::dto::http::ConnectedClientsDto, ui::state::AppState};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Connected clients, sorted by id
pub async fn list_clients(State(state): State<Arc<AppState>>) -> Json<ConnectedClientsDto> {
    let clients = state
        .list_clients_usecase
        .execute()
        .await
        .into_iter()
        .map(|id| id.into_string())
        .collect();

    Json(ConnectedClientsDto { clients })
}
