//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use huddle_shared::time::timestamp_to_rfc3339;

use crate::{
    domain::RoomName,
    infrastructure::dto::http::{ParticipantDetailDto, RoomDetailDto, RoomSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let mut summaries = Vec::new();
    for room in state.rooms.list().await {
        summaries.push(RoomSummaryDto {
            name: room.name().to_string(),
            participants: room
                .participants()
                .await
                .into_iter()
                .map(|user| user.id.into_string())
                .collect(),
            connections: room.connection_count().await,
            created_at: timestamp_to_rfc3339(room.created_at().value()),
        });
    }

    Json(summaries)
}

/// Get room detail by name
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_name): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let name = RoomName::new(room_name).map_err(|_| StatusCode::NOT_FOUND)?;
    let room = state.rooms.get(&name).await.ok_or(StatusCode::NOT_FOUND)?;

    let room_detail = RoomDetailDto {
        name: room.name().to_string(),
        participants: room
            .participants()
            .await
            .iter()
            .map(|user| ParticipantDetailDto {
                id: user.id.as_str().to_string(),
                name: user.name.as_str().to_string(),
            })
            .collect(),
        connections: room.connection_count().await,
        created_at: timestamp_to_rfc3339(room.created_at().value()),
    };

    Ok(Json(room_detail))
}
