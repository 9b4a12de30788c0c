//! HTTP API response DTOs for the chat application.

use serde::{Deserialize, Serialize};

/// Room summary for list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub name: String,
    /// Ids of joined users
    pub participants: Vec<String>,
    /// Live connections, joined or not
    pub connections: usize,
    pub created_at: String, // ISO 8601
}

/// Room detail for detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub name: String,
    pub participants: Vec<ParticipantDetailDto>,
    pub connections: usize,
    pub created_at: String, // ISO 8601
}

/// Participant detail for room detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantDetailDto {
    pub id: String,
    pub name: String,
}
