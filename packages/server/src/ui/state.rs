//! Server state shared by all handlers.

use crate::room::RoomDirectory;

/// Shared application state
pub struct AppState {
    /// Rooms keyed by name; `/ws` serves the default room
    pub rooms: RoomDirectory,
}

impl AppState {
    pub fn new(rooms: RoomDirectory) -> Self {
        Self { rooms }
    }
}
