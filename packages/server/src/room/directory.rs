//! Rooms keyed by name.
//!
//! Only the default room is reachable from the WebSocket endpoint today;
//! further rooms can be added without touching the coordinator.

use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::sync::RwLock;

use crate::domain::{CompletionService, MessageLogRepository, RoomName};

use super::coordinator::RoomCoordinator;

/// Dependencies every room is created with
#[derive(Clone)]
pub struct RoomSettings {
    pub message_log: Arc<dyn MessageLogRepository>,
    pub completion: Arc<dyn CompletionService>,
    pub relay_timeout: Duration,
}

/// Directory of live rooms
pub struct RoomDirectory {
    settings: RoomSettings,
    default_room: Arc<RoomCoordinator>,
    rooms: RwLock<HashMap<RoomName, Arc<RoomCoordinator>>>,
}

impl RoomDirectory {
    /// Create the directory with its default room.
    pub fn new(default_name: RoomName, settings: RoomSettings) -> Self {
        let default_room = Arc::new(Self::create_room(default_name.clone(), &settings));
        let mut rooms = HashMap::new();
        rooms.insert(default_name, default_room.clone());
        Self {
            settings,
            default_room,
            rooms: RwLock::new(rooms),
        }
    }

    pub fn default_room(&self) -> Arc<RoomCoordinator> {
        self.default_room.clone()
    }

    pub async fn get(&self, name: &RoomName) -> Option<Arc<RoomCoordinator>> {
        self.rooms.read().await.get(name).cloned()
    }

    /// Look a room up, creating it on first use.
    ///
    /// Extension point for named rooms: `/ws` only serves the default room,
    /// so nothing on the request path calls this yet.
    pub async fn get_or_create(&self, name: RoomName) -> Arc<RoomCoordinator> {
        if let Some(room) = self.get(&name).await {
            return room;
        }

        let mut rooms = self.rooms.write().await;
        rooms
            .entry(name.clone())
            .or_insert_with(|| {
                tracing::info!("Created room '{}'", name);
                Arc::new(Self::create_room(name, &self.settings))
            })
            .clone()
    }

    /// All rooms sorted by name.
    pub async fn list(&self) -> Vec<Arc<RoomCoordinator>> {
        let mut rooms: Vec<Arc<RoomCoordinator>> =
            self.rooms.read().await.values().cloned().collect();
        rooms.sort_by(|a, b| a.name().cmp(b.name()));
        rooms
    }

    fn create_room(name: RoomName, settings: &RoomSettings) -> RoomCoordinator {
        RoomCoordinator::new(
            name,
            settings.message_log.clone(),
            settings.completion.clone(),
            settings.relay_timeout,
        )
    }
}
