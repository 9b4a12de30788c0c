//! Server assembly and main loop.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    ServerConfig, ServerError,
    domain::{CompletionService, MessageLogRepository, RoomName},
    infrastructure::{
        completion::OpenAiCompletionService,
        repository::{InMemoryMessageLogRepository, SqliteMessageLogRepository},
    },
    room::{RoomDirectory, RoomSettings},
};

use super::{
    handler::{get_room_detail, get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Build the HTTP/WebSocket router over `state`.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/rooms", get(get_rooms))
        .route("/api/rooms/{room_name}", get(get_room_detail))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the server until a shutdown signal arrives.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let message_log: Arc<dyn MessageLogRepository> = match &config.database_url {
        Some(url) => {
            let repository = SqliteMessageLogRepository::connect(url).await?;
            tracing::info!("Message log stored in {}", url);
            Arc::new(repository)
        }
        None => {
            tracing::warn!("No database URL configured; messages are kept in memory only");
            Arc::new(InMemoryMessageLogRepository::new())
        }
    };

    let completion: Arc<dyn CompletionService> = Arc::new(OpenAiCompletionService::new(
        &config.completion_base_url,
        config.completion_model.clone(),
        config.completion_timeout(),
    )?);

    let rooms = RoomDirectory::new(
        RoomName::new(config.room_name.clone())?,
        RoomSettings {
            message_log,
            completion,
            relay_timeout: config.completion_timeout(),
        },
    );
    let app = build_router(Arc::new(AppState::new(rooms)));

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;
    tracing::info!("Listening on {}", address);
    tracing::info!("WebSocket endpoint: ws://{}/ws", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    tracing::info!("Server stopped");
    Ok(())
}
