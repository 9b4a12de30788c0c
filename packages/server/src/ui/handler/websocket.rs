//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::SessionIdFactory,
    infrastructure::dto::websocket::ClientEvent,
    room::{RoomCoordinator, RoomEventError},
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let room = state.rooms.default_room();
    ws.on_upgrade(move |socket| handle_socket(socket, room))
}

async fn handle_socket(socket: WebSocket, room: Arc<RoomCoordinator>) {
    let session_id = SessionIdFactory::generate();

    // Create a channel for this session to receive room events
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    room.connect(session_id.clone(), tx).await;

    let (mut sender, mut receiver) = socket.split();

    let recv_room = room.clone();
    let recv_session_id = session_id.clone();

    // Spawn a task to process this session's events in receipt order
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on session '{}': {}", recv_session_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let event = match serde_json::from_str::<ClientEvent>(text.as_str()) {
                        Ok(event) => event,
                        Err(e) => {
                            recv_room
                                .reject(&recv_session_id, &RoomEventError::Malformed(e.to_string()))
                                .await;
                            continue;
                        }
                    };

                    if let Err(e) = recv_room.handle_event(&recv_session_id, event).await {
                        tracing::debug!("Event from '{}' not applied: {}", recv_session_id, e);
                    }
                }
                Message::Binary(_) => {
                    recv_room
                        .reject(&recv_session_id, &RoomEventError::UnsupportedFrame)
                        .await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Session '{}' requested close", recv_session_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to forward room events to this client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other and wait for it to
    // wind down so no event of this session is still in flight at disconnect
    tokio::select! {
        _ = &mut recv_task => {
            send_task.abort();
            let _ = send_task.await;
        }
        _ = &mut send_task => {
            recv_task.abort();
            let _ = recv_task.await;
        }
    };

    room.disconnect(&session_id).await;
}
