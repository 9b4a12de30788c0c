//! Test fixtures: an in-process server and a WebSocket test client.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use huddle_server::{
    build_router,
    domain::{CompletionError, CompletionService, Credential, RoomName},
    infrastructure::repository::InMemoryMessageLogRepository,
    room::{RoomDirectory, RoomSettings},
    ui::state::AppState,
};
use serde_json::{Value, json};
use tokio::{net::TcpStream, sync::Mutex, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub const ROOM_NAME: &str = "global-chat-room";

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Server running on an ephemeral port inside the test runtime
pub struct TestServer {
    addr: SocketAddr,
    pub message_log: Arc<InMemoryMessageLogRepository>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start(completion: Arc<dyn CompletionService>) -> Self {
        Self::start_with_timeout(completion, Duration::from_secs(5)).await
    }

    pub async fn start_with_timeout(
        completion: Arc<dyn CompletionService>,
        relay_timeout: Duration,
    ) -> Self {
        let message_log = Arc::new(InMemoryMessageLogRepository::new());
        let rooms = RoomDirectory::new(
            RoomName::new(ROOM_NAME.to_string()).unwrap(),
            RoomSettings {
                message_log: message_log.clone(),
                completion,
                relay_timeout,
            },
        );
        let app = build_router(Arc::new(AppState::new(rooms)));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            message_log,
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// Joined users and live connections of the default room
    pub async fn room_detail(&self) -> Value {
        reqwest::get(format!("{}/api/rooms/{}", self.base_url(), ROOM_NAME))
            .await
            .expect("Failed to send request")
            .json()
            .await
            .expect("Failed to parse JSON")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// WebSocket client speaking the chat envelope
pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    pub async fn connect(server: &TestServer) -> Self {
        let (stream, _) = connect_async(server.ws_url())
            .await
            .expect("Failed to connect");
        Self { stream }
    }

    pub async fn send_text(&mut self, text: &str) {
        self.stream
            .send(Message::text(text.to_string()))
            .await
            .expect("Failed to send");
    }

    pub async fn send_json(&mut self, value: Value) {
        self.send_text(&value.to_string()).await;
    }

    pub async fn join(&mut self, id: &str, name: &str, api_key: &str) {
        self.send_json(json!({
            "type": "join",
            "payload": {"id": id, "name": name, "apiKey": api_key}
        }))
        .await;
    }

    pub async fn say(&mut self, text: &str) {
        self.send_json(json!({"type": "message", "payload": text}))
            .await;
    }

    /// Next text frame as JSON
    pub async fn recv(&mut self) -> Value {
        loop {
            let frame = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .expect("Timed out waiting for event")
                .expect("Connection closed")
                .expect("WebSocket error");
            if let Message::Text(text) = frame {
                return serde_json::from_str(text.as_str()).expect("Invalid JSON event");
            }
        }
    }

    /// Next frame, which must have the given type
    pub async fn recv_type(&mut self, event_type: &str) -> Value {
        let event = self.recv().await;
        assert_eq!(event["type"], event_type, "unexpected event: {event}");
        event
    }

    /// Assert no text frame arrives within `wait`
    pub async fn expect_silence(&mut self, wait: Duration) {
        if let Ok(Some(Ok(Message::Text(text)))) =
            tokio::time::timeout(wait, self.stream.next()).await
        {
            panic!("unexpected event: {}", text.as_str());
        }
    }

    pub async fn close(mut self) {
        self.stream.close(None).await.ok();
    }
}

/// Completion service answering `"echo: <prompt>"` and recording the
/// credentials it was called with
#[derive(Default)]
pub struct EchoCompletion {
    pub credentials: Mutex<Vec<String>>,
}

#[async_trait]
impl CompletionService for EchoCompletion {
    async fn complete(&self, credential: &Credential, prompt: &str) -> Result<String, CompletionError> {
        self.credentials
            .lock()
            .await
            .push(credential.expose_secret().to_string());
        Ok(format!("echo: {prompt}"))
    }
}

/// Completion service rejecting every credential
pub struct FailingCompletion;

#[async_trait]
impl CompletionService for FailingCompletion {
    async fn complete(&self, _credential: &Credential, _prompt: &str) -> Result<String, CompletionError> {
        Err(CompletionError::Status {
            status: 401,
            message: "Incorrect API key provided".to_string(),
        })
    }
}

/// Completion service that never answers
pub struct StalledCompletion;

#[async_trait]
impl CompletionService for StalledCompletion {
    async fn complete(&self, _credential: &Credential, _prompt: &str) -> Result<String, CompletionError> {
        std::future::pending().await
    }
}

/// Connect and join, consuming the client's own `user-joined` event
pub async fn joined_client(server: &TestServer, id: &str, name: &str) -> TestClient {
    let mut client = TestClient::connect(server).await;
    client.join(id, name, &format!("sk-{id}")).await;
    let event = client.recv_type("user-joined").await;
    assert_eq!(event["payload"]["id"], id);
    client
}
