//! Command-line and environment configuration for the server.

use std::time::Duration;

use clap::Parser;

use crate::infrastructure::completion::{DEFAULT_COMPLETION_BASE_URL, DEFAULT_COMPLETION_MODEL};

/// Default room every WebSocket connection joins
pub const DEFAULT_ROOM_NAME: &str = "global-chat-room";

/// Huddle chat server
#[derive(Debug, Clone, Parser)]
#[command(name = "huddle-server", version, about)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "HUDDLE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind
    #[arg(short, long, env = "HUDDLE_PORT", default_value_t = 8080)]
    pub port: u16,

    /// SQLite database URL for the message log (e.g. `sqlite://huddle.db`).
    /// Messages are kept in memory only when omitted.
    #[arg(long, env = "HUDDLE_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Base URL of the OpenAI-compatible completion API
    #[arg(long, env = "HUDDLE_COMPLETION_BASE_URL", default_value = DEFAULT_COMPLETION_BASE_URL)]
    pub completion_base_url: String,

    /// Model requested from the completion API
    #[arg(long, env = "HUDDLE_COMPLETION_MODEL", default_value = DEFAULT_COMPLETION_MODEL)]
    pub completion_model: String,

    /// Upper bound on a single completion call, in seconds (at least 1)
    #[arg(
        long,
        env = "HUDDLE_COMPLETION_TIMEOUT_SECS",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub completion_timeout_secs: u64,

    /// Name of the room served at `/ws`
    #[arg(long, env = "HUDDLE_ROOM_NAME", default_value = DEFAULT_ROOM_NAME)]
    pub room_name: String,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn completion_timeout(&self) -> Duration {
        Duration::from_secs(self.completion_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    /// Declared default of an argument, independent of `HUDDLE_*` variables
    /// in the test environment
    fn declared_default(id: &str) -> String {
        let command = ServerConfig::command();
        let arg = command
            .get_arguments()
            .find(|arg| arg.get_id().as_str() == id)
            .unwrap();
        arg.get_default_values()[0].to_string_lossy().into_owned()
    }

    #[test]
    fn test_defaults() {
        // テスト項目: 各引数のデフォルト値が宣言どおりである
        // then (期待する結果):
        assert_eq!(declared_default("host"), "127.0.0.1");
        assert_eq!(declared_default("port"), "8080");
        assert_eq!(declared_default("completion_base_url"), DEFAULT_COMPLETION_BASE_URL);
        assert_eq!(declared_default("completion_model"), DEFAULT_COMPLETION_MODEL);
        assert_eq!(declared_default("completion_timeout_secs"), "30");
        assert_eq!(declared_default("room_name"), DEFAULT_ROOM_NAME);
        let command = ServerConfig::command();
        let database_url = command
            .get_arguments()
            .find(|arg| arg.get_id().as_str() == "database_url")
            .unwrap();
        assert!(database_url.get_default_values().is_empty());
    }

    #[test]
    fn test_zero_completion_timeout_is_rejected() {
        // テスト項目: 補完のタイムアウトに 0 秒は指定できない
        // when (操作):
        let result =
            ServerConfig::try_parse_from(["huddle-server", "--completion-timeout-secs", "0"]);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides() {
        // テスト項目: コマンドライン引数で設定を上書きできる
        // when (操作):
        let config = ServerConfig::try_parse_from([
            "huddle-server",
            "--host",
            "0.0.0.0",
            "--port",
            "9000",
            "--database-url",
            "sqlite://chat.db",
            "--completion-timeout-secs",
            "5",
        ])
        .unwrap();

        // then (期待する結果):
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.database_url.as_deref(), Some("sqlite://chat.db"));
        assert_eq!(config.completion_timeout(), Duration::from_secs(5));
    }
}
