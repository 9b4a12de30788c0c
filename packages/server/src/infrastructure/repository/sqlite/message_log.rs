//! SQLite Message Log Repository 実装
//!
//! `messages` テーブルへの INSERT のみを行う追記専用ログ。
//! 読み出し（履歴の再生）は行いません。

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::domain::{Message, MessageLogRepository, RepositoryError};

const CREATE_MESSAGES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS messages (
    id TEXT PRIMARY KEY NOT NULL,
    user_id TEXT NOT NULL,
    user_name TEXT NOT NULL,
    content TEXT NOT NULL,
    timestamp INTEGER NOT NULL,
    type TEXT NOT NULL
)
"#;

/// SQLite Message Log Repository 実装
#[derive(Debug, Clone)]
pub struct SqliteMessageLogRepository {
    pool: SqlitePool,
}

impl SqliteMessageLogRepository {
    /// 既存のコネクションプールから作成
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// データベース URL に接続し、スキーマを用意した上で作成
    ///
    /// ファイルが存在しない場合は作成します。
    pub async fn connect(database_url: &str) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        let repository = Self::new(pool);
        repository.ensure_schema().await?;
        Ok(repository)
    }

    /// `messages` テーブルが無ければ作成
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        sqlx::query(CREATE_MESSAGES_TABLE)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl MessageLogRepository for SqliteMessageLogRepository {
    async fn append(&self, message: &Message) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO messages (id, user_id, user_name, content, timestamp, type)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(message.id.as_str())
        .bind(message.author_id.as_str())
        .bind(message.author_name.as_str())
        .bind(message.content.as_str())
        .bind(message.timestamp.value())
        .bind(message.kind.as_str())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(
                RepositoryError::DuplicateMessage(message.id.as_str().to_string()),
            ),
            Err(e) => Err(e.into()),
        }
    }
}
