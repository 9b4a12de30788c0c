//! InMemory Message Log Repository 実装
//!
//! ドメイン層が定義する MessageLogRepository trait の具体的な実装。
//! Vec をインメモリの追記専用ログとして使用します。
//! `--database-url` を指定しない起動時と、テストで使用します。

use std::{collections::HashSet, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Message, MessageLogRepository, RepositoryError};

#[derive(Default)]
struct LogState {
    messages: Vec<Message>,
    ids: HashSet<String>,
}

/// インメモリ Message Log Repository 実装
///
/// プロセス終了とともに内容は失われます。
#[derive(Clone, Default)]
pub struct InMemoryMessageLogRepository {
    state: Arc<Mutex<LogState>>,
}

impl InMemoryMessageLogRepository {
    /// 新しい InMemoryMessageLogRepository を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 追記されたメッセージを追記順に取得
    pub async fn messages(&self) -> Vec<Message> {
        self.state.lock().await.messages.clone()
    }
}

#[async_trait]
impl MessageLogRepository for InMemoryMessageLogRepository {
    async fn append(&self, message: &Message) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().await;
        if !state.ids.insert(message.id.as_str().to_string()) {
            return Err(RepositoryError::DuplicateMessage(
                message.id.as_str().to_string(),
            ));
        }
        state.messages.push(message.clone());
        Ok(())
    }
}
