//! 会話履歴のドメイン型
//!
//! 直近 MAX_HISTORY 件だけを古い順に保持する。上限を超えたら先頭（最古）から捨てる。

use serde::{Deserialize, Serialize};

/// 保持する履歴の上限件数
pub const MAX_HISTORY: usize = 10;

/// 1 往復分の履歴（作成後は変更しない）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    user: String,
    assistant: String,
    /// RFC3339 のタイムスタンプ
    timestamp: String,
}

impl HistoryEntry {
    pub fn new(
        user: impl Into<String>,
        assistant: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            assistant: assistant.into(),
            timestamp: timestamp.into(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn assistant(&self) -> &str {
        &self.assistant
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

/// 上限付きの会話履歴
///
/// 不変条件: どの操作の後でも `len() <= MAX_HISTORY`。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// 永続化されていた列から復元する（上限を超える分は古い方から捨てる）
    pub fn from_entries(mut entries: Vec<HistoryEntry>) -> Self {
        if entries.len() > MAX_HISTORY {
            entries.drain(..entries.len() - MAX_HISTORY);
        }
        Self { entries }
    }

    /// 末尾に追加し、あふれた場合は捨てた最古の 1 件を返す
    pub fn push(&mut self, entry: HistoryEntry) -> Option<HistoryEntry> {
        self.entries.push(entry);
        if self.entries.len() > MAX_HISTORY {
            Some(self.entries.remove(0))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
