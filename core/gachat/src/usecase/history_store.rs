//! 会話履歴ストア
//!
//! 追加のたびに列全体を永続化する。永続化の失敗はログに落とすだけで呼び出し側には返さない。

use std::sync::Arc;

use common::error::Error;
use common::ports::outbound::{Clock, Log, LogLevel, LogRecord};

use crate::domain::{History, HistoryEntry};
use crate::ports::outbound::HistoryStorage;

pub struct HistoryStore {
    history: History,
    storage: Arc<dyn HistoryStorage>,
    clock: Arc<dyn Clock>,
    log: Arc<dyn Log>,
}

impl HistoryStore {
    /// 空の履歴で作る（保存済みの列は読まない）
    pub fn new(storage: Arc<dyn HistoryStorage>, clock: Arc<dyn Clock>, log: Arc<dyn Log>) -> Self {
        Self {
            history: History::new(),
            storage,
            clock,
            log,
        }
    }

    fn warn(&self, message: &str, err: &Error) {
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Warn, message)
                .layer("usecase")
                .kind("history")
                .field("error", err.to_string()),
        );
    }

    /// 保存済みの列を読み込む。読めない・壊れている場合は空にして続行する
    pub fn load(&mut self) {
        match self.storage.load() {
            Ok(Some(entries)) => self.history = History::from_entries(entries),
            Ok(None) => self.history = History::new(),
            Err(e) => {
                self.warn("history load failed, starting empty", &e);
                self.history = History::new();
            }
        }
    }

    /// 1 往復を末尾に追加し、上限を超えたら最古を捨てて保存する
    pub fn append(&mut self, user: &str, assistant: &str) {
        let entry = HistoryEntry::new(user, assistant, self.clock.now_rfc3339());
        self.history.push(entry);
        if let Err(e) = self.storage.save(self.history.entries()) {
            self.warn("history save failed", &e);
        }
    }

    /// 履歴を空にし、保存済みの列も消す
    pub fn clear(&mut self) {
        self.history.clear();
        if let Err(e) = self.storage.remove() {
            self.warn("history remove failed", &e);
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    pub fn snapshot(&self) -> History {
        self.history.clone()
    }
}
