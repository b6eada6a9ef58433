//! usecase テスト用のモック実装

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Mutex;
use std::time::Duration;

use common::error::Error;
use common::ports::outbound::{Clock, Log, LogRecord};

use crate::domain::{ChatRequest, ExchangeLog, HistoryEntry};
use crate::ports::outbound::{
    ChatTransport, ExchangeLogger, HistoryStorage, MathTypesetter, Presenter,
};

pub struct FixedClock;

impl Clock for FixedClock {
    fn now_ms(&self) -> u64 {
        1_700_000_000_000
    }
}

#[derive(Default)]
pub struct CollectLog(pub Mutex<Vec<LogRecord>>);

impl CollectLog {
    pub fn kinds(&self) -> Vec<String> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter_map(|r| r.kind.clone())
            .collect()
    }

    pub fn find(&self, kind: &str) -> Option<LogRecord> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.kind.as_deref() == Some(kind))
            .cloned()
    }
}

impl Log for CollectLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        self.0.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// 順に返す応答を積んでおく transport。受け取ったリクエストを記録する
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<String, Error>>>,
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Result<String, Error>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl ChatTransport for ScriptedTransport {
    fn send(&self, request: &ChatRequest) -> Result<String, Error> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("ok".to_string()))
    }
}

/// release が来るまで応答を返さない transport
pub struct BlockingTransport {
    entered: Mutex<Sender<()>>,
    release: Mutex<Receiver<()>>,
    pub calls: Mutex<usize>,
}

impl BlockingTransport {
    pub fn new(entered: Sender<()>, release: Receiver<()>) -> Self {
        Self {
            entered: Mutex::new(entered),
            release: Mutex::new(release),
            calls: Mutex::new(0),
        }
    }
}

impl ChatTransport for BlockingTransport {
    fn send(&self, _request: &ChatRequest) -> Result<String, Error> {
        *self.calls.lock().unwrap() += 1;
        let _ = self.entered.lock().unwrap().send(());
        self.release
            .lock()
            .unwrap()
            .recv_timeout(Duration::from_secs(10))
            .map_err(|e| Error::network(e.to_string()))?;
        Ok("released".to_string())
    }
}

pub struct ChannelExchangeLogger(pub Mutex<Sender<ExchangeLog>>);

impl ExchangeLogger for ChannelExchangeLogger {
    fn log_exchange(&self, exchange: &ExchangeLog) -> Result<(), Error> {
        let _ = self.0.lock().unwrap().send(exchange.clone());
        Ok(())
    }
}

pub struct FailingTypesetter;

impl MathTypesetter for FailingTypesetter {
    fn typeset(&self, _html: &str) -> Result<(), Error> {
        Err(Error::system("typesetter not loaded"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shown {
    User(String),
    Typing,
    HideTyping,
    Bot { html: String, raw: String },
    Error(String),
}

#[derive(Default)]
pub struct RecordingPresenter(pub Mutex<Vec<Shown>>);

impl RecordingPresenter {
    pub fn shown(&self) -> Vec<Shown> {
        self.0.lock().unwrap().clone()
    }

    fn push(&self, item: Shown) {
        self.0.lock().unwrap().push(item);
    }
}

impl Presenter for RecordingPresenter {
    fn show_user_message(&self, text: &str, _time: &str) {
        self.push(Shown::User(text.to_string()));
    }

    fn show_typing(&self) {
        self.push(Shown::Typing);
    }

    fn hide_typing(&self) {
        self.push(Shown::HideTyping);
    }

    fn show_bot_message(&self, html: &str, raw: &str, _time: &str) {
        self.push(Shown::Bot {
            html: html.to_string(),
            raw: raw.to_string(),
        });
    }

    fn show_error(&self, message: &str, _time: &str) {
        self.push(Shown::Error(message.to_string()));
    }
}

/// メモリ上の保存先。`fail` なら読み書きとも失敗する
#[derive(Default)]
pub struct MemoryStorage {
    pub saved: Mutex<Option<Vec<HistoryEntry>>>,
    pub fail: bool,
}

impl MemoryStorage {
    pub fn failing() -> Self {
        Self {
            saved: Mutex::new(None),
            fail: true,
        }
    }

    pub fn with_entries(entries: Vec<HistoryEntry>) -> Self {
        Self {
            saved: Mutex::new(Some(entries)),
            fail: false,
        }
    }

    pub fn saved_len(&self) -> Option<usize> {
        self.saved.lock().unwrap().as_ref().map(|v| v.len())
    }
}

impl HistoryStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<HistoryEntry>>, Error> {
        if self.fail {
            return Err(Error::persistence("storage unavailable"));
        }
        Ok(self.saved.lock().unwrap().clone())
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<(), Error> {
        if self.fail {
            return Err(Error::persistence("quota exceeded"));
        }
        *self.saved.lock().unwrap() = Some(entries.to_vec());
        Ok(())
    }

    fn remove(&self) -> Result<(), Error> {
        if self.fail {
            return Err(Error::persistence("storage unavailable"));
        }
        *self.saved.lock().unwrap() = None;
        Ok(())
    }
}

/// release が来るまで戻らない exchange logger
pub struct StalledExchangeLogger(pub Mutex<Receiver<()>>);

impl ExchangeLogger for StalledExchangeLogger {
    fn log_exchange(&self, _exchange: &ExchangeLog) -> Result<(), Error> {
        let _ = self
            .0
            .lock()
            .unwrap()
            .recv_timeout(Duration::from_secs(10));
        Ok(())
    }
}
