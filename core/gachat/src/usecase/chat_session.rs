//! チャットセッション（入力コントローラ）
//!
//! 履歴・送信ガード・各ポートを 1 つのコンテキストにまとめて持つ。
//! 送信は同時に 1 件だけで、送信中に来た入力は捨てる（キューしない）。

use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use common::error::Error;
use common::ports::outbound::{Clock, Log, LogLevel, LogRecord};

use crate::domain::{ChatRequest, ExchangeLog, History, SendGuard, SendTicket, USER_FACING_ERROR};
#[cfg(test)]
use crate::domain::SendState;
use crate::ports::outbound::{
    ChatTransport, ExchangeLogger, MarkdownRenderer, MathTypesetter, Presenter,
};
use crate::usecase::history_store::HistoryStore;
use crate::usecase::transform::transform;

/// セッションが使うポート一式
pub struct ChatDeps {
    pub transport: Arc<dyn ChatTransport>,
    /// None ならログエンドポイントには送らない
    pub exchange_logger: Option<Arc<dyn ExchangeLogger>>,
    pub renderer: Arc<dyn MarkdownRenderer>,
    pub typesetter: Arc<dyn MathTypesetter>,
    pub presenter: Arc<dyn Presenter>,
    pub clock: Arc<dyn Clock>,
    pub log: Arc<dyn Log>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptyInput,
    /// 前の送信がまだ終わっていない
    Busy,
}

/// 1 回の送信の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Replied { html: String },
    /// 固定のエラーメッセージを表示した
    Failed,
    Skipped(SkipReason),
}

/// `submit` の結果
#[derive(Debug)]
pub enum Submitted {
    Dispatched(JoinHandle<SendOutcome>),
    Skipped(SkipReason),
}

pub struct ChatSession {
    deps: ChatDeps,
    history: Mutex<HistoryStore>,
    guard: SendGuard,
    /// 実行中のログ送信スレッド（終了済みのものは次の起動時に捨てる）
    background: Mutex<Vec<JoinHandle<()>>>,
}

/// 表示用の時刻（ローカル時刻、"PM 03:12" 形式）
pub fn display_time(now_ms: u64) -> String {
    chrono::DateTime::from_timestamp_millis(now_ms as i64)
        .map(|utc| utc.with_timezone(&chrono::Local).format("%p %I:%M").to_string())
        .unwrap_or_default()
}

impl ChatSession {
    pub fn new(deps: ChatDeps, history: HistoryStore) -> Self {
        Self {
            deps,
            history: Mutex::new(history),
            guard: SendGuard::new(),
            background: Mutex::new(Vec::new()),
        }
    }

    fn lock_history(&self) -> MutexGuard<'_, HistoryStore> {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn log(&self, record: LogRecord) {
        let _ = self.deps.log.log(&record.layer("usecase"));
    }

    fn current_time(&self) -> String {
        display_time(self.deps.clock.now_ms())
    }

    /// 入力を検査してガードを取る。取れなければ理由を返す
    fn reserve(&self, text: &str) -> Result<(String, SendTicket), SkipReason> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SkipReason::EmptyInput);
        }
        match self.guard.try_begin() {
            Some(ticket) => Ok((text.to_string(), ticket)),
            None => {
                self.log(
                    LogRecord::new(LogLevel::Debug, "input dropped while a request is in flight")
                        .kind("send_guard"),
                );
                Err(SkipReason::Busy)
            }
        }
    }

    /// 呼び出しスレッドで 1 往復を最後まで実行する
    pub fn send(&self, text: &str) -> SendOutcome {
        match self.reserve(text) {
            Ok((text, ticket)) => self.run_exchange(&text, ticket),
            Err(reason) => SendOutcome::Skipped(reason),
        }
    }

    /// ガードだけ呼び出しスレッドで取り、残りはワーカースレッドで実行してすぐ戻る
    pub fn submit(self: &Arc<Self>, text: &str) -> Submitted {
        match self.reserve(text) {
            Ok((text, ticket)) => {
                let session = Arc::clone(self);
                Submitted::Dispatched(thread::spawn(move || session.run_exchange(&text, ticket)))
            }
            Err(reason) => Submitted::Skipped(reason),
        }
    }

    fn run_exchange(&self, text: &str, ticket: SendTicket) -> SendOutcome {
        let presenter = &self.deps.presenter;
        presenter.show_user_message(text, &self.current_time());
        presenter.show_typing();

        let request = ChatRequest::new(text, self.lock_history().entries());
        let result = self.deps.transport.send(&request);
        presenter.hide_typing();

        match result {
            Ok(raw) => {
                let html = transform(&raw, self.deps.renderer.as_ref());
                presenter.show_bot_message(&html, &raw, &self.current_time());
                if let Err(e) = self.deps.typesetter.typeset(&html) {
                    self.log(
                        LogRecord::new(LogLevel::Warn, "math typesetting failed")
                            .kind("typeset")
                            .field("error", e.to_string()),
                    );
                }
                self.lock_history().append(text, &raw);
                self.spawn_exchange_log(ExchangeLog::new(text, raw));
                ticket.finish(true);
                SendOutcome::Replied { html }
            }
            Err(e) => {
                self.log_transport_error(&e);
                presenter.show_error(USER_FACING_ERROR, &self.current_time());
                ticket.finish(false);
                SendOutcome::Failed
            }
        }
    }

    fn log_transport_error(&self, err: &Error) {
        let kind = if err.is_transport() {
            "transport"
        } else {
            "request"
        };
        let mut record = LogRecord::new(LogLevel::Error, err.to_string()).kind(kind);
        if let Error::Http { status, .. } = err {
            record = record.field("status", *status);
        }
        self.log(record);
    }

    /// ログエンドポイントへの送信を別スレッドで起動する（表示側は待たない）
    ///
    /// 失敗は構造化ログにだけ出す。表示との前後関係は保証しない。
    /// プロセス終了前に `drain_background` で待てるよう handle は保持する。
    fn spawn_exchange_log(&self, exchange: ExchangeLog) {
        let Some(logger) = self.deps.exchange_logger.clone() else {
            return;
        };
        let log = Arc::clone(&self.deps.log);
        let handle = thread::spawn(move || {
            if let Err(e) = logger.log_exchange(&exchange) {
                let _ = log.log(
                    &LogRecord::new(LogLevel::Warn, "exchange log failed")
                        .layer("usecase")
                        .kind("exchange_log")
                        .field("error", e.to_string()),
                );
            }
        });
        let mut background = self.lock_background();
        background.retain(|h| !h.is_finished());
        background.push(handle);
    }

    fn lock_background(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.background
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 実行中のログ送信を最大 `timeout` まで待つ。全部終われば true
    ///
    /// 期限を過ぎたスレッドは待たずに手放す。
    pub fn drain_background(&self, timeout: Duration) -> bool {
        let mut pending = std::mem::take(&mut *self.lock_background());
        let deadline = Instant::now() + timeout;
        loop {
            let (finished, running): (Vec<_>, Vec<_>) =
                pending.into_iter().partition(|h| h.is_finished());
            for handle in finished {
                let _ = handle.join();
            }
            pending = running;
            if pending.is_empty() {
                return true;
            }
            if Instant::now() >= deadline {
                self.log(
                    LogRecord::new(LogLevel::Warn, "exchange log still in flight at exit")
                        .kind("exchange_log")
                        .field("pending", pending.len()),
                );
                return false;
            }
            thread::sleep(Duration::from_millis(10));
        }
    }

    /// ユーザー操作による履歴リセット
    pub fn clear_history(&self) {
        self.lock_history().clear();
    }

    pub fn history(&self) -> History {
        self.lock_history().snapshot()
    }

    #[cfg(test)]
    pub fn state(&self) -> SendState {
        self.guard.state()
    }
}
