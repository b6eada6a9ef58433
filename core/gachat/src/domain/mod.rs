//! ドメイン型と純粋なロジック（I/O なし）

pub mod chat_request;
pub mod history;
pub mod math;
pub mod response;
pub mod send_state;

pub use chat_request::{ChatRequest, ExchangeLog};
pub use history::{History, HistoryEntry, MAX_HISTORY};
pub use math::{MathKind, MathSpan, ProtectedText};
pub use response::{normalize_body, ResponseBody};
pub use send_state::{SendGuard, SendState, SendTicket};

/// 通信失敗時に UI に出す固定メッセージ（エラー詳細はログにのみ出す）
pub const USER_FACING_ERROR: &str = "response retrieval failed, please retry";
