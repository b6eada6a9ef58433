//! ユースケース層（ポート経由でのみ外界に触れる）

pub mod chat_session;
pub mod history_store;
pub mod interactive;
pub mod transform;

pub use chat_session::{ChatDeps, ChatSession, SendOutcome, SkipReason, Submitted};
pub use history_store::HistoryStore;
pub use transform::transform;
