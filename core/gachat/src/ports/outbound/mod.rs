//! Outbound ポート: アプリが外界を使うための trait

pub mod chat_transport;
pub mod exchange_logger;
pub mod history_storage;
pub mod markdown_renderer;
pub mod math_typesetter;
pub mod presenter;

pub use chat_transport::ChatTransport;
pub use exchange_logger::ExchangeLogger;
pub use history_storage::HistoryStorage;
pub use markdown_renderer::MarkdownRenderer;
pub use math_typesetter::MathTypesetter;
pub use presenter::Presenter;
