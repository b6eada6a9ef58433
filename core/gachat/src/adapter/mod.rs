//! アダプター（gachat 固有のポート実装）

pub mod config;
pub mod file_history_storage;
pub mod http_chat_transport;
pub mod http_exchange_logger;
pub mod noop_typesetter;
pub mod pulldown_renderer;
pub mod terminal_presenter;

pub use config::{load_app_config, AppConfig};
pub use file_history_storage::FileHistoryStorage;
pub use http_chat_transport::{HttpChatTransport, RequestMethod};
pub use http_exchange_logger::HttpExchangeLogger;
pub use noop_typesetter::NoopTypesetter;
pub use pulldown_renderer::PulldownRenderer;
pub use terminal_presenter::TerminalPresenter;
