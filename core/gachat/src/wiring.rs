//! 配線: 標準アダプタでセッションを組み立てる

use std::sync::Arc;

use common::adapter::{FileJsonLog, StderrLog, StdClock, StdEnvResolver, StdFileSystem, TeeLog};
use common::domain::HomeDir;
use common::error::Error;
use common::ports::outbound::{Clock, EnvResolver, FileSystem, Log, LogLevel, LogRecord};

use crate::adapter::http_chat_transport::build_client;
use crate::adapter::{
    load_app_config, AppConfig, FileHistoryStorage, HttpChatTransport, HttpExchangeLogger,
    NoopTypesetter, PulldownRenderer, RequestMethod, TerminalPresenter,
};
use crate::cli::Config;
use crate::ports::outbound::ExchangeLogger;
use crate::usecase::{ChatDeps, ChatSession, HistoryStore};

pub const LOG_FILENAME: &str = "gachat.log.jsonl";

/// main が使う標準アダプタ一式
pub struct App {
    pub fs: Arc<dyn FileSystem>,
    pub env_resolver: Arc<dyn EnvResolver>,
    pub clock: Arc<dyn Clock>,
    pub logger: Arc<dyn Log>,
    pub home_dir: HomeDir,
}

/// 標準アダプタを組み立てる。ログは `<home>/gachat.log.jsonl`、verbose なら stderr にも出す
pub fn wire_app(verbose: bool) -> Result<App, Error> {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let env_resolver: Arc<dyn EnvResolver> = Arc::new(StdEnvResolver);
    let home_dir = env_resolver.resolve_home_dir()?;
    let file_log: Arc<dyn Log> = Arc::new(FileJsonLog::new(
        Arc::clone(&fs),
        home_dir.as_ref().join(LOG_FILENAME),
    ));
    let logger: Arc<dyn Log> = if verbose {
        Arc::new(TeeLog::new(vec![file_log, Arc::new(StderrLog)]))
    } else {
        file_log
    };
    Ok(App {
        fs,
        env_resolver,
        clock: Arc::new(StdClock),
        logger,
        home_dir,
    })
}

/// config.json・環境変数の上に CLI 引数を重ねる
pub fn resolve_config(base: AppConfig, config: &Config) -> AppConfig {
    let mut resolved = base;
    if let Some(url) = &config.url {
        resolved.chat_url = url.clone();
    }
    if let Some(url) = &config.log_url {
        resolved.log_url = Some(url.clone());
    }
    if config.no_log {
        resolved.log_url = None;
    }
    if config.use_get {
        resolved.method = RequestMethod::Get;
    }
    resolved
}

impl App {
    /// セッションを組み立て、履歴ポリシー（既定: 起動時に消す / --keep-history: 読み込む）を適用する
    pub fn build_session(&self, config: &Config) -> Result<Arc<ChatSession>, Error> {
        let base = load_app_config(self.fs.as_ref(), self.env_resolver.as_ref(), &self.home_dir)?;
        let app_config = resolve_config(base, config);
        let _ = self.logger.log(
            &LogRecord::new(LogLevel::Debug, "config resolved")
                .layer("wiring")
                .kind("config")
                .field("chat_url", app_config.chat_url.as_str())
                .field(
                    "log_url",
                    app_config
                        .log_url
                        .as_ref()
                        .map(|u| u.as_str().to_string())
                        .unwrap_or_default(),
                ),
        );

        let client = build_client(app_config.timeout)?;
        let transport = Arc::new(HttpChatTransport::new(
            client.clone(),
            app_config.chat_url.clone(),
            app_config.method,
            Arc::clone(&self.logger),
        ));
        let exchange_logger = app_config.log_url.clone().map(|url| {
            Arc::new(HttpExchangeLogger::new(client, url)) as Arc<dyn ExchangeLogger>
        });

        let storage = Arc::new(FileHistoryStorage::new(Arc::clone(&self.fs), &self.home_dir));
        let mut history = HistoryStore::new(
            storage,
            Arc::clone(&self.clock),
            Arc::clone(&self.logger),
        );
        if config.keep_history {
            history.load();
        } else {
            history.clear();
        }

        let deps = ChatDeps {
            transport,
            exchange_logger,
            renderer: Arc::new(PulldownRenderer::default()),
            typesetter: Arc::new(NoopTypesetter),
            presenter: Arc::new(TerminalPresenter::stdout(config.plain)),
            clock: Arc::clone(&self.clock),
            log: Arc::clone(&self.logger),
        };
        Ok(Arc::new(ChatSession::new(deps, history)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::domain::EndpointUrl;

    #[test]
    fn test_cli_overrides_file_config() {
        let config = Config {
            url: Some(EndpointUrl::new("http://cli/chat")),
            use_get: true,
            ..Config::default()
        };
        let resolved = resolve_config(AppConfig::default(), &config);
        assert_eq!(resolved.chat_url.as_str(), "http://cli/chat");
        assert_eq!(resolved.method, RequestMethod::Get);
        assert!(resolved.log_url.is_some());
    }

    #[test]
    fn test_no_log_wins_over_log_url() {
        let config = Config {
            log_url: Some(EndpointUrl::new("http://cli/log")),
            no_log: true,
            ..Config::default()
        };
        assert_eq!(resolve_config(AppConfig::default(), &config).log_url, None);
    }
}
