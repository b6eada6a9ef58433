//! config.json の読み込み（adapter 層）
//!
//! 優先順位: CLI 引数 > 環境変数（GACHAT_CHAT_URL / GACHAT_LOG_URL）> config.json > 既定値。
//! CLI 引数の適用は wiring で行う。

use crate::adapter::http_chat_transport::RequestMethod;
use common::domain::{EndpointUrl, HomeDir};
use common::error::Error;
use common::ports::outbound::{EnvResolver, FileSystem};
use serde::Deserialize;
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_CHAT_URL: &str = "http://127.0.0.1:8000/request/rag_model/lcel";
pub const DEFAULT_LOG_URL: &str = "http://127.0.0.1:8000/db/insert_row";

/// 解決済みの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub chat_url: EndpointUrl,
    /// None ならログエンドポイントに送らない
    pub log_url: Option<EndpointUrl>,
    pub method: RequestMethod,
    /// None なら無期限に待つ
    pub timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            chat_url: EndpointUrl::new(DEFAULT_CHAT_URL),
            log_url: Some(EndpointUrl::new(DEFAULT_LOG_URL)),
            method: RequestMethod::Post,
            timeout: None,
        }
    }
}

/// serde 用の内部構造（全項目省略可）
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct AppConfigRaw {
    chat_url: Option<String>,
    /// 空文字でログ送信を無効化
    log_url: Option<String>,
    method: Option<RequestMethod>,
    timeout_secs: Option<u64>,
}

fn apply_log_url(config: &mut AppConfig, value: &str) {
    config.log_url = if value.trim().is_empty() {
        None
    } else {
        Some(EndpointUrl::new(value))
    };
}

/// config.json の内容を既定値に重ねる
pub fn parse_app_config(json: &str) -> Result<AppConfig, Error> {
    let raw: AppConfigRaw = serde_json::from_str(json)
        .map_err(|e| Error::config(format!("Invalid {}: {}", CONFIG_FILENAME, e)))?;
    let mut config = AppConfig::default();
    if let Some(url) = raw.chat_url.filter(|u| !u.trim().is_empty()) {
        config.chat_url = EndpointUrl::new(url);
    }
    if let Some(url) = raw.log_url {
        apply_log_url(&mut config, &url);
    }
    if let Some(method) = raw.method {
        config.method = method;
    }
    config.timeout = raw.timeout_secs.filter(|s| *s > 0).map(Duration::from_secs);
    Ok(config)
}

/// ホームディレクトリの config.json と環境変数から設定を解決する（ファイルが無ければ既定値）
pub fn load_app_config(
    fs: &dyn FileSystem,
    env: &dyn EnvResolver,
    home_dir: &HomeDir,
) -> Result<AppConfig, Error> {
    let path = home_dir.as_ref().join(CONFIG_FILENAME);
    let mut config = if fs.exists(&path) {
        parse_app_config(&fs.read_to_string(&path)?)?
    } else {
        AppConfig::default()
    };
    if let Some(url) = env.var("GACHAT_CHAT_URL") {
        config.chat_url = EndpointUrl::new(url);
    }
    if let Some(url) = env.var("GACHAT_LOG_URL") {
        apply_log_url(&mut config, &url);
    }
    Ok(config)
}
