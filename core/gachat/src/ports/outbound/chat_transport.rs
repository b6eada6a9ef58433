//! チャットエンドポイント Outbound ポート

use crate::domain::ChatRequest;
use common::error::Error;

/// 1 回の問い合わせを送り、表示用に正規化したテキストを返す
///
/// 非 2xx は `Error::Http`、接続・読み込み失敗は `Error::Network`。
pub trait ChatTransport: Send + Sync {
    fn send(&self, request: &ChatRequest) -> Result<String, Error>;
}
