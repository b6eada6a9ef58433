//! ログエンドポイント Outbound ポート
//!
//! 呼び出し側（ChatSession）が別スレッドで投げっぱなしにする。結果は成功/失敗だけを見る。

use crate::domain::ExchangeLog;
use common::error::Error;

pub trait ExchangeLogger: Send + Sync {
    fn log_exchange(&self, exchange: &ExchangeLog) -> Result<(), Error>;
}
