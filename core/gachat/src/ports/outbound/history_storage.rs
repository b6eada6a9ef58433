//! 会話履歴の永続化 Outbound ポート

use crate::domain::HistoryEntry;
use common::error::Error;

/// 履歴列を 1 スロットに丸ごと保存・読み込み・削除する能力
pub trait HistoryStorage: Send + Sync {
    /// 保存済みの列。保存されていなければ Ok(None)
    fn load(&self) -> Result<Option<Vec<HistoryEntry>>, Error>;
    fn save(&self, entries: &[HistoryEntry]) -> Result<(), Error>;
    /// 保存済みの列を消す（無ければ何もしない）
    fn remove(&self) -> Result<(), Error>;
}
