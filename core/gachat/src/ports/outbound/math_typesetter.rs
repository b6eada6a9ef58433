//! 数式組版 Outbound ポート
//!
//! 挿入済みの HTML に残っている LaTeX 区切りを処理する外部コラボレータ。
//! 失敗しても呼び出し側はログに落とすだけで、応答の表示・履歴追加は止めない。

use common::error::Error;

pub trait MathTypesetter: Send + Sync {
    fn typeset(&self, html: &str) -> Result<(), Error>;
}
