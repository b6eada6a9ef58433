//! Markdown → HTML レンダラ Outbound ポート
//!
//! 実装は差し替え可能（標準は pulldown-cmark、GFM 拡張あり）。

pub trait MarkdownRenderer: Send + Sync {
    /// 失敗しない。どんな入力でも HTML 文字列を返す
    fn render(&self, markdown: &str) -> String;
}
