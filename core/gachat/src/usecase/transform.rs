//! 応答テキスト → 挿入可能な HTML
//!
//! 1. 文字列の `\n` を改行に
//! 2. 数式スパンをプレースホルダへ退避
//! 3. Markdown → HTML
//! 4. プレースホルダを元の数式に戻す
//!
//! 結果の HTML には LaTeX の区切り記号がそのまま残り、後段の組版に渡る。

use crate::domain::math::{normalize_newlines, protect};
use crate::ports::outbound::MarkdownRenderer;

/// 純粋関数。ネットワークにも表示にも触れず、どんな入力でも失敗しない
pub fn transform(raw: &str, renderer: &dyn MarkdownRenderer) -> String {
    let normalized = normalize_newlines(raw);
    let protected = protect(&normalized);
    let html = renderer.render(protected.text());
    protected.restore(&html)
}
