//! LaTeX 数式スパンの保護と復元
//!
//! Markdown 変換の前に `\[ … \]`（ディスプレイ）と `\( … \)`（インライン）を
//! プレースホルダに置き換え、変換後の HTML に元の数式を戻す。
//! Markdown 側は `\[` を `[` のエスケープとして解釈してしまうため、この保護が必要になる。

use regex::{Captures, Regex};
use std::sync::OnceLock;

const PLACEHOLDER_TAG: &str = "MATHPLACEHOLDER";

/// 数式スパンの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathKind {
    /// `\[ … \]`
    Display,
    /// `\( … \)`
    Inline,
}

impl MathKind {
    fn label(&self) -> &'static str {
        match self {
            Self::Display => "DISPLAY",
            Self::Inline => "INLINE",
        }
    }
}

/// プレースホルダトークン（英数字と `_` のみ。Markdown の強調記法にも化けない）
pub fn placeholder(index: usize, kind: MathKind) -> String {
    format!(
        "{tag}_{kind}_{index}_{tag}",
        tag = PLACEHOLDER_TAG,
        kind = kind.label(),
        index = index
    )
}

/// 保護した 1 スパン（`source` は区切り記号込みの元テキスト）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathSpan {
    pub index: usize,
    pub kind: MathKind,
    pub source: String,
}

/// プレースホルダ置換済みのテキストと、index → 元スパンの表
///
/// 1 回の変換の間だけ生きる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedText {
    text: String,
    spans: Vec<MathSpan>,
}

fn display_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\\\[(.*?)\\\]").expect("display math pattern"))
}

fn inline_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\\\((.*?)\\\)").expect("inline math pattern"))
}

fn replace_spans(text: &str, re: &Regex, kind: MathKind, spans: &mut Vec<MathSpan>) -> String {
    re.replace_all(text, |caps: &Captures| {
        let index = spans.len();
        spans.push(MathSpan {
            index,
            kind,
            source: caps[0].to_string(),
        });
        placeholder(index, kind)
    })
    .into_owned()
}

/// 数式スパンをプレースホルダに置き換える
///
/// ディスプレイ数式を先に全部処理し、その結果に対してインライン数式を処理する。
/// index は両パスで通し番号。閉じ記号のない開き記号は保護しない（ただのテキストとして残る）。
pub fn protect(text: &str) -> ProtectedText {
    let mut spans = Vec::new();
    let after_display = replace_spans(text, display_re(), MathKind::Display, &mut spans);
    let text = replace_spans(&after_display, inline_re(), MathKind::Inline, &mut spans);
    ProtectedText { text, spans }
}

/// HTML テキストとして `&` `<` `>` だけをエスケープする
fn escape_html_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

impl ProtectedText {
    /// Markdown レンダラに渡すテキスト
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn spans(&self) -> &[MathSpan] {
        &self.spans
    }

    /// 変換後の HTML 中のプレースホルダを元の数式に戻す（出現箇所すべて）
    ///
    /// index の大きい方から戻す。インライン数式の中にディスプレイ数式の
    /// プレースホルダが埋まっていても、後段で戻る。
    pub fn restore(&self, html: &str) -> String {
        let mut out = html.to_string();
        for span in self.spans.iter().rev() {
            let token = placeholder(span.index, span.kind);
            if out.contains(&token) {
                out = out.replace(&token, &escape_html_text(&span.source));
            }
        }
        out
    }
}

/// 文字列としての `\n`（バックスラッシュ + n）を実際の改行に置き換える
///
/// サーバが改行を二重にエスケープして返す場合への対処。
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_math_is_passthrough() {
        let p = protect("plain *markdown* text");
        assert_eq!(p.text(), "plain *markdown* text");
        assert!(p.spans().is_empty());
    }

    #[test]
    fn test_display_span_replaced_by_placeholder() {
        let p = protect(r"Result: \[x^2\]");
        assert_eq!(p.text(), "Result: MATHPLACEHOLDER_DISPLAY_0_MATHPLACEHOLDER");
        assert_eq!(p.spans()[0].source, r"\[x^2\]");
        assert_eq!(p.spans()[0].kind, MathKind::Display);
    }

    #[test]
    fn test_display_spans_numbered_before_inline() {
        let p = protect(r"a \(y\) b \[x\] c \(z\)");
        assert_eq!(
            p.text(),
            "a MATHPLACEHOLDER_INLINE_1_MATHPLACEHOLDER b \
             MATHPLACEHOLDER_DISPLAY_0_MATHPLACEHOLDER c \
             MATHPLACEHOLDER_INLINE_2_MATHPLACEHOLDER"
        );
        let sources: Vec<&str> = p.spans().iter().map(|s| s.source.as_str()).collect();
        assert_eq!(sources, vec![r"\[x\]", r"\(y\)", r"\(z\)"]);
    }

    #[test]
    fn test_match_is_lazy_and_spans_lines() {
        let p = protect("\\[a\nb\\] mid \\[c\\]");
        assert_eq!(p.spans().len(), 2);
        assert_eq!(p.spans()[0].source, "\\[a\nb\\]");
        assert_eq!(p.spans()[1].source, r"\[c\]");
    }

    #[test]
    fn test_unmatched_opener_left_unprotected() {
        let p = protect(r"open \[x^2 without close");
        assert!(p.spans().is_empty());
        assert_eq!(p.text(), r"open \[x^2 without close");
    }

    #[test]
    fn test_restore_round_trip_any_surrounding_change() {
        let p = protect(r"\[a\] and \(b\) and \(c\)");
        // レンダラが周囲を書き換えても、プレースホルダさえ残っていれば数式は元通り
        let rendered = format!("<p>{}</p>\n", p.text().to_uppercase().replace(" AND ", " & "));
        let restored = p.restore(&rendered);
        assert_eq!(restored, "<p>\\[a\\] & \\(b\\) & \\(c\\)</p>\n");
    }

    #[test]
    fn test_restore_replaces_every_occurrence() {
        let p = protect(r"\(k\)");
        let token = placeholder(0, MathKind::Inline);
        let html = format!("{t} {t}", t = token);
        assert_eq!(p.restore(&html), r"\(k\) \(k\)");
    }

    #[test]
    fn test_restore_nested_inline_containing_display() {
        let p = protect(r"\( a \[b\] c \)");
        assert_eq!(p.spans().len(), 2);
        assert_eq!(p.restore(p.text()), r"\( a \[b\] c \)");
    }

    #[test]
    fn test_restore_escapes_markup_in_formula() {
        let p = protect(r"\(a<b\)");
        assert_eq!(p.restore(p.text()), r"\(a&lt;b\)");
    }

    #[test]
    fn test_placeholder_indices_do_not_collide() {
        let text: String = (0..12).map(|i| format!(r"\({}\) ", i)).collect();
        let p = protect(&text);
        assert_eq!(p.spans().len(), 12);
        assert_eq!(p.restore(p.text()), text);
    }

    #[test]
    fn test_normalize_newlines() {
        assert_eq!(normalize_newlines(r"2\n2"), "2\n2");
        assert_eq!(normalize_newlines("already\nfine"), "already\nfine");
        let once = normalize_newlines(r"a\nb");
        assert_eq!(normalize_newlines(&once), once);
    }
}
