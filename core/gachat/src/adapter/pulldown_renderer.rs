//! pulldown-cmark による Markdown → HTML

use crate::ports::outbound::MarkdownRenderer;
use pulldown_cmark::{html, Options, Parser};

#[derive(Debug, Clone)]
pub struct PulldownRenderer {
    options: Options,
}

impl PulldownRenderer {
    /// `gfm` が true なら表・取り消し線・タスクリスト・脚注を有効にする
    pub fn new(gfm: bool) -> Self {
        let mut options = Options::empty();
        if gfm {
            options.insert(Options::ENABLE_TABLES);
            options.insert(Options::ENABLE_STRIKETHROUGH);
            options.insert(Options::ENABLE_TASKLISTS);
            options.insert(Options::ENABLE_FOOTNOTES);
        }
        Self { options }
    }
}

impl Default for PulldownRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl MarkdownRenderer for PulldownRenderer {
    fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}
