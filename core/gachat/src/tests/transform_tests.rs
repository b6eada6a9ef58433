use crate::adapter::PulldownRenderer;
use crate::ports::outbound::MarkdownRenderer;
use crate::usecase::transform;

fn render(raw: &str) -> String {
    transform(raw, &PulldownRenderer::default())
}

#[test]
fn test_escaped_newline_becomes_soft_break() {
    assert_eq!(render("2\\n2"), "<p>2\n2</p>\n");
}

#[test]
fn test_escaped_blank_line_splits_paragraphs() {
    assert_eq!(render("line1\\n\\nline2"), "<p>line1</p>\n<p>line2</p>\n");
}

#[test]
fn test_display_math_survives_markdown() {
    let html = render("Result: \\[x^2\\]");
    assert!(html.contains("\\[x^2\\]"));
    assert!(!html.contains("MATHPLACEHOLDER"));
}

#[test]
fn test_inline_math_is_not_treated_as_emphasis() {
    let html = render("**bold** and \\(a_1 * b_2\\)");
    assert_eq!(
        html,
        "<p><strong>bold</strong> and \\(a_1 * b_2\\)</p>\n"
    );
}

#[test]
fn test_math_inside_code_span_is_restored() {
    assert_eq!(render("`\\(x\\)`"), "<p><code>\\(x\\)</code></p>\n");
}

#[test]
fn test_math_markup_is_escaped() {
    assert_eq!(render("\\(a<b\\)"), "<p>\\(a&lt;b\\)</p>\n");
}

#[test]
fn test_without_math_matches_direct_render() {
    let raw = "# Title\n\n| a | b |\n|---|---|\n| 1 | ~~2~~ |\n\n- [x] done";
    assert_eq!(render(raw), PulldownRenderer::default().render(raw));
}

#[test]
fn test_unclosed_delimiter_renders_as_markdown_escape() {
    assert_eq!(render("open \\[x"), "<p>open [x</p>\n");
}
