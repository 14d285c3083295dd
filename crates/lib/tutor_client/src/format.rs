//! Lightweight markdown-to-HTML formatter for bot replies.
//!
//! Rules are applied in this order:
//!
//! | Input              | Output                         |
//! |--------------------|--------------------------------|
//! | `**bold**`         | `<strong>bold</strong>`        |
//! | `*italic*`         | `<em>italic</em>`              |
//! | ```` ```code``` ```` | `<pre><code>code</code></pre>` |
//! | `` `code` ``       | `<code>code</code>`            |
//! | newline            | `<br>`                         |
//!
//! Bold and italic do not span lines; fenced code does. Text without any of
//! the markers passes through unchanged, so formatted output is a fixed point.

use std::sync::LazyLock;

use regex::Regex;

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold regex"));
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("italic regex"));
static FENCED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(.*?)```").expect("fenced code regex"));
static INLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("inline code regex"));

/// Formats `text` for display.
pub fn format_response(text: &str) -> String {
    let text = BOLD.replace_all(text, "<strong>${1}</strong>");
    let text = ITALIC.replace_all(&text, "<em>${1}</em>");
    let text = FENCED.replace_all(&text, "<pre><code>${1}</code></pre>");
    let text = INLINE.replace_all(&text, "<code>${1}</code>");
    text.replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold() {
        assert_eq!(format_response("**a**"), "<strong>a</strong>");
    }

    #[test]
    fn formatted_output_is_a_fixed_point() {
        let once = format_response("**a** and *b* with `c`\n```x```");
        assert_eq!(format_response(&once), once);
        assert_eq!(format_response("<strong>a</strong>"), "<strong>a</strong>");
    }

    #[test]
    fn italic() {
        assert_eq!(format_response("an *idea*"), "an <em>idea</em>");
    }

    #[test]
    fn fenced_code_spans_lines() {
        assert_eq!(
            format_response("```\nlet x = 1;\n```"),
            "<pre><code><br>let x = 1;<br></code></pre>"
        );
    }

    #[test]
    fn inline_code() {
        assert_eq!(format_response("use `Vec`"), "use <code>Vec</code>");
    }

    #[test]
    fn newlines_become_breaks() {
        assert_eq!(format_response("a\nb"), "a<br>b");
    }

    #[test]
    fn bold_does_not_span_lines() {
        assert_eq!(format_response("a **b\nc** d"), "a <em></em>b<br>c<em></em> d");
    }

    #[test]
    fn unterminated_markers_stay_literal() {
        assert_eq!(format_response("2 * 3"), "2 * 3");
        assert_eq!(format_response("`code"), "`code");
    }

    #[test]
    fn scenario_stack_answer() {
        assert_eq!(
            format_response("**Stack**: a LIFO structure"),
            "<strong>Stack</strong>: a LIFO structure"
        );
    }
}
