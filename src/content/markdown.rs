//! Markdown image rewriting
//!
//! Content bodies are served as markdown; only image references are turned
//! into HTML so the front end can render them without a markdown pass.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    /// `![alt](url)`, `![alt](<url>)` and `![alt](url "title")`. The alt text
    /// may hold one level of nested brackets; the url runs to the first `)`.
    static ref IMAGE_RE: Regex = Regex::new(
        r#"!\[(?:[^\[\]]|\[[^\[\]]*\])*\]\(\s*<?(.*?)>?(?:\s+(?:"[^"]*"|'[^']*'))?\s*\)"#
    )
    .expect("image pattern is valid");
}

/// Rewrite every markdown image reference to an inline `<img>` tag.
///
/// The alt text is discarded. Everything else in the body is left untouched.
pub fn rewrite_images(markdown: &str) -> String {
    IMAGE_RE
        .replace_all(markdown, |caps: &Captures| {
            format!(r#"<img src="{}" alt="" />"#, caps[1].replace('"', "&quot;"))
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_single_image() {
        let out = rewrite_images("![caption](http://example.com/a.png)");
        assert_eq!(out, r#"<img src="http://example.com/a.png" alt="" />"#);
    }

    #[test]
    fn test_rewrite_keeps_surrounding_text() {
        let out = rewrite_images("![x](/img/a.png) hello");
        assert_eq!(out, r#"<img src="/img/a.png" alt="" /> hello"#);
    }

    #[test]
    fn test_rewrite_multiple_images() {
        let out = rewrite_images("![a](/1.png)\n\ntext\n\n![b](/2.jpg)");
        assert_eq!(
            out,
            "<img src=\"/1.png\" alt=\"\" />\n\ntext\n\n<img src=\"/2.jpg\" alt=\"\" />"
        );
        assert!(!out.contains("!["));
    }

    #[test]
    fn test_title_and_angle_brackets_are_dropped() {
        assert_eq!(
            rewrite_images(r#"![logo](/logo.svg "Academy logo")"#),
            r#"<img src="/logo.svg" alt="" />"#
        );
        assert_eq!(
            rewrite_images("![logo](</logo.svg>)"),
            r#"<img src="/logo.svg" alt="" />"#
        );
    }

    #[test]
    fn test_other_markdown_untouched() {
        let body = "# Heading\n\n**bold** and [a link](https://example.com)\n\n- item";
        assert_eq!(rewrite_images(body), body);
    }

    #[test]
    fn test_url_with_spaces() {
        let out = rewrite_images("![x](/img/my photo.png) after (not an image)");
        assert_eq!(out, r#"<img src="/img/my photo.png" alt="" /> after (not an image)"#);
        assert!(!out.contains("!["));
    }

    #[test]
    fn test_alt_with_nested_brackets() {
        let out = rewrite_images("![see [1]](/a.png) and ![](/b.png)");
        assert_eq!(
            out,
            r#"<img src="/a.png" alt="" /> and <img src="/b.png" alt="" />"#
        );
        assert!(!out.contains("!["));
    }

    #[test]
    fn test_quotes_in_url_are_escaped() {
        assert_eq!(
            rewrite_images(r#"![q](/a"b.png)"#),
            r#"<img src="/a&quot;b.png" alt="" />"#
        );
    }
}
