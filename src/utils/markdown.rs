//! Markdown rendering for the bio section.

use comrak::{Options, markdown_to_html as render};

/// Convert markdown to sanitized HTML.
///
/// Supports strikethrough, tables and autolinks. Raw HTML in the source is
/// dropped by `ammonia`, which also strips script-capable attributes.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;

    ammonia::clean(&render(markdown, &options))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_emphasis() {
        let html = markdown_to_html("I build **secure** software.");
        assert!(html.contains("<strong>secure</strong>"));
    }

    #[test]
    fn test_strips_scripts() {
        let html = markdown_to_html("hi <script>alert(1)</script>");
        assert!(!html.contains("<script"));
        assert!(html.contains("hi"));
    }

    #[test]
    fn test_strips_event_handlers() {
        let html = markdown_to_html("[x](https://example.com)\n\n<img src=x onerror=alert(1)>");
        assert!(!html.contains("onerror"));
        assert!(html.contains("href=\"https://example.com\""));
    }
}
