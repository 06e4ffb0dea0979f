//! Markdown rendering

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};

use super::SUMMARY_MARKER;
use crate::helpers::escape_html;

/// Anchor left where the summary break was, target of "read more" links
const MORE_ANCHOR: &str = r#"<span id="more"></span>"#;

/// Markdown renderer
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    options: Options,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        // No YAML metadata blocks: front-matter is stripped before rendering
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES;
        Self { options }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        self.render_html(markdown, false)
    }

    /// Render a full post body; the first `<!--more-->` becomes the `#more` anchor
    pub fn render_post(&self, markdown: &str) -> String {
        self.render_html(markdown, true)
    }

    fn render_html(&self, markdown: &str, anchor_break: bool) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let mut pending_break = anchor_break;

        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) => lang
                            .split_whitespace()
                            .next()
                            .map(|l| l.to_string()),
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, code)) = code_block.take() {
                        events.push(Event::Html(CowStr::from(code_figure(
                            &code,
                            lang.as_deref(),
                        ))));
                    }
                }
                Event::Text(text) if code_block.is_some() => {
                    if let Some((_, code)) = code_block.as_mut() {
                        code.push_str(&text);
                    }
                }
                Event::Html(html) if pending_break && html.contains(SUMMARY_MARKER) => {
                    pending_break = false;
                    events.push(Event::Html(html.replacen(SUMMARY_MARKER, MORE_ANCHOR, 1).into()));
                }
                Event::InlineHtml(html) if pending_break && html.contains(SUMMARY_MARKER) => {
                    pending_break = false;
                    events.push(Event::InlineHtml(
                        html.replacen(SUMMARY_MARKER, MORE_ANCHOR, 1).into(),
                    ));
                }
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Plain text of a markdown fragment, for feeds and search
    pub fn plain_text(&self, markdown: &str) -> String {
        let mut out = String::new();
        for event in Parser::new_ext(markdown, self.options) {
            match event {
                Event::Text(text) | Event::Code(text) => out.push_str(&text),
                Event::SoftBreak | Event::HardBreak => out.push(' '),
                Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => {
                    out.push(' ')
                }
                _ => {}
            }
        }
        out.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn code_figure(code: &str, lang: Option<&str>) -> String {
    let lang = lang.unwrap_or("text");
    format!(
        r#"<figure class="highlight {lang}"><pre><code class="language-{lang}">{}</code></pre></figure>"#,
        escape_html(code),
        lang = escape_html(lang)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.");
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```c\nint main() { return a < b; }\n```");
        assert!(html.contains(r#"<figure class="highlight c">"#));
        assert!(html.contains("return a &lt; b;"));
    }

    #[test]
    fn test_indented_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("para\n\n    kubectl get pods\n");
        assert!(html.contains(r#"class="language-text""#));
        assert!(html.contains("kubectl get pods"));
    }

    #[test]
    fn test_render_post_anchors_first_break() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render_post("Teaser.\n<!--more-->\nRest.\n\nAgain <!--more--> here\n");
        assert_eq!(html.matches(r#"<span id="more"></span>"#).count(), 1);
        assert!(html.contains("<p>Teaser.</p>"));
        assert!(html.contains("<p>Rest.</p>"));
        assert!(html.contains("Again <!--more--> here"));

        let inline = renderer.render_post("Intro<!--more-->Rest");
        assert!(inline.contains(r#"Intro<span id="more"></span>Rest"#));

        assert!(!renderer.render("a\n<!--more-->\nb").contains("id=\"more\""));
    }

    #[test]
    fn test_plain_text() {
        let renderer = MarkdownRenderer::new();
        let text = renderer.plain_text("# Title\n\nSome **bold** and `code`.\n\n- one\n- two");
        assert_eq!(text, "Title Some bold and code. one two");
    }
}
