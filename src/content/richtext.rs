//! Rich-text blocks as authored in the CMS
//!
//! A body is an ordered list of blocks. Each block carries its raw text and
//! a set of spans (bold, italic, links, labels) addressed by UTF-16 offsets
//! into that text, which is how the API counts characters.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::helpers::html_escape;

/// An ordered rich-text field
pub type RichText = Vec<RichTextBlock>;

/// One block of rich text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichTextBlock {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub spans: Vec<Span>,

    /// Image source, for `image` blocks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    /// Embedded media, for `embed` blocks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oembed: Option<Embed>,
}

impl RichTextBlock {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            kind: "paragraph".to_string(),
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Inline formatting over a range of a block's text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Embed {
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub embed_url: Option<String>,
}

/// Plain text of a rich-text field, blocks joined by a space
pub fn as_text(blocks: &[RichTextBlock]) -> String {
    blocks
        .iter()
        .map(|b| b.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a rich-text field to HTML
///
/// Consecutive `list-item` / `o-list-item` blocks are grouped into a single
/// `<ul>` / `<ol>`. Unknown block kinds render as paragraphs.
pub fn as_html(blocks: &[RichTextBlock]) -> String {
    let mut html = String::new();
    let mut open_list: Option<&'static str> = None;

    for block in blocks {
        let list = match block.kind.as_str() {
            "list-item" => Some("ul"),
            "o-list-item" => Some("ol"),
            _ => None,
        };

        if open_list != list {
            if let Some(tag) = open_list {
                html.push_str(&format!("</{}>", tag));
            }
            if let Some(tag) = list {
                html.push_str(&format!("<{}>", tag));
            }
            open_list = list;
        }

        html.push_str(&render_block(block));
    }

    if let Some(tag) = open_list {
        html.push_str(&format!("</{}>", tag));
    }

    html
}

fn render_block(block: &RichTextBlock) -> String {
    match block.kind.as_str() {
        kind @ ("heading1" | "heading2" | "heading3" | "heading4" | "heading5" | "heading6") => {
            let level = &kind["heading".len()..];
            format!("<h{0}>{1}</h{0}>", level, render_spans(&block.text, &block.spans))
        }
        "paragraph" => format!("<p>{}</p>", render_spans(&block.text, &block.spans)),
        "preformatted" => format!("<pre>{}</pre>", render_spans(&block.text, &block.spans)),
        "list-item" | "o-list-item" => {
            format!("<li>{}</li>", render_spans(&block.text, &block.spans))
        }
        "image" => format!(
            r#"<p class="block-img"><img src="{}" alt="{}" /></p>"#,
            html_escape(block.url.as_deref().unwrap_or_default()),
            html_escape(block.alt.as_deref().unwrap_or_default())
        ),
        "embed" => {
            let embed = block.oembed.clone().unwrap_or_default();
            format!(
                r#"<div data-oembed="{}">{}</div>"#,
                html_escape(embed.embed_url.as_deref().unwrap_or_default()),
                embed.html.unwrap_or_default()
            )
        }
        other => {
            tracing::debug!("Rendering unknown rich-text block {:?} as paragraph", other);
            format!("<p>{}</p>", render_spans(&block.text, &block.spans))
        }
    }
}

/// Link targets allowed in rendered bodies: http(s), mailto and relative
fn safe_href(url: &str) -> Option<&str> {
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https" | "mailto") => Some(url),
        Ok(_) => None,
        Err(url::ParseError::RelativeUrlWithoutBase) => Some(url),
        Err(_) => None,
    }
}

fn open_tag(span: &Span) -> Option<String> {
    match span.kind.as_str() {
        "strong" => Some("<strong>".to_string()),
        "em" => Some("<em>".to_string()),
        "hyperlink" => {
            let data = span.data.as_ref();
            let url = data
                .and_then(|d| d.get("url"))
                .and_then(|u| u.as_str())
                .unwrap_or_default();
            let target = data
                .and_then(|d| d.get("target"))
                .and_then(|t| t.as_str())
                .map(|t| format!(r#" target="{}" rel="noopener""#, html_escape(t)))
                .unwrap_or_default();
            match safe_href(url) {
                Some(url) => Some(format!(r#"<a href="{}"{}>"#, html_escape(url), target)),
                None => {
                    tracing::warn!("Dropping link with disallowed URL {:?}", url);
                    Some("<a>".to_string())
                }
            }
        }
        "label" => {
            let label = span
                .data
                .as_ref()
                .and_then(|d| d.get("label"))
                .and_then(|l| l.as_str())
                .unwrap_or_default();
            Some(format!(r#"<span class="{}">"#, html_escape(label)))
        }
        _ => None,
    }
}

fn close_tag(span: &Span) -> &'static str {
    match span.kind.as_str() {
        "strong" => "</strong>",
        "em" => "</em>",
        "hyperlink" => "</a>",
        "label" => "</span>",
        _ => "",
    }
}

/// Apply spans to text, closing and reopening tags where spans overlap
fn render_spans(text: &str, spans: &[Span]) -> String {
    let mut spans: Vec<&Span> = spans.iter().filter(|s| open_tag(s).is_some()).collect();
    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut out = String::with_capacity(text.len());
    let mut stack: Vec<&Span> = Vec::new();
    let mut pending = spans.into_iter().peekable();
    let mut offset = 0usize;

    for ch in text.chars() {
        close_until(&mut out, &mut stack, offset);
        while let Some(span) = pending.next_if(|s| s.start <= offset) {
            if span.end > offset {
                out.push_str(&open_tag(span).unwrap_or_default());
                stack.push(span);
            }
        }

        match ch {
            '\n' => out.push_str("<br />"),
            c => out.push_str(&html_escape(c.encode_utf8(&mut [0u8; 4]))),
        }
        offset += ch.len_utf16();
    }

    while let Some(span) = stack.pop() {
        out.push_str(close_tag(span));
    }

    out
}

/// Close every span ending at or before `offset`, reopening inner spans that
/// are still running
fn close_until<'a>(out: &mut String, stack: &mut Vec<&'a Span>, offset: usize) {
    let Some(lowest) = stack.iter().position(|s| s.end <= offset) else {
        return;
    };

    let mut reopen = Vec::new();
    while stack.len() > lowest {
        if let Some(span) = stack.pop() {
            out.push_str(close_tag(span));
            if span.end > offset {
                reopen.push(span);
            }
        }
    }

    for span in reopen.into_iter().rev() {
        out.push_str(&open_tag(span).unwrap_or_default());
        stack.push(span);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn blocks(value: serde_json::Value) -> RichText {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_as_text_joins_blocks() {
        let body = blocks(json!([
            {"type": "paragraph", "text": "Olá mundo", "spans": []},
            {"type": "heading2", "text": "Seção", "spans": []}
        ]));
        assert_eq!(as_text(&body), "Olá mundo Seção");
        assert_eq!(as_text(&[]), "");
    }

    #[test]
    fn test_paragraph_with_spans() {
        let body = blocks(json!([{
            "type": "paragraph",
            "text": "Use <hooks> now",
            "spans": [
                {"start": 0, "end": 3, "type": "strong"},
                {"start": 4, "end": 11, "type": "hyperlink", "data": {"url": "https://react.dev"}}
            ]
        }]));
        assert_eq!(
            as_html(&body),
            r#"<p><strong>Use</strong> <a href="https://react.dev">&lt;hooks&gt;</a> now</p>"#
        );
    }

    #[test]
    fn test_hyperlink_scheme_allow_list() {
        let link = |url: &str| {
            blocks(json!([{
                "type": "paragraph",
                "text": "click",
                "spans": [{"start": 0, "end": 5, "type": "hyperlink", "data": {"url": url}}]
            }]))
        };

        assert_eq!(
            as_html(&link("javascript:alert(1)")),
            "<p><a>click</a></p>"
        );
        assert_eq!(as_html(&link(" JavaScript:alert(1)")), "<p><a>click</a></p>");
        assert_eq!(as_html(&link("data:text/html,hi")), "<p><a>click</a></p>");
        assert_eq!(
            as_html(&link("mailto:ana@blog.dev")),
            r#"<p><a href="mailto:ana@blog.dev">click</a></p>"#
        );
        assert_eq!(
            as_html(&link("/post/hello/")),
            r#"<p><a href="/post/hello/">click</a></p>"#
        );
    }

    #[test]
    fn test_nested_and_overlapping_spans() {
        let body = blocks(json!([{
            "type": "paragraph",
            "text": "abcdef",
            "spans": [
                {"start": 0, "end": 6, "type": "strong"},
                {"start": 2, "end": 4, "type": "em"}
            ]
        }]));
        assert_eq!(as_html(&body), "<p><strong>ab<em>cd</em>ef</strong></p>");

        let body = blocks(json!([{
            "type": "paragraph",
            "text": "abcdef",
            "spans": [
                {"start": 0, "end": 4, "type": "strong"},
                {"start": 2, "end": 6, "type": "em"}
            ]
        }]));
        assert_eq!(
            as_html(&body),
            "<p><strong>ab<em>cd</em></strong><em>ef</em></p>"
        );
    }

    #[test]
    fn test_span_offsets_are_utf16() {
        let body = blocks(json!([{
            "type": "paragraph",
            "text": "🚀 go",
            "spans": [{"start": 3, "end": 5, "type": "em"}]
        }]));
        assert_eq!(as_html(&body), "<p>🚀 <em>go</em></p>");
    }

    #[test]
    fn test_lists_are_grouped() {
        let body = blocks(json!([
            {"type": "list-item", "text": "one", "spans": []},
            {"type": "list-item", "text": "two", "spans": []},
            {"type": "o-list-item", "text": "first", "spans": []},
            {"type": "paragraph", "text": "end", "spans": []}
        ]));
        assert_eq!(
            as_html(&body),
            "<ul><li>one</li><li>two</li></ul><ol><li>first</li></ol><p>end</p>"
        );
    }

    #[test]
    fn test_headings_images_and_line_breaks() {
        let body = blocks(json!([
            {"type": "heading3", "text": "Title", "spans": []},
            {"type": "preformatted", "text": "a\nb", "spans": []},
            {"type": "image", "url": "https://images.prismic.io/x.png", "alt": "rocket"}
        ]));
        assert_eq!(
            as_html(&body),
            concat!(
                "<h3>Title</h3>",
                "<pre>a<br />b</pre>",
                r#"<p class="block-img"><img src="https://images.prismic.io/x.png" alt="rocket" /></p>"#
            )
        );
    }
}
