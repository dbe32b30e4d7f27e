//! Structured text to HTML conversion
//!
//! Structured text arrives as a JSON array of blocks:
//!
//! ```json
//! [{"type": "paragraph", "text": "Hello world", "spans": [{"start": 0, "end": 5, "type": "strong"}]}]
//! ```
//!
//! Consecutive `list-item` / `o-list-item` blocks are grouped into one list.

use serde_json::Value;

use crate::helpers::escape_html;

/// Render structured text as HTML
pub fn as_html(value: &Value) -> String {
    let Some(blocks) = value.as_array() else {
        return String::new();
    };

    let mut html = String::new();
    let mut open_list: Option<&'static str> = None;

    for block in blocks {
        let kind = block.get("type").and_then(Value::as_str).unwrap_or("");

        let list_tag = match kind {
            "list-item" => Some("ul"),
            "o-list-item" => Some("ol"),
            _ => None,
        };
        if open_list != list_tag {
            if let Some(tag) = open_list {
                html.push_str(&format!("</{}>", tag));
            }
            if let Some(tag) = list_tag {
                html.push_str(&format!("<{}>", tag));
            }
            open_list = list_tag;
        }

        match kind {
            "paragraph" => push_element(&mut html, "p", block),
            "preformatted" => push_element(&mut html, "pre", block),
            "list-item" | "o-list-item" => push_element(&mut html, "li", block),
            "heading1" | "heading2" | "heading3" | "heading4" | "heading5" | "heading6" => {
                let tag = format!("h{}", &kind["heading".len()..]);
                push_element(&mut html, &tag, block);
            }
            "image" => html.push_str(&image(block)),
            "embed" => html.push_str(&embed(block)),
            other => tracing::debug!("Skipping unsupported rich text block {:?}", other),
        }
    }

    if let Some(tag) = open_list {
        html.push_str(&format!("</{}>", tag));
    }

    html
}

/// Plain text of structured text, one block per line
pub fn as_text(value: &Value) -> String {
    value
        .as_array()
        .map(|blocks| {
            blocks
                .iter()
                .filter_map(|b| b.get("text").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default()
}

fn push_element(html: &mut String, tag: &str, block: &Value) {
    html.push_str(&format!("<{}>", tag));
    html.push_str(&text_with_spans(block));
    html.push_str(&format!("</{}>", tag));
}

#[derive(Debug)]
struct Span<'a> {
    start: usize,
    end: usize,
    kind: &'a str,
    data: Option<&'a Value>,
}

impl Span<'_> {
    fn open_tag(&self) -> String {
        match self.kind {
            "strong" => "<strong>".to_string(),
            "em" => "<em>".to_string(),
            "hyperlink" => {
                let url = self
                    .data
                    .and_then(|d| d.get("url"))
                    .and_then(Value::as_str)
                    .unwrap_or("#");
                match self
                    .data
                    .and_then(|d| d.get("target"))
                    .and_then(Value::as_str)
                {
                    Some(target) => format!(
                        r#"<a href="{}" target="{}" rel="noopener">"#,
                        escape_html(url),
                        escape_html(target)
                    ),
                    None => format!(r#"<a href="{}">"#, escape_html(url)),
                }
            }
            "label" => {
                let label = self
                    .data
                    .and_then(|d| d.get("label"))
                    .and_then(Value::as_str)
                    .unwrap_or("");
                format!(r#"<span class="{}">"#, escape_html(label))
            }
            _ => String::new(),
        }
    }

    fn close_tag(&self) -> &'static str {
        match self.kind {
            "strong" => "</strong>",
            "em" => "</em>",
            "hyperlink" => "</a>",
            "label" => "</span>",
            _ => "",
        }
    }
}

/// Render a block's text, wrapping span ranges (character offsets) in tags
fn text_with_spans(block: &Value) -> String {
    let text = block.get("text").and_then(Value::as_str).unwrap_or("");
    let chars: Vec<char> = text.chars().collect();

    let mut spans: Vec<Span> = block
        .get("spans")
        .and_then(Value::as_array)
        .map(|spans| {
            spans
                .iter()
                .filter_map(|s| {
                    let start = s.get("start")?.as_u64()? as usize;
                    let end = s.get("end")?.as_u64()? as usize;
                    let kind = s.get("type")?.as_str()?;
                    (start < end).then_some(Span {
                        start,
                        end: end.min(chars.len()),
                        kind,
                        data: s.get("data"),
                    })
                })
                .collect()
        })
        .unwrap_or_default();
    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut out = String::with_capacity(text.len());
    let mut open: Vec<&Span> = Vec::new();

    for i in 0..=chars.len() {
        let closing = open.iter().any(|s| s.end == i);
        let opening: Vec<&Span> = spans.iter().filter(|s| s.start == i && s.end > i).collect();

        if closing {
            // Close everything, then reopen spans still active so the output stays well-formed
            for span in open.iter().rev() {
                out.push_str(span.close_tag());
            }
            open.retain(|s| s.end > i);
            for span in &open {
                out.push_str(&span.open_tag());
            }
        }
        for span in opening {
            out.push_str(&span.open_tag());
            open.push(span);
        }

        if let Some(&c) = chars.get(i) {
            match c {
                '\n' => out.push_str("<br />"),
                _ => out.push_str(&escape_html(&c.to_string())),
            }
        }
    }

    out
}

fn image(block: &Value) -> String {
    let url = block.get("url").and_then(Value::as_str).unwrap_or("");
    let alt = block.get("alt").and_then(Value::as_str).unwrap_or("");
    format!(
        r#"<p class="block-img"><img src="{}" alt="{}" /></p>"#,
        escape_html(url),
        escape_html(alt)
    )
}

fn embed(block: &Value) -> String {
    let Some(oembed) = block.get("oembed") else {
        return String::new();
    };
    let get = |key: &str| oembed.get(key).and_then(Value::as_str).unwrap_or("");
    format!(
        r#"<div data-oembed="{}" data-oembed-type="{}" data-oembed-provider="{}">{}</div>"#,
        escape_html(get("embed_url")),
        escape_html(get("type")),
        escape_html(get("provider_name")),
        get("html")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paragraphs_and_headings() {
        let value = json!([
            {"type": "heading2", "text": "Título", "spans": []},
            {"type": "paragraph", "text": "Corpo <do> texto", "spans": []}
        ]);
        assert_eq!(
            as_html(&value),
            "<h2>Título</h2><p>Corpo &lt;do&gt; texto</p>"
        );
    }

    #[test]
    fn test_spans() {
        let value = json!([{
            "type": "paragraph",
            "text": "Hello bold link",
            "spans": [
                {"start": 6, "end": 10, "type": "strong"},
                {"start": 11, "end": 15, "type": "hyperlink", "data": {"url": "https://rust-lang.org"}}
            ]
        }]);
        assert_eq!(
            as_html(&value),
            r#"<p>Hello <strong>bold</strong> <a href="https://rust-lang.org">link</a></p>"#
        );
    }

    #[test]
    fn test_overlapping_spans_are_well_formed() {
        let value = json!([{
            "type": "paragraph",
            "text": "abcd",
            "spans": [
                {"start": 0, "end": 3, "type": "strong"},
                {"start": 1, "end": 4, "type": "em"}
            ]
        }]);
        assert_eq!(
            as_html(&value),
            "<p><strong>a<em>bc</em></strong><em>d</em></p>"
        );
    }

    #[test]
    fn test_spans_use_char_offsets() {
        let value = json!([{
            "type": "paragraph",
            "text": "ação rápida",
            "spans": [{"start": 5, "end": 11, "type": "em"}]
        }]);
        assert_eq!(as_html(&value), "<p>ação <em>rápida</em></p>");
    }

    #[test]
    fn test_lists_are_grouped() {
        let value = json!([
            {"type": "list-item", "text": "one", "spans": []},
            {"type": "list-item", "text": "two", "spans": []},
            {"type": "o-list-item", "text": "first", "spans": []},
            {"type": "paragraph", "text": "after", "spans": []}
        ]);
        assert_eq!(
            as_html(&value),
            "<ul><li>one</li><li>two</li></ul><ol><li>first</li></ol><p>after</p>"
        );
    }

    #[test]
    fn test_line_breaks_and_image() {
        let value = json!([
            {"type": "preformatted", "text": "a\nb", "spans": []},
            {"type": "image", "url": "https://images.prismic.io/x.png", "alt": "diagram"}
        ]);
        assert_eq!(
            as_html(&value),
            r#"<pre>a<br />b</pre><p class="block-img"><img src="https://images.prismic.io/x.png" alt="diagram" /></p>"#
        );
    }

    #[test]
    fn test_unknown_and_invalid_input() {
        assert_eq!(as_html(&json!([{"type": "mystery", "text": "?"}])), "");
        assert_eq!(as_html(&json!("not an array")), "");
    }

    #[test]
    fn test_as_text() {
        let value = json!([
            {"type": "paragraph", "text": "one", "spans": []},
            {"type": "paragraph", "text": "two", "spans": []}
        ]);
        assert_eq!(as_text(&value), "one\ntwo");
    }
}
