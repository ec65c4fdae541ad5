//! Inline text markup used in card descriptions.
//!
//! - `**text**` renders bold
//! - `[id]` renders the icon `id` when it is a known icon, otherwise stays literal
//!
//! Unclosed markers are literal text.

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Bold(String),
    Icon { id: String, src: String },
}

/// Split `text` into inline segments. `icons` maps icon id to its `src`.
pub fn parse(text: &str, icons: &HashMap<String, String>) -> Vec<Inline> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if let Some(after) = rest.strip_prefix("**") {
            if let Some(end) = after.find("**") {
                if end > 0 {
                    flush(&mut literal, &mut segments);
                    segments.push(Inline::Bold(after[..end].to_string()));
                    rest = &after[end + 2..];
                    continue;
                }
            }
            literal.push_str("**");
            rest = after;
            continue;
        }

        if c == '[' {
            if let Some(end) = rest.find(']') {
                let id = &rest[1..end];
                if let Some(src) = icons.get(id) {
                    flush(&mut literal, &mut segments);
                    segments.push(Inline::Icon {
                        id: id.to_string(),
                        src: src.clone(),
                    });
                    rest = &rest[end + 1..];
                    continue;
                }
            }
        }

        literal.push(c);
        rest = &rest[c.len_utf8()..];
    }

    flush(&mut literal, &mut segments);
    segments
}

fn flush(literal: &mut String, segments: &mut Vec<Inline>) {
    if !literal.is_empty() {
        segments.push(Inline::Text(std::mem::take(literal)));
    }
}

/// Render segments as HTML.
pub fn to_html(segments: &[Inline]) -> String {
    let mut html = String::new();
    for segment in segments {
        match segment {
            Inline::Text(text) => html.push_str(&escape_html(text)),
            Inline::Bold(text) => {
                html.push_str("<strong>");
                html.push_str(&escape_html(text));
                html.push_str("</strong>");
            }
            Inline::Icon { id, src } => {
                html.push_str(&format!(
                    "<img class=\"inline-icon\" src=\"{}\" alt=\"{}\"/>",
                    escape_html(src),
                    escape_html(id)
                ));
            }
        }
    }
    html
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
