//! Serialise a host tree as HTML.

use std::fmt::{self, Write};

use crate::node::{Element, Node};

/// Elements that never carry children or a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

/// Base stylesheet for the classes the renderer emits.
pub const BASE_STYLES: &str = r#"
:root { --gf-border: #d6dbe3; --gf-primary: #3b6fd8; --gf-secondary: #6c5bb8; --gf-surface: #eef1f5; }
body { font-family: system-ui, sans-serif; background: var(--gf-surface); margin: 2rem; }
.gf-form { display: flex; flex-direction: column; gap: 12px; }
.gf-cell { padding: 8px 12px; min-width: 0; }
.gf-truncate { overflow: hidden; text-overflow: ellipsis; white-space: nowrap; }
.gf-required { margin-left: 4px; }
.gf-variant-primary.gf-required, .gf-variant-primary.gf-cell--rules { color: var(--gf-primary); }
.gf-variant-secondary.gf-required, .gf-variant-secondary.gf-cell--rules { color: var(--gf-secondary); }
.neu-raised { background: var(--gf-surface); box-shadow: 3px 3px 6px #c8ccd3, -3px -3px 6px #ffffff; border-radius: 8px; }
.neu-inset { background: var(--gf-surface); box-shadow: inset 2px 2px 4px #c8ccd3, inset -2px -2px 4px #ffffff; border-radius: 8px; }
.neu-flat { background: transparent; }
.gf-modal-backdrop { position: fixed; inset: 0; background: rgba(0, 0, 0, 0.3); display: flex; align-items: center; justify-content: center; }
.gf-modal { padding: 16px 20px; max-width: 480px; }
"#;

/// HTML for `node`. Text and attribute values are escaped.
pub fn to_html(node: &Node) -> String {
    let mut out = String::new();
    write_html(&mut out, node).map(|()| out).unwrap_or_default()
}

pub fn write_html<W: Write>(out: &mut W, node: &Node) -> fmt::Result {
    match node {
        Node::Empty => Ok(()),
        Node::Text(text) => out.write_str(&escape_html(text)),
        Node::Number(n) => write!(out, "{n}"),
        Node::Fragment(children) => children.iter().try_for_each(|c| write_html(out, c)),
        Node::Element(el) => write_element(out, el),
        Node::Row(row) => write_html(out, &row.render_standalone()),
    }
}

fn write_element<W: Write>(out: &mut W, el: &Element) -> fmt::Result {
    write!(out, "<{}", el.tag)?;
    for (key, value) in &el.attrs {
        write!(out, " {}=\"{}\"", key, escape_html(value))?;
    }
    out.write_char('>')?;
    if VOID_TAGS.contains(&el.tag.as_str()) {
        return Ok(());
    }
    for child in &el.children {
        write_html(out, child)?;
    }
    write!(out, "</{}>", el.tag)
}

/// A complete standalone page around `body`.
pub fn document(title: &str, body: &Node) -> String {
    let mut html = String::new();
    let written = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{}</title>
<style>{}</style>
</head>
<body>
{}
</body>
</html>
"#,
        escape_html(title),
        BASE_STYLES,
        to_html(body)
    );
    written.map(|()| html).unwrap_or_default()
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
