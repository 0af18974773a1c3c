//! Markup serialization.

use crate::ast::*;

/// Serialize a whole Document, root element included.
pub fn serialize(doc: &Document) -> String {
    let mut out = String::new();
    serialize_element(&mut out, &doc.root);
    out
}

/// Serialize the children of the root element, without the `<svg>` wrapper.
pub fn serialize_inner(doc: &Document) -> String {
    let mut out = String::new();
    for child in &doc.root.children {
        serialize_node(&mut out, child);
    }
    out
}

/// Format a number the way it should appear in attribute values:
/// shortest round-trip form, integral values without a fraction.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        // also catches -0
        return "0".into();
    }

    let mut buf = ryu::Buffer::new();
    let s = buf.format(n);
    s.strip_suffix(".0").unwrap_or(s).to_string()
}

fn serialize_element(out: &mut String, elem: &Element) {
    out.push('<');
    out.push_str(&elem.name.full_name());

    for attr in &elem.attributes {
        out.push(' ');
        out.push_str(&attr.name.full_name());
        out.push_str("=\"");
        push_escaped_attr(out, &attr.value);
        out.push('"');
    }

    if elem.children.is_empty() {
        out.push_str("/>");
    } else {
        out.push('>');

        for child in &elem.children {
            serialize_node(out, child);
        }

        out.push_str("</");
        out.push_str(&elem.name.full_name());
        out.push('>');
    }
}

fn serialize_node(out: &mut String, node: &Node) {
    match node {
        Node::Element(elem) => serialize_element(out, elem),
        Node::Text(text) => push_escaped_text(out, text),
        Node::CData(data) => {
            out.push_str("<![CDATA[");
            out.push_str(data);
            out.push_str("]]>");
        }
        Node::Comment(comment) => {
            out.push_str("<!--");
            out.push_str(comment);
            out.push_str("-->");
        }
    }
}

pub(crate) fn push_escaped_attr(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '"' => out.push_str("&quot;"),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn push_escaped_text(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}
