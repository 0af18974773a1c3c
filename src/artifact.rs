//! The normalized icon handed to the assembler.

use crate::ast::Element;
use crate::dimension::resolve_length;
use crate::serialize::{format_number, push_escaped_attr};

/// Root attributes copied verbatim into every output.
const PRESERVED_ATTRIBUTES: &[&str] = &["fill", "stroke-width", "overflow"];

/// One normalized, recolored icon.
#[derive(Debug, Clone, PartialEq)]
pub struct IconArtifact {
    /// Kebab-case icon name
    pub name: String,
    /// Serialized children of the root `<svg>`
    pub inner_markup: String,
    /// `viewBox` value, "minX minY width height"
    pub view_box: String,
    pub width: Option<f64>,
    pub height: Option<f64>,
    /// Allow-listed root attributes, in allow-list order
    pub preserved_attributes: Vec<(String, String)>,
}

impl IconArtifact {
    /// The preserved attributes as ` name="value"` pairs, each with a
    /// leading space, ready to splice into an opening tag.
    pub fn preserved_attributes_string(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.preserved_attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            push_escaped_attr(&mut out, value);
            out.push('"');
        }
        out
    }

    /// Opening `<svg>` tag for this icon, with `extra` spliced in before `>`.
    pub fn open_tag(&self, extra: &str) -> String {
        let mut out = String::from("<svg xmlns=\"http://www.w3.org/2000/svg\"");
        if let Some(width) = self.width {
            out.push_str(&format!(" width=\"{}\"", format_number(width)));
        }
        if let Some(height) = self.height {
            out.push_str(&format!(" height=\"{}\"", format_number(height)));
        }
        out.push_str(&self.preserved_attributes_string());
        out.push_str(" viewBox=\"");
        push_escaped_attr(&mut out, &self.view_box);
        out.push('"');
        if !extra.is_empty() {
            out.push(' ');
            out.push_str(extra);
        }
        out.push('>');
        out
    }
}

/// Collect the allow-listed root attributes. `fill` is only kept when it is
/// exactly `none`.
pub fn preserved_attributes(root: &Element) -> Vec<(String, String)> {
    PRESERVED_ATTRIBUTES
        .iter()
        .filter_map(|&name| {
            let value = root.get_attr(name)?;
            if name == "fill" && value != "none" {
                return None;
            }
            Some((name.to_string(), value.to_string()))
        })
        .collect()
}

/// The root's `viewBox`, or `0 0 width height` when it has none.
pub fn view_box_string(root: &Element) -> String {
    if let Some(view_box) = root.get_attr("viewBox") {
        return view_box.to_string();
    }

    let length = |name: &str| {
        root.get_attr(name)
            .and_then(resolve_length)
            .unwrap_or(0.0)
    };
    format!(
        "0 0 {} {}",
        format_number(length("width")),
        format_number(length("height"))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_svg;

    #[test]
    fn test_preserved_attributes() {
        let doc = parse_svg(
            r#"<svg fill="none" overflow="visible" stroke="red" stroke-width="1.5"/>"#,
        )
        .unwrap();
        assert_eq!(
            preserved_attributes(&doc.root),
            vec![
                ("fill".to_string(), "none".to_string()),
                ("stroke-width".to_string(), "1.5".to_string()),
                ("overflow".to_string(), "visible".to_string()),
            ]
        );
    }

    #[test]
    fn test_painted_root_fill_is_not_preserved() {
        let doc = parse_svg(r##"<svg fill="#000" stroke-width="2"/>"##).unwrap();
        assert_eq!(
            preserved_attributes(&doc.root),
            vec![("stroke-width".to_string(), "2".to_string())]
        );
    }

    #[test]
    fn test_view_box_string() {
        let doc = parse_svg(r#"<svg viewBox="0 0 24 24" width="48"/>"#).unwrap();
        assert_eq!(view_box_string(&doc.root), "0 0 24 24");

        let doc = parse_svg(r#"<svg width="32px" height="16"/>"#).unwrap();
        assert_eq!(view_box_string(&doc.root), "0 0 32 16");

        let doc = parse_svg(r#"<svg/>"#).unwrap();
        assert_eq!(view_box_string(&doc.root), "0 0 0 0");
    }

    #[test]
    fn test_open_tag() {
        let artifact = IconArtifact {
            name: "home".into(),
            inner_markup: String::new(),
            view_box: "0 0 24 24".into(),
            width: Some(24.0),
            height: Some(24.0),
            preserved_attributes: vec![("fill".into(), "none".into())],
        };
        assert_eq!(
            artifact.open_tag("{{ $attributes }}"),
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" fill="none" viewBox="0 0 24 24" {{ $attributes }}>"#
        );

        let bare = IconArtifact {
            width: None,
            height: None,
            preserved_attributes: Vec::new(),
            ..artifact
        };
        assert_eq!(
            bare.open_tag(""),
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24">"#
        );
    }
}
