//! Length parsing and bounding-box resolution.

use crate::ast::Element;

/// Axis-aligned box in viewBox units.
///
/// `width`/`height` are `None` when the geometry cannot be derived, which is
/// different from a zero-sized box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: Some(width),
            height: Some(height),
        }
    }

    /// A box whose size is unknown.
    pub fn indeterminate() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: None,
            height: None,
        }
    }

    /// Area, or `None` if either dimension is unknown.
    pub fn area(&self) -> Option<f64> {
        Some(self.width? * self.height?)
    }
}

/// Parse a length token: a number optionally suffixed with `px`, `pt` or `%`.
///
/// Units are stripped, not converted. Signs, exponents and anything else
/// yield `None`.
pub fn resolve_length(token: &str) -> Option<f64> {
    let number = ["px", "pt", "%"]
        .iter()
        .find_map(|unit| token.strip_suffix(*unit))
        .unwrap_or(token);

    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }

    number.parse().ok()
}

/// Split a `viewBox` value into its four numbers.
///
/// Returns `None` unless there are exactly four whitespace or comma
/// separated finite numbers.
pub fn parse_view_box(value: &str) -> Option<[f64; 4]> {
    let mut parts = [0.0; 4];
    let mut count = 0;
    for token in value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
    {
        if count == 4 {
            return None;
        }
        parts[count] = token.parse().ok().filter(|v: &f64| v.is_finite())?;
        count += 1;
    }
    (count == 4).then_some(parts)
}

/// The box an element occupies, for classification purposes.
///
/// Circles and ellipses derive it from their centre and radii; paths are
/// always indeterminate; everything else reads `x`/`y`/`width`/`height`.
/// Missing or unparsable coordinates count as 0.
pub fn element_box(elem: &Element) -> BoundingBox {
    let coord = |name: &str| elem.get_attr(name).and_then(resolve_length).unwrap_or(0.0);

    match elem.name.local.as_str() {
        "circle" => {
            let r = coord("r");
            BoundingBox::new(coord("cx") - r, coord("cy") - r, r * 2.0, r * 2.0)
        }
        "ellipse" => {
            let (rx, ry) = (coord("rx"), coord("ry"));
            BoundingBox::new(coord("cx") - rx, coord("cy") - ry, rx * 2.0, ry * 2.0)
        }
        "path" => BoundingBox::indeterminate(),
        _ => BoundingBox {
            x: coord("x"),
            y: coord("y"),
            width: elem.get_attr("width").and_then(resolve_length),
            height: elem.get_attr("height").and_then(resolve_length),
        },
    }
}

/// The document's reference box, anchored at the origin.
///
/// Explicit `width`/`height` win; when either is missing or zero, the third
/// and fourth `viewBox` numbers are used instead.
pub fn document_box(root: &Element) -> BoundingBox {
    let width = root.get_attr("width").and_then(resolve_length);
    let height = root.get_attr("height").and_then(resolve_length);

    let usable = |v: Option<f64>| v.filter(|v| *v != 0.0);
    if let (Some(width), Some(height)) = (usable(width), usable(height)) {
        return BoundingBox::new(0.0, 0.0, width, height);
    }

    match root.get_attr("viewBox").and_then(parse_view_box) {
        Some([_, _, width, height]) => BoundingBox::new(0.0, 0.0, width, height),
        None => BoundingBox {
            x: 0.0,
            y: 0.0,
            width,
            height,
        },
    }
}

/// The document's current coordinate system as `[min_x, min_y, width, height]`.
///
/// Taken from `viewBox`, or from `width`/`height` at the origin when there
/// is no `viewBox`. `None` when neither yields four numbers.
pub fn current_view_box(root: &Element) -> Option<[f64; 4]> {
    match root.get_attr("viewBox") {
        Some(view_box) => parse_view_box(view_box),
        None => {
            let width = root.get_attr("width").and_then(resolve_length)?;
            let height = root.get_attr("height").and_then(resolve_length)?;
            Some([0.0, 0.0, width, height])
        }
    }
}
