//! Rescaling documents into the canonical 24x24 box.

use tracing::debug;

use crate::ast::*;
use crate::dimension::current_view_box;
use crate::serialize::format_number;

/// Side length of the canonical box.
pub const CANONICAL_SIZE: f64 = 24.0;

/// The canonical `viewBox` value.
pub const CANONICAL_VIEW_BOX: &str = "0 0 24 24";

/// Rewrite the document into the canonical `0 0 24 24` box.
///
/// Content is scaled to fit the longer side and centred on the shorter one,
/// by wrapping all top-level elements in a single transformed `<g>`.
/// Returns `false` when nothing was changed: the box is already exactly
/// canonical, or the current box cannot be resolved.
pub fn canonicalize(doc: &mut Document) -> bool {
    let Some([min_x, min_y, width, height]) = current_view_box(&doc.root) else {
        debug!("no resolvable viewBox, skipping canonicalization");
        return false;
    };

    if [min_x, min_y, width, height] == [0.0, 0.0, CANONICAL_SIZE, CANONICAL_SIZE] {
        return false;
    }

    let longest = width.max(height);
    if !longest.is_finite() || longest <= 0.0 {
        debug!(width, height, "degenerate viewBox, skipping canonicalization");
        return false;
    }

    let scale = CANONICAL_SIZE / longest;
    let offset_x = (CANONICAL_SIZE - width * scale) / 2.0;
    let offset_y = (CANONICAL_SIZE - height * scale) / 2.0;

    let mut group = Element::new("g");
    group.set_attr(
        "transform",
        format!(
            "translate({} {}) scale({})",
            format_number(offset_x),
            format_number(offset_y),
            format_number(scale)
        ),
    );

    // Only elements move into the group; stray text and comments stay put.
    let mut rest = Vec::new();
    for child in std::mem::take(&mut doc.root.children) {
        match child {
            Node::Element(_) => group.children.push(child),
            other => rest.push(other),
        }
    }
    rest.push(Node::Element(group));
    doc.root.children = rest;

    doc.root.set_attr("viewBox", CANONICAL_VIEW_BOX);
    doc.root.set_attr("width", format_number(CANONICAL_SIZE));
    doc.root.set_attr("height", format_number(CANONICAL_SIZE));

    debug!(scale, offset_x, offset_y, "canonicalized to 24x24");
    true
}
