//! Fill and stroke rewriting.
//!
//! Every painted shape ends up drawn in `currentColor`, so the icon follows
//! the surrounding text color. Background plates (see [`is_secondary`]) are
//! dimmed to 30% opacity and lose their stroke recoloring, and white
//! highlights can be exempted to keep contrast against the filled glyph.

use crate::ast::Element;
use crate::classify::is_secondary;
use crate::dimension::{BoundingBox, element_box};

pub const CURRENT_COLOR: &str = "currentColor";

/// Opacity applied to secondary shapes.
pub const SECONDARY_OPACITY: &str = "0.3";

/// Elements that never receive a synthesized fill.
const NON_PAINTING: &[&str] = &[
    "defs",
    "clipPath",
    "mask",
    "pattern",
    "linearGradient",
    "radialGradient",
    "filter",
    "g",
];

const WHITE: &[&str] = &[
    "white",
    "#fff",
    "#ffffff",
    "rgb(255,255,255)",
    "rgba(255,255,255,1)",
];

/// Lowercase and drop all whitespace, so `RGB(255, 255, 255)` compares
/// equal to `rgb(255,255,255)`.
fn canonical_color(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whether a paint value is one of the white spellings.
pub fn is_white(value: &str) -> bool {
    WHITE.contains(&canonical_color(value).as_str())
}

fn is_none(value: &str) -> bool {
    canonical_color(value) == "none"
}

fn is_transparent(value: &str) -> bool {
    matches!(
        canonical_color(value).as_str(),
        "transparent" | "rgba(0,0,0,0)"
    )
}

/// Whether any element in the subtree has a white fill or stroke.
pub fn has_white_colors(elem: &Element) -> bool {
    elem.any_element(&|e: &Element| {
        e.get_attr("fill").is_some_and(is_white) || e.get_attr("stroke").is_some_and(is_white)
    })
}

/// Recolor `elem` and its descendants in place.
///
/// `document` is the reference box used for classification.
/// `parent_fill_none` is true when an ancestor has `fill="none"`, which
/// suppresses synthesized fills below it.
pub fn rewrite_colors(
    elem: &mut Element,
    document: &BoundingBox,
    parent_fill_none: bool,
    preserve_contrast: bool,
) {
    let secondary = is_secondary(&element_box(elem), document);
    let fill_none = elem.get_attr("fill").is_some_and(is_none);
    let keep = |value: &str| preserve_contrast && is_white(value);

    match elem.get_attr("fill") {
        Some(fill) if is_none(fill) || keep(fill) => {}
        Some(_) => paint_fill(elem, secondary),
        None => {
            let structural = NON_PAINTING.contains(&elem.name.local.as_str());
            if !parent_fill_none && elem.get_attr("stroke").is_none() && !structural {
                paint_fill(elem, secondary);
            }
        }
    }

    if let Some(stroke) = elem.get_attr("stroke") {
        if is_transparent(stroke) {
            elem.set_attr("stroke", "none");
        } else if !is_none(stroke) && !keep(stroke) && !secondary {
            elem.set_attr("stroke", CURRENT_COLOR);
        }
    }

    for child in elem.child_elements_mut() {
        rewrite_colors(
            child,
            document,
            parent_fill_none || fill_none,
            preserve_contrast,
        );
    }
}

fn paint_fill(elem: &mut Element, secondary: bool) {
    elem.set_attr("fill", CURRENT_COLOR);
    if secondary {
        elem.set_attr("opacity", SECONDARY_OPACITY);
    }
}
