//! Attribute value normalization.

use crate::ast::Element;

/// Collapse whitespace runs in every attribute value of the subtree to a
/// single space and trim both ends.
pub fn normalize_attributes(elem: &mut Element) {
    elem.for_each_element_mut(&mut |e: &mut Element| {
        for attr in &mut e.attributes {
            if needs_collapse(&attr.value) {
                attr.value = collapse_whitespace(&attr.value);
            }
        }
    });
}

/// Collapse internal whitespace runs to one space and trim.
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn needs_collapse(value: &str) -> bool {
    let mut prev_ws = true;
    for c in value.chars() {
        let ws = c.is_whitespace();
        if ws && (prev_ws || c != ' ') {
            return true;
        }
        prev_ws = ws;
    }
    prev_ws && !value.is_empty()
}
