//! Primary/secondary shape classification.

use crate::dimension::BoundingBox;

/// Minimum share of the document area a shape must cover to count as a
/// background plate.
pub const SECONDARY_COVERAGE: f64 = 0.9;

/// Whether `element` is a secondary (background) shape within `document`.
///
/// Purely geometric: a shape is secondary when it covers at least 90% of
/// the document area, or sits exactly at the origin with the document's
/// size. Unknown dimensions and zero-area documents are never secondary.
pub fn is_secondary(element: &BoundingBox, document: &BoundingBox) -> bool {
    let (Some(width), Some(height)) = (element.width, element.height) else {
        return false;
    };

    let document_area = document.area().unwrap_or(0.0);
    if document_area == 0.0 {
        return false;
    }

    if (width * height) / document_area >= SECONDARY_COVERAGE {
        return true;
    }

    element.x == 0.0
        && element.y == 0.0
        && Some(width) == document.width
        && Some(height) == document.height
}
