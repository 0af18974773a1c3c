use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IconError {
    #[error("XML parsing error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("Invalid SVG: {0}")]
    InvalidSvg(String),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Optimizer `{name}` failed: {reason}")]
    Optimizer { name: String, reason: String },

    #[error("Cannot {operation} a switch file that is {state}")]
    Assembly {
        operation: &'static str,
        state: &'static str,
    },

    #[error("Output file already exists: {}", .0.display())]
    OutputExists(PathBuf),
}
