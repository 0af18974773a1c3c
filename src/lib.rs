//! iconsmith - SVG icons to recolorable Blade components
//!
//! iconsmith rescales arbitrary SVG icons into a canonical 24x24 box,
//! repaints them in `currentColor` (dimming full-bleed background shapes and
//! optionally keeping white highlights), and assembles the results into
//! Blade templates.

mod artifact;
mod assemble;
mod ast;
mod canonical;
mod classify;
mod color;
mod config;
mod dimension;
mod error;
mod naming;
mod normalize;
mod optimize;
mod output;
mod parse;
mod pipeline;
mod serialize;

pub use artifact::*;
pub use assemble::*;
pub use ast::*;
pub use canonical::*;
pub use classify::*;
pub use color::*;
pub use config::*;
pub use dimension::*;
pub use error::*;
pub use naming::*;
pub use normalize::*;
pub use optimize::*;
pub use output::*;
pub use parse::*;
pub use pipeline::*;
pub use serialize::*;

/// Normalize an inline SVG string with default settings.
pub fn convert(name: &str, svg: &str) -> Result<IconArtifact, IconError> {
    normalize_icon(name, svg, &NormalizationConfig::default())
}
