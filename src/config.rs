//! Pipeline configuration.

use clap::ValueEnum;

/// Whether white fills and strokes are kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ContrastMode {
    /// Preserve white only if the icon uses white somewhere
    #[default]
    Auto,
    Always,
    Never,
}

/// How many files a batch produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputShape {
    /// One combined `@switch` file
    #[default]
    Single,
    /// One file per icon
    Multiple,
}

/// Which component template each icon is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Template {
    /// `name`/`default` size-class props
    #[default]
    Plain,
    /// `variant` prop mapped to size classes
    Variant,
}

/// Normalization options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizationConfig {
    /// Rescale into the canonical 24x24 box
    pub canonicalize_geometry: bool,
    pub preserve_contrast: ContrastMode,
    pub output: OutputShape,
    pub template: Template,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            canonicalize_geometry: true,
            preserve_contrast: ContrastMode::Auto,
            output: OutputShape::Single,
            template: Template::Plain,
        }
    }
}

impl NormalizationConfig {
    /// The output shape actually used. Variant templates are always one
    /// file per icon.
    pub fn effective_output(&self) -> OutputShape {
        match self.template {
            Template::Variant => OutputShape::Multiple,
            Template::Plain => self.output,
        }
    }

    /// Resolve the contrast flag for one icon, given whether it contains
    /// any white paint.
    pub fn preserve_contrast_for(&self, has_white: bool) -> bool {
        match self.preserve_contrast {
            ContrastMode::Auto => has_white,
            ContrastMode::Always => true,
            ContrastMode::Never => false,
        }
    }
}
