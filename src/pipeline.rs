//! Per-icon normalization and batch conversion.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use ignore::WalkBuilder;
use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};

use crate::artifact::{IconArtifact, preserved_attributes, view_box_string};
use crate::ast::{Document, Element};
use crate::canonical::canonicalize;
use crate::color::{has_white_colors, rewrite_colors};
use crate::config::NormalizationConfig;
use crate::dimension::{BoundingBox, document_box};
use crate::error::IconError;
use crate::naming::{icon_name_from_path, kebab_case};
use crate::normalize::normalize_attributes;
use crate::optimize::Optimizer;
use crate::parse::parse_svg;
use crate::serialize::serialize_inner;

/// Extension of source files; anything else is skipped.
pub const SOURCE_EXTENSION: &str = "svg";

/// Normalize one icon's markup into an artifact.
///
/// `name` is kebab-cased. The markup is parsed, whitespace-normalized,
/// optionally canonicalized to 24x24, recolored, and serialized without its
/// root wrapper.
#[instrument(skip(markup, config))]
pub fn normalize_icon(
    name: &str,
    markup: &str,
    config: &NormalizationConfig,
) -> Result<IconArtifact, IconError> {
    let mut doc = parse_svg(markup)?;
    normalize_attributes(&mut doc.root);

    if config.canonicalize_geometry {
        canonicalize(&mut doc);
    }

    let document = document_box(&doc.root);
    let preserved = preserved_attributes(&doc.root);
    let preserve_contrast = config.preserve_contrast_for(has_white_colors(&doc.root));
    debug!(?document, preserve_contrast, "recoloring");

    recolor(&mut doc, &document, preserve_contrast);

    Ok(IconArtifact {
        name: kebab_case(name),
        inner_markup: serialize_inner(&doc),
        view_box: view_box_string(&doc.root),
        width: document.width,
        height: document.height,
        preserved_attributes: preserved,
    })
}

/// Recolor everything below the root. The root itself is never emitted, so
/// it is only consulted for an inherited `fill="none"`.
pub fn recolor(doc: &mut Document, document: &BoundingBox, preserve_contrast: bool) {
    let root_fill_none = root_has_fill_none(&doc.root);
    for child in doc.root.child_elements_mut() {
        rewrite_colors(child, document, root_fill_none, preserve_contrast);
    }
}

fn root_has_fill_none(root: &Element) -> bool {
    root.get_attr("fill")
        .is_some_and(|fill| fill.trim().eq_ignore_ascii_case("none"))
}

/// Where an icon comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum IconSource {
    /// A file on disk, named after its stem
    File(PathBuf),
    /// Markup given directly, with an explicit name
    Inline { name: String, markup: String },
}

impl IconSource {
    /// Path used to identify this source in reports.
    pub fn label(&self) -> PathBuf {
        match self {
            IconSource::File(path) => path.clone(),
            IconSource::Inline { name, .. } => PathBuf::from(name),
        }
    }
}

/// Result of converting a batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Converted icons, in input order
    pub artifacts: Vec<IconArtifact>,
    /// Sources that were not icon markup
    pub skipped: Vec<PathBuf>,
    /// Sources that failed to convert
    pub failures: Vec<(PathBuf, IconError)>,
}

/// Converts sources into artifacts with a fixed configuration.
pub struct Converter {
    config: NormalizationConfig,
    optimizer: Option<Box<dyn Optimizer>>,
}

impl Converter {
    pub fn new(config: NormalizationConfig) -> Self {
        Self {
            config,
            optimizer: None,
        }
    }

    pub fn with_optimizer(mut self, optimizer: Box<dyn Optimizer>) -> Self {
        self.optimizer = Some(optimizer);
        self
    }

    pub fn config(&self) -> &NormalizationConfig {
        &self.config
    }

    /// Convert one source. Files without the `.svg` extension yield `Ok(None)`.
    pub fn convert(&self, source: &IconSource) -> Result<Option<IconArtifact>, IconError> {
        let (name, markup) = match source {
            IconSource::File(path) => {
                if !has_source_extension(path) {
                    debug!(path = %path.display(), "not an svg, skipping");
                    return Ok(None);
                }
                let name = icon_name_from_path(path).ok_or_else(|| {
                    IconError::InvalidSvg(format!("Cannot derive an icon name from {}", path.display()))
                })?;
                (name, Cow::Owned(fs::read_to_string(path)?))
            }
            IconSource::Inline { name, markup } => (name.clone(), Cow::Borrowed(markup.as_str())),
        };

        let markup = self.optimize(&name, markup);
        normalize_icon(&name, &markup, &self.config).map(Some)
    }

    fn optimize<'a>(&self, name: &str, markup: Cow<'a, str>) -> Cow<'a, str> {
        let Some(optimizer) = &self.optimizer else {
            return markup;
        };

        match optimizer.optimize(&markup) {
            Ok(optimized) => Cow::Owned(optimized),
            Err(e) => {
                warn!(icon = name, optimizer = optimizer.name(), "optimization failed, using source as-is: {}", e);
                markup
            }
        }
    }

    /// Convert many sources in parallel.
    ///
    /// Failures are collected per source and never stop the batch.
    /// Artifacts keep the order of `sources`.
    pub fn convert_batch(&self, sources: &[IconSource]) -> BatchReport {
        let total = sources.len();
        let processed = AtomicUsize::new(0);

        let results: Vec<_> = sources
            .par_iter()
            .map(|source| {
                let result = self.convert(source);
                let done = processed.fetch_add(1, Ordering::Relaxed) + 1;
                debug!(done, total, "processed {}", source.label().display());
                (source.label(), result)
            })
            .collect();

        let mut report = BatchReport::default();
        for (label, result) in results {
            match result {
                Ok(Some(artifact)) => report.artifacts.push(artifact),
                Ok(None) => report.skipped.push(label),
                Err(e) => {
                    warn!("{}: {}", label.display(), e);
                    report.failures.push((label, e));
                }
            }
        }

        info!(
            converted = report.artifacts.len(),
            skipped = report.skipped.len(),
            failed = report.failures.len(),
            "batch finished"
        );
        report
    }
}

fn has_source_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}

/// Every file under `dir`, recursively, sorted by path.
///
/// Hidden and git-ignored files are included; filtering by extension
/// happens at conversion time.
pub fn collect_sources(dir: &Path) -> Result<Vec<IconSource>, IconError> {
    let mut files = Vec::new();
    for entry in WalkBuilder::new(dir)
        .hidden(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .ignore(false)
        .parents(false)
        .build()
    {
        let entry = entry.map_err(|e| match e.into_io_error() {
            Some(io) => IconError::Io(io),
            None => IconError::InvalidSvg(format!("Cannot walk {}", dir.display())),
        })?;
        if entry.file_type().is_some_and(|t| t.is_file()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files.into_iter().map(IconSource::File).collect())
}
