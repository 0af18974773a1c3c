//! Writing assembled templates to disk.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::artifact::IconArtifact;
use crate::assemble::{SwitchFile, TEMPLATE_EXTENSION, render_plain, render_variant};
use crate::config::{NormalizationConfig, OutputShape, Template};
use crate::error::IconError;
use crate::naming::kebab_case;

/// Where and how to write a batch.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub dir: PathBuf,
    /// Name of the combined file in single mode, without extension
    pub file_name: String,
    /// Replace an existing combined file
    pub overwrite: bool,
}

/// Path of the combined file for `options`.
pub fn combined_path(options: &OutputOptions) -> PathBuf {
    options
        .dir
        .join(format!("{}{}", kebab_case(&options.file_name), TEMPLATE_EXTENSION))
}

/// Write `artifacts` in the shape `config` asks for and return the files
/// written. Every call regenerates its files from scratch.
pub fn write_artifacts(
    artifacts: &[IconArtifact],
    config: &NormalizationConfig,
    options: &OutputOptions,
) -> Result<Vec<PathBuf>, IconError> {
    fs::create_dir_all(&options.dir)?;

    match config.effective_output() {
        OutputShape::Single => write_combined(artifacts, options).map(|path| vec![path]),
        OutputShape::Multiple => artifacts
            .iter()
            .map(|artifact| write_component(artifact, config.template, &options.dir))
            .collect(),
    }
}

fn write_combined(artifacts: &[IconArtifact], options: &OutputOptions) -> Result<PathBuf, IconError> {
    let path = combined_path(options);
    if path.exists() && !options.overwrite {
        return Err(IconError::OutputExists(path));
    }

    let mut file = SwitchFile::new(BufWriter::new(File::create(&path)?));
    file.open()?;
    for artifact in artifacts {
        file.append(artifact)?;
    }
    file.close()?;

    info!(path = %path.display(), icons = file.cases(), "wrote combined file");
    Ok(path)
}

fn write_component(artifact: &IconArtifact, template: Template, dir: &Path) -> Result<PathBuf, IconError> {
    let path = dir.join(format!("{}{}", artifact.name, TEMPLATE_EXTENSION));
    let contents = match template {
        Template::Plain => render_plain(artifact),
        Template::Variant => render_variant(artifact),
    };
    fs::write(&path, contents)?;
    debug!(path = %path.display(), "wrote component");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icon(name: &str) -> IconArtifact {
        IconArtifact {
            name: name.into(),
            inner_markup: r#"<path d="M0 0"/>"#.into(),
            view_box: "0 0 24 24".into(),
            width: Some(24.0),
            height: Some(24.0),
            preserved_attributes: Vec::new(),
        }
    }

    fn options(dir: &Path) -> OutputOptions {
        OutputOptions {
            dir: dir.to_path_buf(),
            file_name: "My Icons".into(),
            overwrite: false,
        }
    }

    #[test]
    fn test_combined_file_refuses_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        let config = NormalizationConfig::default();
        let opts = options(tmp.path());

        let written = write_artifacts(&[icon("a")], &config, &opts).unwrap();
        assert_eq!(written, vec![tmp.path().join("my-icons.blade.php")]);

        assert!(matches!(
            write_artifacts(&[icon("a")], &config, &opts),
            Err(IconError::OutputExists(_))
        ));

        let forced = OutputOptions {
            overwrite: true,
            ..opts
        };
        write_artifacts(&[icon("b")], &config, &forced).unwrap();
        let contents = fs::read_to_string(&written[0]).unwrap();
        assert!(contents.contains("@case('b')"));
        assert!(!contents.contains("@case('a')"));
    }

    #[test]
    fn test_variant_writes_one_file_per_icon() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join("flux/icon");
        let config = NormalizationConfig {
            template: Template::Variant,
            ..NormalizationConfig::default()
        };

        let written = write_artifacts(&[icon("a"), icon("b")], &config, &options(&out_dir)).unwrap();
        assert_eq!(written.len(), 2);
        let contents = fs::read_to_string(out_dir.join("b.blade.php")).unwrap();
        assert!(contents.contains("data-flux-icon aria-hidden=\"true\""));
    }
}
