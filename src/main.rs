use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use iconsmith::{
    Cleanup, ContrastMode, Converter, IconSource, NormalizationConfig, Optimizer, OutputOptions,
    OutputShape, Svgo, Template, collect_sources, write_artifacts,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, ValueEnum)]
enum OptimizerKind {
    /// Built-in cleanup of editor metadata and hidden content
    Cleanup,
    /// External `svgo` binary
    Svgo,
    None,
}

#[derive(Parser)]
#[command(name = "iconsmith")]
#[command(about = "Convert SVG icons into recolorable Blade components", long_about = None)]
struct Cli {
    /// Input directory or .svg file; with --inline, the markup itself (use - for stdin)
    #[arg(short, long)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output: PathBuf,

    /// Write one combined file or one file per icon
    #[arg(short, long, value_enum, default_value_t = OutputShape::Single)]
    mode: OutputShape,

    /// Name of the combined file (single mode)
    #[arg(short, long, default_value = "icons")]
    file_name: String,

    /// Use the variant-aware component template (implies --mode multiple)
    #[arg(long)]
    variant: bool,

    /// Treat --input as raw SVG markup
    #[arg(long, requires = "name")]
    inline: bool,

    /// Icon name for --inline input
    #[arg(short, long)]
    name: Option<String>,

    /// Always keep white fills and strokes
    #[arg(long, conflicts_with = "no_preserve_contrast")]
    preserve_contrast: bool,

    /// Never keep white fills and strokes
    #[arg(long)]
    no_preserve_contrast: bool,

    /// Keep the source coordinate system instead of rescaling to 24x24
    #[arg(long)]
    no_canonicalize: bool,

    /// Optimizer run on each source before conversion
    #[arg(long, value_enum, default_value_t = OptimizerKind::Cleanup)]
    optimizer: OptimizerKind,

    /// Overwrite an existing combined file
    #[arg(long)]
    force: bool,
}

impl Cli {
    fn config(&self) -> NormalizationConfig {
        let preserve_contrast = if self.preserve_contrast {
            ContrastMode::Always
        } else if self.no_preserve_contrast {
            ContrastMode::Never
        } else {
            ContrastMode::Auto
        };

        NormalizationConfig {
            canonicalize_geometry: !self.no_canonicalize,
            preserve_contrast,
            output: self.mode,
            template: if self.variant {
                Template::Variant
            } else {
                Template::Plain
            },
        }
    }

    fn optimizer(&self) -> Option<Box<dyn Optimizer>> {
        match self.optimizer {
            OptimizerKind::Cleanup => Some(Box::new(Cleanup)),
            OptimizerKind::Svgo => Some(Box::new(Svgo::default())),
            OptimizerKind::None => None,
        }
    }

    fn sources(&self) -> anyhow::Result<Vec<IconSource>> {
        if self.inline {
            let markup = if self.input == "-" {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                self.input.clone()
            };
            let name = self.name.clone().context("--inline requires --name")?;
            return Ok(vec![IconSource::Inline { name, markup }]);
        }

        let input = PathBuf::from(&self.input);
        let metadata = fs::metadata(&input)
            .with_context(|| format!("cannot read input {}", input.display()))?;
        if metadata.is_dir() {
            Ok(collect_sources(&input)?)
        } else {
            Ok(vec![IconSource::File(input)])
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.config();

    if cli.variant && cli.mode == OutputShape::Single {
        warn!("variant templates are always written one file per icon");
    }

    let sources = cli.sources()?;
    info!("converting {} source(s)", sources.len());

    let mut converter = Converter::new(config);
    if let Some(optimizer) = cli.optimizer() {
        converter = converter.with_optimizer(optimizer);
    }

    let report = converter.convert_batch(&sources);
    if report.artifacts.is_empty() {
        bail!(
            "no icons converted ({} skipped, {} failed)",
            report.skipped.len(),
            report.failures.len()
        );
    }

    let options = OutputOptions {
        dir: cli.output.clone(),
        file_name: cli.file_name.clone(),
        overwrite: cli.force,
    };
    let written = write_artifacts(&report.artifacts, &config, &options)
        .with_context(|| format!("cannot write to {}", options.dir.display()))?;

    info!(
        "converted {} icon(s) into {} file(s); {} skipped, {} failed",
        report.artifacts.len(),
        written.len(),
        report.skipped.len(),
        report.failures.len()
    );

    Ok(())
}
