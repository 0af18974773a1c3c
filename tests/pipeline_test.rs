//! End-to-end conversion tests, from raw markup to written templates.

use std::fs;
use std::path::Path;

use iconsmith::{
    Cleanup, ContrastMode, Converter, IconSource, NormalizationConfig, OutputOptions, OutputShape,
    Template, collect_sources, convert, normalize_icon, render_switch, write_artifacts,
};

fn fixtures() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn inline(name: &str, markup: &str) -> IconSource {
    IconSource::Inline {
        name: name.into(),
        markup: markup.into(),
    }
}

/// A 48x48 icon with a full-bleed plate is rescaled and the plate dimmed.
#[test]
fn test_background_plate_is_dimmed() {
    let artifact = convert(
        "plate",
        r##"<svg viewBox="0 0 48 48"><rect width="48" height="48" fill="#000"/><path fill="#000" d="M12 12h24v24H12z"/></svg>"##,
    )
    .unwrap();

    assert_eq!(artifact.view_box, "0 0 24 24");
    assert_eq!(
        artifact.inner_markup,
        concat!(
            r#"<g transform="translate(0 0) scale(0.5)">"#,
            r#"<rect width="48" height="48" fill="currentColor" opacity="0.3"/>"#,
            r#"<path fill="currentColor" d="M12 12h24v24H12z"/>"#,
            "</g>"
        )
    );
}

#[test]
fn test_transparent_stroke_on_small_circle() {
    let artifact = convert(
        "dot",
        r#"<svg viewBox="0 0 24 24"><circle r="2" cx="12" cy="12" stroke="transparent"/></svg>"#,
    )
    .unwrap();
    assert_eq!(artifact.inner_markup, r#"<circle r="2" cx="12" cy="12" stroke="none"/>"#);
}

#[test]
fn test_auto_contrast_keeps_white() {
    let artifact = convert(
        "spark",
        r#"<svg width="24" height="24"><path fill="white" d="M0 0"/></svg>"#,
    )
    .unwrap();
    assert_eq!(artifact.inner_markup, r#"<path fill="white" d="M0 0"/>"#);
    assert_eq!(artifact.view_box, "0 0 24 24");
}

#[test]
fn test_explicit_contrast_on_icon_without_white() {
    let svg = r##"<svg viewBox="0 0 24 24"><path fill="#ffffff" d="M0 0"/><path fill="#333" d="M1 1"/></svg>"##;
    let always = NormalizationConfig {
        preserve_contrast: ContrastMode::Always,
        ..NormalizationConfig::default()
    };
    let artifact = normalize_icon("two-tone", svg, &always).unwrap();
    assert_eq!(
        artifact.inner_markup,
        r##"<path fill="#ffffff" d="M0 0"/><path fill="currentColor" d="M1 1"/>"##
    );
}

#[test]
fn test_whitespace_is_normalized_before_recoloring() {
    let artifact = convert(
        "spaced",
        "<svg viewBox=\" 0 0\n 24  24 \"><rect width=\"24\" height=\" 24 \" stroke=\" transparent \"/></svg>",
    )
    .unwrap();
    // viewBox collapses to the canonical value, so no wrapping group
    assert_eq!(
        artifact.inner_markup,
        r#"<rect width="24" height="24" stroke="none"/>"#
    );
}

#[test]
fn test_multiple_plain_files() {
    let tmp = tempfile::tempdir().unwrap();
    let config = NormalizationConfig {
        output: OutputShape::Multiple,
        ..NormalizationConfig::default()
    };
    let converter = Converter::new(config);
    let sources = [
        inline("One", r#"<svg viewBox="0 0 24 24"><path d="M1 1"/></svg>"#),
        inline("Two", r#"<svg viewBox="0 0 16 16"><path d="M2 2"/></svg>"#),
        inline("Three", r#"<svg viewBox="0 0 24 24"><path d="M3 3"/></svg>"#),
    ];
    let report = converter.convert_batch(&sources);
    let options = OutputOptions {
        dir: tmp.path().to_path_buf(),
        file_name: "unused".into(),
        overwrite: false,
    };

    let written = write_artifacts(&report.artifacts, &config, &options).unwrap();
    assert_eq!(written.len(), 3);

    for name in ["one", "two", "three"] {
        let contents = fs::read_to_string(tmp.path().join(format!("{name}.blade.php"))).unwrap();
        assert!(contents.starts_with("@props(['name' => null, 'default' => 'size-4'])\n\n<svg "));
        assert_eq!(contents.matches("<svg").count(), 1);
        assert!(!contents.contains("@switch"));
        assert!(contents.contains("{{ $attributes->merge(['class' => $default]) }}"));
    }
    assert!(!tmp.path().join("unused.blade.php").exists());
}

#[test]
fn test_single_combined_file_is_regenerated() {
    let tmp = tempfile::tempdir().unwrap();
    let config = NormalizationConfig::default();
    let converter = Converter::new(config);
    let options = OutputOptions {
        dir: tmp.path().to_path_buf(),
        file_name: "icons".into(),
        overwrite: true,
    };

    let all = [
        inline("a", r#"<svg viewBox="0 0 24 24"><path d="M1 1"/></svg>"#),
        inline("b", r#"<svg viewBox="0 0 24 24"><path d="M2 2"/></svg>"#),
        inline("c", r#"<svg viewBox="0 0 24 24"><path d="M3 3"/></svg>"#),
    ];
    let report = converter.convert_batch(&all);
    let written = write_artifacts(&report.artifacts, &config, &options).unwrap();
    let full = fs::read_to_string(&written[0]).unwrap();

    assert!(full.starts_with("@props(['name' => null, 'default' => 'size-4'])\n@switch($name)\n"));
    assert_eq!(full.matches("@case(").count(), 3);
    assert_eq!(full.matches("@endswitch").count(), 1);
    assert!(full.ends_with("@break\n@endswitch\n"));
    assert!(full.find("@case('a')").unwrap() < full.find("@case('c')").unwrap());
    assert_eq!(full, render_switch(&report.artifacts).unwrap());

    let report = converter.convert_batch(&all[..2]);
    write_artifacts(&report.artifacts, &config, &options).unwrap();
    let partial = fs::read_to_string(&written[0]).unwrap();
    assert_ne!(partial, full);
    assert!(!partial.contains("@case('c')"));
}

#[test]
fn test_fixture_directory_batch() {
    let sources = collect_sources(&fixtures()).unwrap();
    assert_eq!(sources.len(), 5);

    let converter = Converter::new(NormalizationConfig::default()).with_optimizer(Box::new(Cleanup));
    let report = converter.convert_batch(&sources);

    let names: Vec<_> = report.artifacts.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["background-square", "dot", "highlight"]);
    assert_eq!(report.skipped, vec![fixtures().join("README.txt")]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, fixtures().join("broken.svg"));

    let plate = &report.artifacts[0];
    assert!(!plate.inner_markup.contains("<!--"));
    assert!(plate.inner_markup.contains(r#"opacity="0.3""#));

    let highlight = &report.artifacts[2];
    assert_eq!(
        highlight.inner_markup,
        r#"<path fill="currentColor" d="M2 2h20v20H2z"/><path fill="white" d="M8 8h8v8H8z"/>"#
    );
}

#[test]
fn test_fixture_directory_to_variant_components() {
    let tmp = tempfile::tempdir().unwrap();
    let config = NormalizationConfig {
        template: Template::Variant,
        ..NormalizationConfig::default()
    };
    let report = Converter::new(config).convert_batch(&collect_sources(&fixtures()).unwrap());
    let options = OutputOptions {
        dir: tmp.path().to_path_buf(),
        file_name: "ignored".into(),
        overwrite: false,
    };

    let written = write_artifacts(&report.artifacts, &config, &options).unwrap();
    assert_eq!(written.len(), 3);

    let dot = fs::read_to_string(tmp.path().join("dot.blade.php")).unwrap();
    assert!(dot.contains("@props([\n\t'variant' => 'outline',\n])"));
    assert!(dot.contains(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" {{ $attributes->class($classes) }} data-flux-icon aria-hidden="true">"#
    ));
}
