#![allow(clippy::unwrap_used, clippy::expect_used)]
//! End-to-end generation runs against files on disk.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use towerstats::catalog::{Catalog, CatalogSource, FileSource, SampleSource};
use towerstats::generator::{
    export_document, generate_catalog_module, sample_document, GenerateOptions, RendererKind,
};
use towerstats::linter::{has_errors, lint_template, LintSeverity};
use towerstats::CatalogError;

fn temp_dir() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("gen_it_{}_{}", std::process::id(), nanos));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

const ID_LIST_TEMPLATE: &str = "\
// {{ tower_count }} towers
{% for tower in towers %}
{{ tower.id }} = {{ tower.name }}
{% endfor %}
// heroes
{% for hero in heroes %}
{{ hero.id }}
{% endfor %}
";

#[test]
fn test_custom_template_over_fixture_document() {
    let dir = temp_dir();
    let template = dir.join("ids.txt.j2");
    fs::write(&template, ID_LIST_TEMPLATE).unwrap();
    let options = GenerateOptions {
        output: dir.join("nested").join("ids.txt"),
        template: Some(template),
        renderer: RendererKind::Fallback,
    };

    let report =
        generate_catalog_module(&FileSource::new(fixture("mini_catalog.json")), &options).unwrap();
    assert_eq!(report.tower_count, 3);
    assert_eq!(report.hero_count, 2);
    assert_eq!(report.renderer, RendererKind::Fallback);

    let written = fs::read_to_string(&options.output).unwrap();
    assert_eq!(report.bytes, written.len());
    assert_eq!(
        written,
        "// 3 towers\n\
         dart_monkey = Dart Monkey\n\
         sniper_monkey = Sniper Monkey\n\
         banana_farm = Banana Farm\n\
         // heroes\n\
         quincy\n\
         obyn_greenfoot\n"
    );
}

#[cfg(feature = "engine")]
#[test]
fn test_engine_matches_fallback_on_custom_template() {
    let dir = temp_dir();
    let template = dir.join("ids.txt.j2");
    fs::write(&template, ID_LIST_TEMPLATE).unwrap();
    let mut outputs = Vec::new();
    for renderer in [RendererKind::Engine, RendererKind::Fallback] {
        let options = GenerateOptions {
            output: dir.join(format!("{renderer}.txt")),
            template: Some(template.clone()),
            renderer,
        };
        generate_catalog_module(&SampleSource, &options).unwrap();
        outputs.push(fs::read_to_string(&options.output).unwrap());
    }
    assert_eq!(outputs[0], outputs[1]);
}

#[cfg(feature = "engine")]
#[test]
fn test_engine_matches_fallback_on_spacing_between_loops() {
    use towerstats::generator::{model_descriptors, render_with, RenderContext};
    let catalog = Catalog::load(&SampleSource).unwrap();
    let context = RenderContext::new(&catalog, &model_descriptors());
    let template =
        "{% for h in heroes %}{{ h.id }}{% endfor %}   {% for h in heroes %}Y{% endfor %}\n";

    let engine = render_with(RendererKind::Engine, template, &context).unwrap();
    let fallback = render_with(RendererKind::Fallback, template, &context).unwrap();
    assert_eq!(engine, "quincygwendolinstriker_jones   YYY");
    assert_eq!(fallback, engine);
}

#[test]
fn test_unsupported_template_writes_nothing() {
    let dir = temp_dir();
    let template = dir.join("filter.j2");
    fs::write(&template, "towers:\n{{ towers | length }}\n").unwrap();
    let options = GenerateOptions {
        output: dir.join("out.rs"),
        template: Some(template),
        renderer: RendererKind::Fallback,
    };

    let err = generate_catalog_module(&SampleSource, &options).unwrap_err();
    match err {
        CatalogError::Template { line, .. } => assert_eq!(line, 2),
        other => panic!("expected Template error, got {other:?}"),
    }
    assert!(!options.output.exists());
}

#[test]
fn test_invalid_source_writes_nothing() {
    let dir = temp_dir();
    let mut document = sample_document();
    document.towers.push(document.towers[0].clone());
    let options = GenerateOptions {
        output: dir.join("out.rs"),
        ..GenerateOptions::default()
    };
    let err = generate_catalog_module(&document, &options).unwrap_err();
    assert!(matches!(err, CatalogError::Validation { .. }));
    assert!(!options.output.exists());
}

#[test]
fn test_exported_document_feeds_the_service() {
    let dir = temp_dir();
    let path = dir.join("data").join("btd6_data.json");
    let bytes = export_document(&sample_document(), &path).unwrap();
    assert_eq!(bytes as u64, fs::metadata(&path).unwrap().len());

    let from_file = Catalog::load(&FileSource::new(&path)).unwrap();
    let from_sample = Catalog::load(&SampleSource).unwrap();
    assert_eq!(from_file.list_towers(None), from_sample.list_towers(None));
    assert_eq!(from_file.list_heroes(), from_sample.list_heroes());
    assert_eq!(FileSource::new(&path).load().unwrap(), sample_document());
}

#[test]
fn test_lint_flags_every_problem_with_lines() {
    let source = "\
{% if tower_count %}
{{ towers }}
{% for t in towers %}{% for u in t.upgrades %}{% endfor %}{% endfor %}
";
    let issues = lint_template(source);
    assert!(has_errors(&issues));
    let lines: Vec<usize> = issues
        .iter()
        .filter(|i| i.severity == LintSeverity::Error)
        .map(|i| i.line)
        .collect();
    assert!(lines.contains(&1));
    assert!(lines.contains(&3));
    assert!(lines.windows(2).all(|w| w[0] <= w[1]));
}
