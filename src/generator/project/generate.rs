use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::write::write_atomic;
use crate::catalog::{Catalog, CatalogSource};
use crate::error::{CatalogError, Result};
use crate::generator::config::GeneratorConfig;
use crate::generator::context::RenderContext;
use crate::generator::descriptors::model_descriptors;
use crate::generator::templates::{renderer_for, RendererKind, BUNDLED_TEMPLATE};

/// Default destination of the generated module, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "generated/catalog_data.rs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub output: PathBuf,
    /// `None` renders the bundled template
    pub template: Option<PathBuf>,
    pub renderer: RendererKind,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            template: None,
            renderer: RendererKind::Auto,
        }
    }
}

impl GenerateOptions {
    /// Defaults overlaid with whatever the config file sets.
    #[must_use]
    pub fn from_config(config: Option<&GeneratorConfig>) -> Self {
        let mut options = Self::default();
        if let Some(config) = config {
            if let Some(output) = &config.output {
                options.output = output.clone();
            }
            options.template = config.template.clone();
            if let Some(renderer) = config.renderer {
                options.renderer = renderer;
            }
        }
        options
    }
}

/// What a generation run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub path: PathBuf,
    pub bytes: usize,
    pub renderer: RendererKind,
    pub tower_count: usize,
    pub hero_count: usize,
    pub model_count: usize,
}

fn read_template(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            debug!(template = %path.display(), "reading template");
            fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))
        }
        None => Ok(BUNDLED_TEMPLATE.to_string()),
    }
}

/// Render the catalog module in memory without touching the output path.
pub fn render_catalog_module(
    catalog: &Catalog,
    template: &str,
    renderer: RendererKind,
) -> Result<(String, RenderContext, RendererKind)> {
    let context = RenderContext::new(catalog, &model_descriptors());
    let renderer = renderer_for(renderer)?;
    let text = renderer.render(template, &context)?;
    Ok((text, context, renderer.kind()))
}

/// Load records from `source`, render them and atomically replace `options.output`.
///
/// Nothing is written unless every earlier step succeeded.
pub fn generate_catalog_module(
    source: &dyn CatalogSource,
    options: &GenerateOptions,
) -> Result<GenerationReport> {
    let catalog = Catalog::load(source)?;
    let template = read_template(options.template.as_deref())?;
    let (text, context, renderer) = render_catalog_module(&catalog, &template, options.renderer)?;
    write_atomic(&options.output, text.as_bytes())?;

    let report = GenerationReport {
        path: options.output.clone(),
        bytes: text.len(),
        renderer,
        tower_count: context.tower_count,
        hero_count: context.hero_count,
        model_count: context.model_count,
    };
    info!(
        path = %report.path.display(),
        bytes = report.bytes,
        renderer = %report.renderer,
        towers = report.tower_count,
        heroes = report.hero_count,
        "generated catalog module"
    );
    Ok(report)
}
