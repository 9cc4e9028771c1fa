//! # Generator Module
//!
//! Renders a self-contained Rust module holding the tower and hero tables from
//! hardcoded sample records.
//!
//! ## Architecture
//!
//! ```text
//! sample records → Catalog → RenderContext ─┐
//! model descriptors ────────────────────────┴→ TemplateRenderer → write_atomic
//! ```
//!
//! 1. **[`sample`]** - the fixed towers and heroes
//! 2. **[`descriptors`]** - hand-authored shapes of the generated structs
//! 3. **[`context`]** - pre-rendered Rust fragments the template splices in
//! 4. **[`templates`]** - renderer selection; minijinja when the `engine`
//!    feature is on, [`fallback`] otherwise or on request
//! 5. **`project`** - the generation run and the atomic file writer
//!
//! ## Template Subset
//!
//! The bundled template (`templates/catalog_data.rs.j2`) only uses what the
//! fallback renderer can model exactly, so both strategies produce the same
//! bytes. Check a custom template with `towerstats-gen lint`.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin towerstats-gen -- generate --output generated/catalog_data.rs
//! cargo run --bin towerstats-gen -- export-data --output data/btd6_data.json
//! ```
//!
//! ```rust,ignore
//! use towerstats::catalog::SampleSource;
//! use towerstats::generator::{generate_catalog_module, GenerateOptions};
//!
//! let report = generate_catalog_module(&SampleSource, &GenerateOptions::default())?;
//! println!("wrote {} bytes to {}", report.bytes, report.path.display());
//! ```

pub mod config;
pub mod context;
pub mod descriptors;
pub mod fallback;
mod project;
pub mod sample;
pub mod templates;

pub use config::{load_generator_config, resolve_config_path, GeneratorConfig, DEFAULT_CONFIG_FILE};
pub use context::{ModelBlock, RecordBlock, RenderContext, GENERATOR_NAME};
pub use descriptors::{model_descriptors, FieldDescriptor, ModelDescriptor};
pub use fallback::FallbackRenderer;
pub use project::*;
pub use sample::{sample_document, sample_heroes, sample_towers};
#[cfg(feature = "engine")]
pub use templates::EngineRenderer;
pub use templates::{
    render_with, renderer_for, RendererKind, TemplateRenderer, BUNDLED_TEMPLATE,
    BUNDLED_TEMPLATE_NAME,
};
