use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::context::RenderContext;
use super::fallback::FallbackRenderer;
use crate::error::{CatalogError, Result};

/// Template rendered by `towerstats-gen generate` when no override is given.
pub const BUNDLED_TEMPLATE: &str = include_str!("../../templates/catalog_data.rs.j2");

/// Name the bundled template is registered under.
pub const BUNDLED_TEMPLATE_NAME: &str = "catalog_data.rs.j2";

/// Which rendering strategy to use.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Engine when compiled in, fallback otherwise
    #[default]
    Auto,
    /// The minijinja engine (`engine` feature)
    Engine,
    /// Built-in regex renderer
    Fallback,
}

impl fmt::Display for RendererKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RendererKind::Auto => "auto",
            RendererKind::Engine => "engine",
            RendererKind::Fallback => "fallback",
        })
    }
}

/// Turns template text plus a [`RenderContext`] into the output document.
pub trait TemplateRenderer {
    /// The concrete strategy; never [`RendererKind::Auto`].
    fn kind(&self) -> RendererKind;

    fn render(&self, template: &str, context: &RenderContext) -> Result<String>;
}

/// minijinja-backed renderer configured to match the fallback's whitespace rules.
#[cfg(feature = "engine")]
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineRenderer;

#[cfg(feature = "engine")]
impl EngineRenderer {
    fn environment<'s>() -> minijinja::Environment<'s> {
        let mut env = minijinja::Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(minijinja::UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| minijinja::AutoEscape::None);
        env
    }
}

#[cfg(feature = "engine")]
fn engine_error(e: &minijinja::Error) -> CatalogError {
    CatalogError::template(e.line().unwrap_or(0), e.to_string())
}

#[cfg(feature = "engine")]
impl TemplateRenderer for EngineRenderer {
    fn kind(&self) -> RendererKind {
        RendererKind::Engine
    }

    fn render(&self, template: &str, context: &RenderContext) -> Result<String> {
        let mut env = Self::environment();
        env.add_template(BUNDLED_TEMPLATE_NAME, template)
            .map_err(|e| engine_error(&e))?;
        let tmpl = env
            .get_template(BUNDLED_TEMPLATE_NAME)
            .map_err(|e| engine_error(&e))?;
        tmpl.render(context).map_err(|e| engine_error(&e))
    }
}

/// Resolve a requested strategy to a concrete renderer.
pub fn renderer_for(kind: RendererKind) -> Result<Box<dyn TemplateRenderer>> {
    let renderer: Box<dyn TemplateRenderer> = match kind {
        #[cfg(feature = "engine")]
        RendererKind::Auto | RendererKind::Engine => Box::new(EngineRenderer),
        #[cfg(not(feature = "engine"))]
        RendererKind::Auto => Box::new(FallbackRenderer),
        #[cfg(not(feature = "engine"))]
        RendererKind::Engine => {
            return Err(CatalogError::template(
                0,
                "the template engine is not compiled in; rebuild with the `engine` feature",
            ))
        }
        RendererKind::Fallback => Box::new(FallbackRenderer),
    };
    debug!(requested = %kind, selected = %renderer.kind(), "selected template renderer");
    Ok(renderer)
}

/// Render `template` with the strategy chosen by `kind`.
pub fn render_with(kind: RendererKind, template: &str, context: &RenderContext) -> Result<String> {
    renderer_for(kind)?.render(template, context)
}
