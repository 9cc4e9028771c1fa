use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::catalog::SampleSource;
use crate::generator::{
    export_document, generate_catalog_module, load_generator_config, resolve_config_path,
    sample_document, GenerateOptions, GeneratorConfig, RendererKind, BUNDLED_TEMPLATE,
    DEFAULT_DATA_OUTPUT,
};
use crate::linter::{has_errors, lint_template, print_lint_issues};

/// Command-line interface for the catalog code generator
#[derive(Parser, Debug)]
#[command(name = "towerstats-gen", version)]
#[command(about = "Render the tower and hero tables into a Rust module", long_about = None)]
pub struct GenCli {
    /// Generator config file (default: towerstats-gen.toml in the working directory, if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<GenCommands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum GenCommands {
    /// Render the catalog module (default)
    Generate {
        /// Destination file (default: generated/catalog_data.rs)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Template to render instead of the bundled one
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Rendering strategy
        #[arg(long, value_enum)]
        renderer: Option<RendererKind>,
    },
    /// Write the sample records as the JSON document the service loads
    ExportData {
        /// Destination file (default: data/btd6_data.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check a template against the subset the fallback renderer supports
    Lint {
        /// Template to check (default: the bundled template)
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Exit with an error if any errors are found
        #[arg(long, default_value_t = false)]
        fail_on_error: bool,
    },
}

fn load_config(explicit: Option<&Path>) -> Result<Option<GeneratorConfig>> {
    let Some(path) = resolve_config_path(explicit, Path::new(".")) else {
        return Ok(None);
    };
    let config = load_generator_config(&path)?;
    if config.is_none() && explicit.is_some() {
        bail!("generator config not found: {}", path.display());
    }
    if config.is_some() {
        info!(path = %path.display(), "loaded generator config");
    }
    Ok(config)
}

/// Resolve options for a `generate` run: defaults, then config, then flags.
#[must_use]
pub fn generate_options(
    config: Option<&GeneratorConfig>,
    output: Option<PathBuf>,
    template: Option<PathBuf>,
    renderer: Option<RendererKind>,
) -> GenerateOptions {
    let mut options = GenerateOptions::from_config(config);
    if let Some(output) = output {
        options.output = output;
    }
    if template.is_some() {
        options.template = template;
    }
    if let Some(renderer) = renderer {
        options.renderer = renderer;
    }
    options
}

/// Execute a generator command.
pub fn run_gen_cli(cli: GenCli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let command = cli.command.unwrap_or(GenCommands::Generate {
        output: None,
        template: None,
        renderer: None,
    });

    match command {
        GenCommands::Generate {
            output,
            template,
            renderer,
        } => {
            let options = generate_options(config.as_ref(), output, template, renderer);
            let report = generate_catalog_module(&SampleSource, &options)
                .context("catalog module generation failed")?;
            println!(
                "Generated {} ({} bytes, {} towers, {} heroes, {} renderer)",
                report.path.display(),
                report.bytes,
                report.tower_count,
                report.hero_count,
                report.renderer
            );
            Ok(())
        }
        GenCommands::ExportData { output } => {
            let path = output
                .or_else(|| config.as_ref().and_then(|c| c.data_output.clone()))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_OUTPUT));
            let bytes = export_document(&sample_document(), &path)
                .context("sample data export failed")?;
            println!("Exported {} ({bytes} bytes)", path.display());
            Ok(())
        }
        GenCommands::Lint {
            template,
            fail_on_error,
        } => {
            let template = template.or_else(|| config.as_ref().and_then(|c| c.template.clone()));
            let source = match &template {
                Some(path) => std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read template {}", path.display()))?,
                None => BUNDLED_TEMPLATE.to_string(),
            };
            let issues = lint_template(&source);
            print_lint_issues(&issues);
            if fail_on_error && has_errors(&issues) {
                bail!("template has lint errors");
            }
            Ok(())
        }
    }
}
