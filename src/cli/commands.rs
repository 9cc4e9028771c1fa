use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::catalog::{Catalog, Category, Difficulty, UpgradePath};
use crate::dispatcher::Dispatcher;
use crate::error::CatalogError;
use crate::runtime_config::ServiceConfig;
use crate::server::serve;

/// Command-line interface for the catalog service
///
/// Without a subcommand the service reads JSON-RPC requests from stdin.
#[derive(Parser, Debug)]
#[command(name = "towerstats", version)]
#[command(about = "Bloons TD 6 tower and hero catalog", long_about = None)]
pub struct Cli {
    /// Catalog document (JSON or YAML); overrides TOWERSTATS_DATA
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Serve JSON-RPC 2.0 requests, one per line, on stdin/stdout
    Serve,
    /// Show one tower with its stats and upgrades
    Tower { id: String },
    /// Show one hero
    Hero { id: String },
    /// List towers in catalog order
    Towers {
        /// Only towers of this category (Primary, Military, Magic, Support)
        #[arg(long)]
        category: Option<String>,
    },
    /// List heroes in catalog order
    Heroes,
    /// Case-insensitive substring search
    Search {
        query: String,

        /// Search heroes instead of towers
        #[arg(long, default_value_t = false)]
        heroes: bool,
    },
    /// Compare base costs; unknown ids are reported as not_found
    Compare {
        #[arg(short, long, default_value = "medium")]
        difficulty: String,

        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Upgrades of one path, ordered by tier
    UpgradePath { tower_id: String, path: String },
    /// Cost of a tower plus one path up to a tier
    UpgradeCost {
        tower_id: String,
        path: String,
        tier: u8,

        #[arg(short, long, default_value = "medium")]
        difficulty: String,
    },
    /// Counts per category and hero names
    Summary,
}

/// Exit status for a failed run: 2 when a lookup missed, 1 otherwise.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> u8 {
    let not_found = err
        .chain()
        .filter_map(|cause| cause.downcast_ref::<CatalogError>())
        .any(CatalogError::is_not_found);
    if not_found {
        2
    } else {
        1
    }
}

/// Load the catalog and run the requested command.
pub fn run_cli(cli: Cli) -> Result<()> {
    let config = ServiceConfig::from_env().with_data(cli.data);
    let source = config.source();
    let catalog = Catalog::load(source.as_ref())
        .with_context(|| format!("failed to load catalog from {}", source.describe()))?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            serve(&catalog, &Dispatcher::new(), stdin.lock(), stdout.lock())
                .context("stdio transport failed")?;
            Ok(())
        }
        command => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            run_query(&catalog, &command, &source.describe(), &mut out)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Run a query command against a loaded catalog, writing JSON (or the text
/// summary) to `out`.
pub fn run_query(
    catalog: &Catalog,
    command: &Commands,
    source: &str,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Commands::Serve => Ok(()),
        Commands::Tower { id } => {
            let tower = catalog
                .get_tower(id)
                .ok_or_else(|| CatalogError::not_found("tower", id))?;
            print_json(out, tower)
        }
        Commands::Hero { id } => {
            let hero = catalog
                .get_hero(id)
                .ok_or_else(|| CatalogError::not_found("hero", id))?;
            print_json(out, hero)
        }
        Commands::Towers { category } => {
            let category = category
                .as_deref()
                .map(str::parse::<Category>)
                .transpose()?;
            print_json(out, &catalog.list_towers(category))
        }
        Commands::Heroes => print_json(out, &catalog.list_heroes()),
        Commands::Search { query, heroes } => {
            if *heroes {
                print_json(out, &catalog.search_heroes(query))
            } else {
                print_json(out, &catalog.search_towers(query))
            }
        }
        Commands::Compare { difficulty, ids } => {
            let difficulty: Difficulty = difficulty.parse()?;
            print_json(out, &catalog.compare_costs(ids, difficulty))
        }
        Commands::UpgradePath { tower_id, path } => {
            let path: UpgradePath = path.parse()?;
            print_json(out, &catalog.upgrade_path(tower_id, path)?)
        }
        Commands::UpgradeCost {
            tower_id,
            path,
            tier,
            difficulty,
        } => {
            let cost =
                catalog.upgrade_path_cost(tower_id, path.parse()?, *tier, difficulty.parse()?)?;
            print_json(out, &cost)
        }
        Commands::Summary => {
            let text = catalog.summary().render(source)?;
            writeln!(out, "{}", text.trim_end())?;
            Ok(())
        }
    }
}
