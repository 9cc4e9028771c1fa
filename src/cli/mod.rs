//! # CLI Module
//!
//! Argument parsing and command execution for both binaries.
//!
//! ## `towerstats`
//!
//! ```bash
//! towerstats                                  # JSON-RPC on stdio
//! towerstats tower dart_monkey
//! towerstats towers --category Military
//! towerstats compare --difficulty hard dart_monkey ninja_monkey
//! towerstats upgrade-cost dart_monkey top 3
//! towerstats --data data/btd6_data.yaml summary
//! ```
//!
//! Query output is pretty JSON on stdout. Exit status is 0 on success, 1 when
//! the catalog fails to load and 2 when a tower, hero or selector is unknown.
//!
//! ## `towerstats-gen`
//!
//! ```bash
//! towerstats-gen                              # generate with defaults
//! towerstats-gen generate --renderer fallback --output out/catalog_data.rs
//! towerstats-gen export-data --output data/btd6_data.json
//! towerstats-gen lint --template my_template.j2 --fail-on-error
//! ```
//!
//! Options resolve as defaults, then `towerstats-gen.toml`, then flags.

mod commands;
mod generate;


pub use commands::{exit_code, run_cli, run_query, Cli, Commands};
pub use generate::{generate_options, run_gen_cli, GenCli, GenCommands};
