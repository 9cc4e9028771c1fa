//! # towerstats
//!
//! A static Bloons TD 6 tower and hero catalog, queried from the command line
//! or over a line-delimited JSON-RPC 2.0 tool surface on stdio, plus a
//! generator that renders the catalog into a self-contained Rust module.
//!
//! ## Architecture
//!
//! - **[`catalog`]** - document loading, validation and the immutable query snapshot
//! - **[`dispatcher`]** - tool registry mapping RPC methods to catalog queries
//! - **[`server`]** - JSON-RPC request decoding, response encoding and the stdio loop
//! - **[`generator`]** - sample records, model descriptors, template rendering and atomic writes
//! - **[`linter`]** - checks a template against the subset the fallback renderer supports
//! - **[`cli`]** - argument parsing and command execution for both binaries
//! - **[`logging`]** / **[`runtime_config`]** - environment-driven logging and service settings
//!
//! ### Service Flow
//!
//! ```text
//! FileSource | SampleSource → Catalog::load → Catalog ─┬→ CLI query → stdout
//!                                                     └→ serve: stdin line → parse_request
//!                                                            → Dispatcher::handle → stdout line
//! ```
//!
//! ### Generation Flow
//!
//! ```text
//! sample_document → Catalog → RenderContext + model_descriptors
//!     → TemplateRenderer (minijinja | regex fallback) → write_atomic
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use towerstats::catalog::{Catalog, Category, SampleSource};
//!
//! let catalog = Catalog::load(&SampleSource)?;
//! let military = catalog.list_towers(Some(Category::Military));
//! assert!(military.iter().all(|t| t.category == Category::Military));
//! # Ok::<(), towerstats::CatalogError>(())
//! ```
//!
//! ## Talking to the Service
//!
//! ```bash
//! echo '{"jsonrpc":"2.0","id":1,"method":"get_tower_info","params":{"tower_id":"dart_monkey"}}' \
//!   | towerstats serve
//! ```
//!
//! Unknown towers and heroes come back as error `-32004` with
//! `{"kind": ..., "key": ...}` in `data`.

pub mod catalog;
pub mod cli;
pub mod dispatcher;
pub mod error;
pub mod generator;
pub mod linter;
pub mod logging;
pub mod runtime_config;
pub mod server;

pub use error::{CatalogError, Result};
