//! # Catalog Module
//!
//! In-memory tower and hero catalog with the read-only query operations the
//! service exposes.
//!
//! ## Overview
//!
//! - **[`loader`]** - persisted document schema and [`CatalogSource`] implementations
//! - **[`store`]** - the immutable [`Catalog`] snapshot and its queries
//! - **[`types`]** - tower, upgrade and hero records plus the enumerated selectors
//!
//! ## Usage
//!
//! ```rust
//! use towerstats::catalog::{Catalog, Difficulty, SampleSource, UpgradePath};
//!
//! let catalog = Catalog::load(&SampleSource)?;
//! let dart = catalog.get_tower("dart_monkey").expect("sample tower");
//! assert_eq!(dart.cost_medium, 200);
//!
//! let cost = catalog.upgrade_path_cost("dart_monkey", UpgradePath::Top, 2, Difficulty::Medium)?;
//! assert_eq!(cost.total_upgrade_cost, 340);
//! # Ok::<(), towerstats::CatalogError>(())
//! ```

pub mod loader;
pub mod store;
pub mod summary;
pub mod types;

pub use loader::{
    parse_document, CatalogDocument, CatalogSource, CostTable, DocumentFormat, FileSource,
    HeroRecord, SampleSource, StatsRecord, TowerRecord, UpgradeRecord,
};
pub use store::{Catalog, CostComparison, CostLookup, UpgradeCost, UpgradeCostLine, MAX_TIER};
pub use summary::{CatalogSummary, CategoryCount};
pub use types::{slugify, Category, Difficulty, Hero, Tower, TowerStats, TowerUpgrade, UpgradePath};
