//! Persisted catalog documents and the sources that produce them.
//!
//! The on-disk schema keeps the original data generator's layout: costs are
//! nested under `base_cost` / `cost` keyed by difficulty and identifiers are
//! derived from display names at load time.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::types::{slugify, Category, Hero, Tower, TowerStats, TowerUpgrade, UpgradePath};
use crate::error::{CatalogError, Result};

/// Per-difficulty cost table as stored in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostTable {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
    pub impoppable: u32,
}

fn default_pierce() -> u32 {
    1
}

fn default_attack_speed() -> f64 {
    1.0
}

fn default_range() -> u32 {
    30
}

fn default_true() -> bool {
    true
}

/// Stat block as stored in the document. Missing keys take game defaults;
/// unknown numeric keys are kept as extra stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsRecord {
    #[serde(default)]
    pub damage: u32,
    #[serde(default = "default_pierce")]
    pub pierce: u32,
    #[serde(default = "default_attack_speed")]
    pub attack_speed: f64,
    #[serde(default = "default_range")]
    pub range: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projectile_speed: Option<u32>,
    #[serde(default)]
    pub camo_detection: bool,
    #[serde(default)]
    pub lead_popping: bool,
    #[serde(default = "default_true")]
    pub frozen_popping: bool,
    #[serde(flatten)]
    pub extra: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeRecord {
    pub name: String,
    pub path: UpgradePath,
    pub tier: u8,
    pub cost: CostTable,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ability_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerRecord {
    pub name: String,
    pub category: Category,
    pub description: String,
    pub base_cost: CostTable,
    pub base_stats: StatsRecord,
    #[serde(default)]
    pub upgrades: Vec<UpgradeRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotkey: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroRecord {
    pub name: String,
    pub description: String,
    pub cost: u32,
    #[serde(default)]
    pub abilities: Vec<String>,
    #[serde(default)]
    pub level_requirements: Vec<u32>,
}

/// The whole persisted catalog: towers and heroes in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub towers: Vec<TowerRecord>,
    #[serde(default)]
    pub heroes: Vec<HeroRecord>,
}

impl UpgradeRecord {
    pub(crate) fn to_upgrade(&self) -> TowerUpgrade {
        TowerUpgrade {
            name: self.name.clone(),
            path: self.path,
            tier: self.tier,
            cost_easy: self.cost.easy,
            cost_medium: self.cost.medium,
            cost_hard: self.cost.hard,
            cost_impoppable: self.cost.impoppable,
            description: self.description.clone(),
            ability_description: self.ability_description.clone(),
        }
    }
}

impl TowerRecord {
    /// Identifier derived from the display name.
    #[must_use]
    pub fn id(&self) -> String {
        slugify(&self.name)
    }

    pub(crate) fn to_tower(&self) -> Tower {
        let stats = &self.base_stats;
        Tower {
            id: self.id(),
            name: self.name.clone(),
            category: self.category,
            cost_easy: self.base_cost.easy,
            cost_medium: self.base_cost.medium,
            cost_hard: self.base_cost.hard,
            cost_impoppable: self.base_cost.impoppable,
            description: self.description.clone(),
            base_stats: TowerStats {
                damage: stats.damage,
                pierce: stats.pierce,
                attack_speed: stats.attack_speed,
                range: stats.range,
                projectile_speed: stats.projectile_speed,
                camo_detection: stats.camo_detection,
                lead_popping: stats.lead_popping,
                frozen_popping: stats.frozen_popping,
                extra: stats.extra.clone(),
            },
            upgrades: self.upgrades.iter().map(UpgradeRecord::to_upgrade).collect(),
            hotkey: self.hotkey.clone(),
        }
    }
}

impl HeroRecord {
    #[must_use]
    pub fn id(&self) -> String {
        slugify(&self.name)
    }

    pub(crate) fn to_hero(&self) -> Hero {
        Hero {
            id: self.id(),
            name: self.name.clone(),
            description: self.description.clone(),
            cost: self.cost,
            abilities: self.abilities.clone(),
            level_requirements: self.level_requirements.clone(),
        }
    }
}

/// Serialization format of a persisted document, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        if path
            .extension()
            .map(|s| s == "yaml" || s == "yml")
            .unwrap_or(false)
        {
            DocumentFormat::Yaml
        } else {
            DocumentFormat::Json
        }
    }
}

/// Parse a document from text. `origin` is only used in error messages.
pub fn parse_document(text: &str, format: DocumentFormat, origin: &Path) -> Result<CatalogDocument> {
    let parsed = match format {
        DocumentFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        DocumentFormat::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
    };
    parsed.map_err(|message| CatalogError::Parse {
        path: origin.to_path_buf(),
        message,
    })
}

/// Anything that can hand the service a catalog document.
pub trait CatalogSource {
    /// Human-readable origin for logs and summaries.
    fn describe(&self) -> String;

    fn load(&self) -> Result<CatalogDocument>;
}

/// A JSON or YAML document on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<CatalogDocument> {
        debug!(path = %self.path.display(), "reading catalog document");
        let text = fs::read_to_string(&self.path).map_err(|e| CatalogError::io(&self.path, e))?;
        let document = parse_document(&text, DocumentFormat::from_path(&self.path), &self.path)?;
        info!(
            path = %self.path.display(),
            towers = document.towers.len(),
            heroes = document.heroes.len(),
            "loaded catalog document"
        );
        Ok(document)
    }
}

/// The generator's built-in sample records.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleSource;

impl CatalogSource for SampleSource {
    fn describe(&self) -> String {
        "built-in sample data".to_string()
    }

    fn load(&self) -> Result<CatalogDocument> {
        Ok(crate::generator::sample_document())
    }
}

/// An in-memory document is its own source; handy for fixtures.
impl CatalogSource for CatalogDocument {
    fn describe(&self) -> String {
        "in-memory document".to_string()
    }

    fn load(&self) -> Result<CatalogDocument> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOWER_JSON: &str = r#"{
        "towers": [{
            "name": "Banana Farm",
            "category": "Support",
            "description": "Generates money each round.",
            "base_cost": {"easy": 850, "medium": 1000, "hard": 1080, "impoppable": 1200},
            "base_stats": {"damage": 0, "money_per_round": 20, "attack_speed": 0, "range": 0, "frozen_popping": false},
            "hotkey": "F"
        }]
    }"#;

    #[test]
    fn test_stat_defaults_and_extra() {
        let doc = parse_document(TOWER_JSON, DocumentFormat::Json, Path::new("inline.json")).unwrap();
        let tower = doc.towers[0].to_tower();
        assert_eq!(tower.id, "banana_farm");
        assert_eq!(tower.base_stats.pierce, 1);
        assert!(!tower.base_stats.frozen_popping);
        assert_eq!(tower.base_stats.projectile_speed, None);
        assert_eq!(tower.base_stats.extra.get("money_per_round"), Some(&20.0));
        assert!(tower.upgrades.is_empty());
        assert!(doc.heroes.is_empty());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("a.yaml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("a.yml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("a.json")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("data")), DocumentFormat::Json);
    }

    #[test]
    fn test_parse_error_names_origin() {
        let err = parse_document("{not json", DocumentFormat::Json, Path::new("broken.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = FileSource::new("/definitely/not/here.json").load().unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
