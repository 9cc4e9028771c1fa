use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info};

use super::loader::{CatalogDocument, CatalogSource};
use super::types::{Category, Difficulty, Hero, Tower, TowerUpgrade, UpgradePath};
use crate::error::{CatalogError, Result};

/// Highest upgrade tier of any path.
pub const MAX_TIER: u8 = 5;

/// Immutable catalog snapshot.
///
/// Built once at startup and passed by reference to every query; insertion
/// order of the source document is the listing order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    towers: Vec<Tower>,
    tower_index: HashMap<String, usize>,
    heroes: Vec<Hero>,
    hero_index: HashMap<String, usize>,
}

/// Result of a cost lookup for one identifier in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostLookup {
    Cost(u32),
    NotFound,
}

impl Serialize for CostLookup {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            CostLookup::Cost(cost) => serializer.serialize_u32(*cost),
            CostLookup::NotFound => serializer.serialize_str("not_found"),
        }
    }
}

/// Base costs of several towers on one difficulty, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostComparison {
    pub difficulty: Difficulty,
    entries: Vec<(String, CostLookup)>,
}

impl CostComparison {
    #[must_use]
    pub fn get(&self, id: &str) -> Option<CostLookup> {
        self.entries
            .iter()
            .find(|(entry_id, _)| entry_id == id)
            .map(|(_, lookup)| *lookup)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, CostLookup)> {
        self.entries.iter().map(|(id, lookup)| (id.as_str(), *lookup))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Serializes as `{ "<id>": <cost> | "not_found", ... }`.
impl Serialize for CostComparison {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, lookup) in &self.entries {
            map.serialize_entry(id, lookup)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpgradeCostLine {
    pub name: String,
    pub tier: u8,
    pub cost: u32,
}

/// Cost breakdown for buying a tower and upgrading one path up to a tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpgradeCost {
    pub tower_id: String,
    pub path: UpgradePath,
    pub target_tier: u8,
    pub difficulty: Difficulty,
    pub base_cost: u32,
    pub upgrades: Vec<UpgradeCostLine>,
    pub total_upgrade_cost: u64,
    pub total_cost: u64,
}

fn validate_upgrades(tower_id: &str, upgrades: &[TowerUpgrade]) -> Result<()> {
    let mut last_tier: BTreeMap<UpgradePath, u8> = BTreeMap::new();
    for upgrade in upgrades {
        let record = format!("{tower_id}/{}", upgrade.name);
        if upgrade.name.trim().is_empty() {
            return Err(CatalogError::validation(tower_id, "upgrade name is empty"));
        }
        if upgrade.tier == 0 || upgrade.tier > MAX_TIER {
            return Err(CatalogError::validation(
                record,
                format!("tier {} outside 1..={MAX_TIER}", upgrade.tier),
            ));
        }
        if let Some(previous) = last_tier.insert(upgrade.path, upgrade.tier) {
            if upgrade.tier <= previous {
                return Err(CatalogError::validation(
                    record,
                    format!(
                        "tier {} on path {} does not follow tier {previous}",
                        upgrade.tier, upgrade.path
                    ),
                ));
            }
        }
    }
    Ok(())
}

impl Catalog {
    /// Load and validate a catalog from any source.
    pub fn load(source: &dyn CatalogSource) -> Result<Self> {
        let document = source.load()?;
        let catalog = Self::from_document(&document)?;
        info!(
            source = %source.describe(),
            towers = catalog.towers.len(),
            heroes = catalog.heroes.len(),
            "catalog ready"
        );
        Ok(catalog)
    }

    /// Build a snapshot, rejecting the whole document on the first invalid record.
    pub fn from_document(document: &CatalogDocument) -> Result<Self> {
        let mut catalog = Catalog::default();

        for record in &document.towers {
            let tower = record.to_tower();
            if tower.name.trim().is_empty() || tower.id.is_empty() {
                return Err(CatalogError::validation("<unnamed tower>", "tower name is empty"));
            }
            if catalog.tower_index.contains_key(&tower.id) {
                return Err(CatalogError::validation(&tower.id, "duplicate tower id"));
            }
            validate_upgrades(&tower.id, &tower.upgrades)?;
            catalog.tower_index.insert(tower.id.clone(), catalog.towers.len());
            catalog.towers.push(tower);
        }

        for record in &document.heroes {
            let hero = record.to_hero();
            if hero.name.trim().is_empty() || hero.id.is_empty() {
                return Err(CatalogError::validation("<unnamed hero>", "hero name is empty"));
            }
            if catalog.hero_index.contains_key(&hero.id) {
                return Err(CatalogError::validation(&hero.id, "duplicate hero id"));
            }
            catalog.hero_index.insert(hero.id.clone(), catalog.heroes.len());
            catalog.heroes.push(hero);
        }

        debug!(
            towers = catalog.towers.len(),
            heroes = catalog.heroes.len(),
            "validated catalog document"
        );
        Ok(catalog)
    }

    #[must_use]
    pub fn get_tower(&self, id: &str) -> Option<&Tower> {
        self.tower_index.get(id).map(|&i| &self.towers[i])
    }

    #[must_use]
    pub fn get_hero(&self, id: &str) -> Option<&Hero> {
        self.hero_index.get(id).map(|&i| &self.heroes[i])
    }

    /// All towers in load order, optionally restricted to one category.
    #[must_use]
    pub fn list_towers(&self, category: Option<Category>) -> Vec<&Tower> {
        self.towers
            .iter()
            .filter(|t| category.map_or(true, |c| t.category == c))
            .collect()
    }

    #[must_use]
    pub fn list_heroes(&self) -> Vec<&Hero> {
        self.heroes.iter().collect()
    }

    /// Case-insensitive substring search over tower names, descriptions and
    /// upgrade names/descriptions. An empty query matches every tower.
    #[must_use]
    pub fn search_towers(&self, query: &str) -> Vec<&Tower> {
        let needle = query.to_lowercase();
        self.towers
            .iter()
            .filter(|t| {
                t.name.to_lowercase().contains(&needle)
                    || t.description.to_lowercase().contains(&needle)
                    || t.upgrades.iter().any(|u| {
                        u.name.to_lowercase().contains(&needle)
                            || u.description.to_lowercase().contains(&needle)
                    })
            })
            .collect()
    }

    /// Case-insensitive substring search over hero names, descriptions and abilities.
    #[must_use]
    pub fn search_heroes(&self, query: &str) -> Vec<&Hero> {
        let needle = query.to_lowercase();
        self.heroes
            .iter()
            .filter(|h| {
                h.name.to_lowercase().contains(&needle)
                    || h.description.to_lowercase().contains(&needle)
                    || h.abilities.iter().any(|a| a.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Base cost of each requested tower. Unknown ids get a `NotFound` marker;
    /// repeated ids are reported once.
    pub fn compare_costs<I, S>(&self, ids: I, difficulty: Difficulty) -> CostComparison
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        for id in ids {
            let id = id.as_ref();
            if !seen.insert(id.to_string()) {
                continue;
            }
            let lookup = match self.get_tower(id) {
                Some(tower) => CostLookup::Cost(tower.cost(difficulty)),
                None => CostLookup::NotFound,
            };
            entries.push((id.to_string(), lookup));
        }
        CostComparison {
            difficulty,
            entries,
        }
    }

    /// Upgrades of one path, ordered by tier.
    pub fn upgrade_path(&self, tower_id: &str, path: UpgradePath) -> Result<Vec<&TowerUpgrade>> {
        let tower = self
            .get_tower(tower_id)
            .ok_or_else(|| CatalogError::not_found("tower", tower_id))?;
        let mut upgrades: Vec<&TowerUpgrade> =
            tower.upgrades.iter().filter(|u| u.path == path).collect();
        upgrades.sort_by_key(|u| u.tier);
        Ok(upgrades)
    }

    /// Sum the cost of every upgrade on `path` with tier ≤ `target_tier`.
    pub fn upgrade_path_cost(
        &self,
        tower_id: &str,
        path: UpgradePath,
        target_tier: u8,
        difficulty: Difficulty,
    ) -> Result<UpgradeCost> {
        let base_cost = self
            .get_tower(tower_id)
            .ok_or_else(|| CatalogError::not_found("tower", tower_id))?
            .cost(difficulty);

        let upgrades: Vec<UpgradeCostLine> = self
            .upgrade_path(tower_id, path)?
            .into_iter()
            .filter(|u| u.tier <= target_tier)
            .map(|u| UpgradeCostLine {
                name: u.name.clone(),
                tier: u.tier,
                cost: u.cost(difficulty),
            })
            .collect();
        let total_upgrade_cost: u64 = upgrades.iter().map(|line| u64::from(line.cost)).sum();

        Ok(UpgradeCost {
            tower_id: tower_id.to_string(),
            path,
            target_tier,
            difficulty,
            base_cost,
            upgrades,
            total_upgrade_cost,
            total_cost: u64::from(base_cost) + total_upgrade_cost,
        })
    }

    #[must_use]
    pub fn tower_count(&self) -> usize {
        self.towers.len()
    }

    #[must_use]
    pub fn hero_count(&self) -> usize {
        self.heroes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::loader::{CostTable, HeroRecord, StatsRecord, TowerRecord, UpgradeRecord};

    fn costs(medium: u32) -> CostTable {
        CostTable {
            easy: medium - 10,
            medium,
            hard: medium + 10,
            impoppable: medium + 20,
        }
    }

    fn stats() -> StatsRecord {
        StatsRecord {
            damage: 1,
            pierce: 1,
            attack_speed: 1.0,
            range: 30,
            projectile_speed: None,
            camo_detection: false,
            lead_popping: false,
            frozen_popping: true,
            extra: Default::default(),
        }
    }

    fn upgrade(name: &str, path: UpgradePath, tier: u8, medium: u32) -> UpgradeRecord {
        UpgradeRecord {
            name: name.to_string(),
            path,
            tier,
            cost: costs(medium),
            description: format!("{name} upgrade"),
            ability_description: None,
        }
    }

    fn tower(name: &str, upgrades: Vec<UpgradeRecord>) -> TowerRecord {
        TowerRecord {
            name: name.to_string(),
            category: Category::Primary,
            description: format!("{name} description"),
            base_cost: costs(100),
            base_stats: stats(),
            upgrades,
            hotkey: None,
        }
    }

    #[test]
    fn test_rejects_duplicate_tower_ids() {
        let doc = CatalogDocument {
            towers: vec![tower("Test Tower", vec![]), tower("test-tower", vec![])],
            heroes: vec![],
        };
        let err = Catalog::from_document(&doc).unwrap_err();
        assert!(matches!(err, CatalogError::Validation { .. }));
        assert!(err.to_string().contains("duplicate tower id"));
    }

    #[test]
    fn test_rejects_duplicate_hero_ids() {
        let hero = HeroRecord {
            name: "Quincy".to_string(),
            description: "archer".to_string(),
            cost: 470,
            abilities: vec![],
            level_requirements: vec![],
        };
        let doc = CatalogDocument {
            towers: vec![],
            heroes: vec![hero.clone(), hero],
        };
        assert!(Catalog::from_document(&doc).is_err());
    }

    #[test]
    fn test_rejects_out_of_order_tiers() {
        let doc = CatalogDocument {
            towers: vec![tower(
                "Test Tower",
                vec![
                    upgrade("Second", UpgradePath::Top, 2, 20),
                    upgrade("First", UpgradePath::Top, 1, 10),
                ],
            )],
            heroes: vec![],
        };
        let err = Catalog::from_document(&doc).unwrap_err();
        assert!(err.to_string().contains("does not follow"));
    }

    #[test]
    fn test_rejects_tier_out_of_range() {
        let doc = CatalogDocument {
            towers: vec![tower("Test Tower", vec![upgrade("Sixth", UpgradePath::Top, 6, 10)])],
            heroes: vec![],
        };
        assert!(Catalog::from_document(&doc).is_err());
    }

    #[test]
    fn test_paths_are_checked_independently() {
        let doc = CatalogDocument {
            towers: vec![tower(
                "Test Tower",
                vec![
                    upgrade("Top One", UpgradePath::Top, 1, 10),
                    upgrade("Mid One", UpgradePath::Middle, 1, 15),
                    upgrade("Top Two", UpgradePath::Top, 2, 20),
                ],
            )],
            heroes: vec![],
        };
        let catalog = Catalog::from_document(&doc).unwrap();
        let cost = catalog
            .upgrade_path_cost("test_tower", UpgradePath::Top, 5, Difficulty::Medium)
            .unwrap();
        assert_eq!(cost.total_upgrade_cost, 30);
        assert_eq!(cost.total_cost, 130);
    }

    #[test]
    fn test_compare_costs_dedupes_in_first_seen_order() {
        let doc = CatalogDocument {
            towers: vec![tower("Alpha", vec![]), tower("Beta", vec![])],
            heroes: vec![],
        };
        let catalog = Catalog::from_document(&doc).unwrap();
        let cmp = catalog.compare_costs(["beta", "ghost", "beta", "alpha"], Difficulty::Easy);
        let ids: Vec<&str> = cmp.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["beta", "ghost", "alpha"]);
        assert_eq!(cmp.get("ghost"), Some(CostLookup::NotFound));
        assert_eq!(cmp.get("alpha"), Some(CostLookup::Cost(90)));
    }

    #[test]
    fn test_cost_comparison_serializes_markers() {
        let doc = CatalogDocument {
            towers: vec![tower("Alpha", vec![])],
            heroes: vec![],
        };
        let catalog = Catalog::from_document(&doc).unwrap();
        let cmp = catalog.compare_costs(["alpha", "nope"], Difficulty::Hard);
        assert_eq!(
            serde_json::to_string(&cmp).unwrap(),
            r#"{"alpha":110,"nope":"not_found"}"#
        );
    }
}
