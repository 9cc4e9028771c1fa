use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

/// Tower category. Closed set; unknown labels fail deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Primary,
    Military,
    Magic,
    Support,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Primary,
        Category::Military,
        Category::Magic,
        Category::Support,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Primary => "Primary",
            Category::Military => "Military",
            Category::Magic => "Magic",
            Category::Support => "Support",
        }
    }
}

/// Game difficulty selecting which cost column applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Impoppable,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Impoppable,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Impoppable => "impoppable",
        }
    }
}

/// One of the three upgrade lanes of a tower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpgradePath {
    Top,
    Middle,
    Bottom,
}

impl UpgradePath {
    pub const ALL: [UpgradePath; 3] = [UpgradePath::Top, UpgradePath::Middle, UpgradePath::Bottom];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradePath::Top => "top",
            UpgradePath::Middle => "middle",
            UpgradePath::Bottom => "bottom",
        }
    }
}

macro_rules! selector_impls {
    ($ty:ty, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        /// Case-insensitive; an unknown label is a `NotFound` selector.
        impl FromStr for $ty {
            type Err = CatalogError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| CatalogError::not_found($kind, s))
            }
        }
    };
}

selector_impls!(Category, "category");
selector_impls!(Difficulty, "difficulty");
selector_impls!(UpgradePath, "upgrade path");

/// Base combat statistics of a tower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerStats {
    pub damage: u32,
    pub pierce: u32,
    pub attack_speed: f64,
    pub range: u32,
    pub projectile_speed: Option<u32>,
    pub camo_detection: bool,
    pub lead_popping: bool,
    pub frozen_popping: bool,
    /// Tower-specific numbers such as `blast_radius` or `money_per_round`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, f64>,
}

/// A single tower upgrade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerUpgrade {
    pub name: String,
    pub path: UpgradePath,
    pub tier: u8,
    pub cost_easy: u32,
    pub cost_medium: u32,
    pub cost_hard: u32,
    pub cost_impoppable: u32,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ability_description: Option<String>,
}

impl TowerUpgrade {
    #[must_use]
    pub fn cost(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.cost_easy,
            Difficulty::Medium => self.cost_medium,
            Difficulty::Hard => self.cost_hard,
            Difficulty::Impoppable => self.cost_impoppable,
        }
    }
}

/// A complete tower record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tower {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub cost_easy: u32,
    pub cost_medium: u32,
    pub cost_hard: u32,
    pub cost_impoppable: u32,
    pub description: String,
    pub base_stats: TowerStats,
    #[serde(default)]
    pub upgrades: Vec<TowerUpgrade>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotkey: Option<String>,
}

impl Tower {
    #[must_use]
    pub fn cost(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.cost_easy,
            Difficulty::Medium => self.cost_medium,
            Difficulty::Hard => self.cost_hard,
            Difficulty::Impoppable => self.cost_impoppable,
        }
    }
}

/// A hero record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cost: u32,
    #[serde(default)]
    pub abilities: Vec<String>,
    #[serde(default)]
    pub level_requirements: Vec<u32>,
}

/// Slug used as the identifier of towers and heroes: `"Dart Monkey"` → `dart_monkey`.
#[must_use]
pub fn slugify(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}
