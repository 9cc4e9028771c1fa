//! Hardcoded sample towers and heroes.
//!
//! Every call returns the same records in the same order. Adding an entry
//! means editing this file and re-running the generator.

use std::collections::BTreeMap;

use crate::catalog::{
    CatalogDocument, Category, CostTable, HeroRecord, StatsRecord, TowerRecord, UpgradePath,
    UpgradeRecord,
};

const fn costs(easy: u32, medium: u32, hard: u32, impoppable: u32) -> CostTable {
    CostTable {
        easy,
        medium,
        hard,
        impoppable,
    }
}

struct Stats {
    damage: u32,
    pierce: u32,
    attack_speed: f64,
    range: u32,
    projectile_speed: Option<u32>,
    camo: bool,
    lead: bool,
    frozen: bool,
}

impl Stats {
    fn record(self, extra: &[(&str, f64)]) -> StatsRecord {
        StatsRecord {
            damage: self.damage,
            pierce: self.pierce,
            attack_speed: self.attack_speed,
            range: self.range,
            projectile_speed: self.projectile_speed,
            camo_detection: self.camo,
            lead_popping: self.lead,
            frozen_popping: self.frozen,
            extra: extra
                .iter()
                .map(|(k, v)| ((*k).to_string(), *v))
                .collect::<BTreeMap<_, _>>(),
        }
    }
}

fn upgrade(name: &str, path: UpgradePath, tier: u8, cost: CostTable, description: &str) -> UpgradeRecord {
    UpgradeRecord {
        name: name.to_string(),
        path,
        tier,
        cost,
        description: description.to_string(),
        ability_description: None,
    }
}

fn tower(
    name: &str,
    category: Category,
    description: &str,
    base_cost: CostTable,
    base_stats: StatsRecord,
    upgrades: Vec<UpgradeRecord>,
    hotkey: &str,
) -> TowerRecord {
    TowerRecord {
        name: name.to_string(),
        category,
        description: description.to_string(),
        base_cost,
        base_stats,
        upgrades,
        hotkey: Some(hotkey.to_string()),
    }
}

fn hero(name: &str, description: &str, cost: u32, abilities: &[&str]) -> HeroRecord {
    HeroRecord {
        name: name.to_string(),
        description: description.to_string(),
        cost,
        abilities: abilities.iter().map(|a| (*a).to_string()).collect(),
        level_requirements: LEVEL_XP.to_vec(),
    }
}

/// XP needed for each hero level; shared by every sample hero.
const LEVEL_XP: [u32; 20] = [
    0, 180, 460, 1000, 1860, 3280, 5180, 8320, 9380, 13620, 16380, 14400, 16650, 14940, 16380,
    17820, 19260, 20700, 16200, 17820,
];

#[must_use]
pub fn sample_towers() -> Vec<TowerRecord> {
    use Category::*;
    use UpgradePath::Top;

    vec![
        tower(
            "Dart Monkey",
            Primary,
            "Hurls sharp darts that can pop one bloon each.",
            costs(170, 200, 215, 240),
            Stats { damage: 1, pierce: 1, attack_speed: 1.0, range: 32, projectile_speed: Some(100), camo: false, lead: false, frozen: true }
                .record(&[]),
            vec![
                upgrade("Sharp Shots", Top, 1, costs(120, 140, 150, 170), "+1 pierce. Darts can pop one extra bloon."),
                upgrade("Razor Sharp Shots", Top, 2, costs(170, 200, 215, 240), "+2 pierce. Darts can now pop 2 extra bloons for a total of 4."),
                upgrade("Spike-o-pult", Top, 3, costs(850, 1000, 1080, 1200), "Converts the Dart Monkey into a powerful Spike-o-pult that hurls spiked balls instead of darts."),
            ],
            "Q",
        ),
        tower(
            "Boomerang Monkey",
            Primary,
            "Throws boomerangs that travel in a wide arc, popping bloons along the way.",
            costs(270, 325, 350, 390),
            Stats { damage: 1, pierce: 3, attack_speed: 0.6, range: 43, projectile_speed: Some(80), camo: false, lead: false, frozen: true }
                .record(&[]),
            vec![
                upgrade("Improved Rangs", Top, 1, costs(130, 155, 165, 185), "Boomerangs travel further and faster."),
                upgrade("Glaives", Top, 2, costs(170, 200, 215, 240), "Replaces boomerangs with sharp glaives that can pop Lead Bloons and pop one extra bloon per attack."),
            ],
            "W",
        ),
        tower(
            "Bomb Shooter",
            Primary,
            "Hurls explosive bombs that deal area damage.",
            costs(475, 560, 605, 670),
            Stats { damage: 1, pierce: 40, attack_speed: 1.4, range: 45, projectile_speed: None, camo: false, lead: false, frozen: true }
                .record(&[("blast_radius", 18.0)]),
            vec![],
            "E",
        ),
        tower(
            "Tack Shooter",
            Primary,
            "Shoots 8 tacks in all directions every time it attacks.",
            costs(255, 300, 325, 360),
            Stats { damage: 1, pierce: 1, attack_speed: 1.2, range: 23, projectile_speed: None, camo: false, lead: false, frozen: true }
                .record(&[("tacks_per_shot", 8.0)]),
            vec![],
            "R",
        ),
        tower(
            "Ice Monkey",
            Primary,
            "Freezes bloons temporarily, making them unable to move but also unable to be popped by most attacks.",
            costs(425, 500, 540, 600),
            Stats { damage: 0, pierce: 40, attack_speed: 2.5, range: 30, projectile_speed: None, camo: false, lead: false, frozen: false }
                .record(&[("freeze_duration", 1.5)]),
            vec![],
            "T",
        ),
        tower(
            "Glue Gunner",
            Primary,
            "Slows down bloons by covering them with sticky glue.",
            costs(240, 275, 300, 330),
            Stats { damage: 0, pierce: 1, attack_speed: 1.9, range: 46, projectile_speed: None, camo: false, lead: false, frozen: true }
                .record(&[("slow_duration", 11.0), ("slow_percentage", 50.0)]),
            vec![],
            "Y",
        ),
        tower(
            "Sniper Monkey",
            Military,
            "Long range sniper that can target any bloon on screen.",
            costs(300, 350, 380, 420),
            Stats { damage: 2, pierce: 1, attack_speed: 1.5, range: 999, projectile_speed: Some(999), camo: true, lead: true, frozen: true }
                .record(&[]),
            vec![],
            "Z",
        ),
        tower(
            "Monkey Sub",
            Military,
            "Submerged submarine that shoots seeking darts. Can only be placed on water.",
            costs(315, 370, 400, 445),
            Stats { damage: 1, pierce: 2, attack_speed: 0.6, range: 42, projectile_speed: None, camo: false, lead: false, frozen: true }
                .record(&[("seeking_range", 60.0)]),
            vec![],
            "X",
        ),
        tower(
            "Wizard Monkey",
            Magic,
            "Hurls magic energy that can pop lead bloons.",
            costs(340, 400, 430, 480),
            Stats { damage: 1, pierce: 2, attack_speed: 1.1, range: 40, projectile_speed: Some(80), camo: false, lead: true, frozen: true }
                .record(&[]),
            vec![],
            "A",
        ),
        tower(
            "Super Monkey",
            Magic,
            "Incredibly fast and powerful monkey that shoots darts with incredible speed.",
            costs(2125, 2500, 2700, 3000),
            Stats { damage: 1, pierce: 1, attack_speed: 17.0, range: 50, projectile_speed: Some(150), camo: false, lead: false, frozen: true }
                .record(&[]),
            vec![],
            "S",
        ),
        tower(
            "Banana Farm",
            Support,
            "Generates money each round. Does not attack bloons.",
            costs(850, 1000, 1080, 1200),
            Stats { damage: 0, pierce: 1, attack_speed: 0.0, range: 0, projectile_speed: None, camo: false, lead: false, frozen: false }
                .record(&[("money_per_round", 20.0)]),
            vec![],
            "F",
        ),
        tower(
            "Monkey Village",
            Support,
            "Provides benefits to nearby towers, including increased range and reduced costs.",
            costs(935, 1100, 1190, 1320),
            Stats { damage: 0, pierce: 1, attack_speed: 0.0, range: 40, projectile_speed: None, camo: false, lead: false, frozen: false }
                .record(&[("buff_range", 40.0)]),
            vec![],
            "V",
        ),
    ]
}

#[must_use]
pub fn sample_heroes() -> Vec<HeroRecord> {
    vec![
        hero(
            "Quincy",
            "Quincy is a reliable archer hero who starts with a bow and gets various upgrades.",
            470,
            &[
                "Rapid Shot - Quincy shoots really fast for a short time",
                "Storm of Arrows - Quincy shoots a devastating barrage of arrows",
            ],
        ),
        hero(
            "Gwendolin",
            "Gwendolin is a powerful support hero who can heat up nearby towers and has fire-based attacks.",
            600,
            &[
                "Cocktail of Fire - Gwendolin throws a firebomb that deals massive damage",
                "Firestorm - Gwendolin creates a devastating area of fire damage",
            ],
        ),
        hero(
            "Striker Jones",
            "Striker Jones is a military specialist who provides bonuses to explosive towers.",
            750,
            &[
                "Concussive Shell - Striker fires a shell that stuns bloons",
                "Artillery Command - Temporarily boosts all bomb and mortar towers",
            ],
        ),
    ]
}

/// The full sample catalog in persisted-document form.
#[must_use]
pub fn sample_document() -> CatalogDocument {
    CatalogDocument {
        towers: sample_towers(),
        heroes: sample_heroes(),
    }
}
