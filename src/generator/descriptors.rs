//! Hand-authored shapes of the generated data structs.
//!
//! The descriptors are fixed; they are not inferred from the sample records.

/// One field of a generated struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Rust field name in the generated struct
    pub name: &'static str,
    /// Key path of the value in the persisted catalog document
    pub alias: &'static str,
    /// Rust type annotation
    pub ty: &'static str,
    pub description: &'static str,
}

/// One generated struct: its name plus ordered fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldDescriptor],
}

const fn field(
    name: &'static str,
    alias: &'static str,
    ty: &'static str,
    description: &'static str,
) -> FieldDescriptor {
    FieldDescriptor {
        name,
        alias,
        ty,
        description,
    }
}

const STR: &str = "&'static str";

const TOWER_FIELDS: &[FieldDescriptor] = &[
    field("id", "name", STR, "Identifier derived from the display name."),
    field("name", "name", STR, "Display name."),
    field("category", "category", STR, "Tower category."),
    field("cost_easy", "base_cost.easy", "u32", "Placement cost on easy."),
    field("cost_medium", "base_cost.medium", "u32", "Placement cost on medium."),
    field("cost_hard", "base_cost.hard", "u32", "Placement cost on hard."),
    field("cost_impoppable", "base_cost.impoppable", "u32", "Placement cost on impoppable."),
    field("description", "description", STR, "In-game description."),
    field("damage", "base_stats.damage", "u32", "Layers popped per hit."),
    field("pierce", "base_stats.pierce", "u32", "Bloons hit per projectile."),
    field("attack_speed", "base_stats.attack_speed", "f64", "Seconds between attacks."),
    field("range", "base_stats.range", "u32", "Targeting radius."),
    field("projectile_speed", "base_stats.projectile_speed", "Option<u32>", "Projectile travel speed, if it fires projectiles."),
    field("camo_detection", "base_stats.camo_detection", "bool", "Whether camo bloons can be targeted."),
    field("lead_popping", "base_stats.lead_popping", "bool", "Whether lead bloons can be popped."),
    field("frozen_popping", "base_stats.frozen_popping", "bool", "Whether frozen bloons can be popped."),
    field("extra_stats", "base_stats.*", "&'static [(&'static str, f64)]", "Tower-specific numeric stats, sorted by key."),
    field("upgrades", "upgrades", "&'static [TowerUpgrade]", "Upgrades in document order."),
    field("hotkey", "hotkey", "Option<&'static str>", "Default placement hotkey."),
];

const UPGRADE_FIELDS: &[FieldDescriptor] = &[
    field("name", "name", STR, "Upgrade name."),
    field("path", "path", STR, "Upgrade lane: top, middle or bottom."),
    field("tier", "tier", "u8", "Position within the lane, starting at 1."),
    field("cost_easy", "cost.easy", "u32", "Cost on easy."),
    field("cost_medium", "cost.medium", "u32", "Cost on medium."),
    field("cost_hard", "cost.hard", "u32", "Cost on hard."),
    field("cost_impoppable", "cost.impoppable", "u32", "Cost on impoppable."),
    field("description", "description", STR, "What the upgrade does."),
    field("ability_description", "ability_description", "Option<&'static str>", "Activated ability granted by the upgrade."),
];

const HERO_FIELDS: &[FieldDescriptor] = &[
    field("id", "name", STR, "Identifier derived from the display name."),
    field("name", "name", STR, "Display name."),
    field("description", "description", STR, "In-game description."),
    field("cost", "cost", "u32", "Placement cost on medium."),
    field("abilities", "abilities", "&'static [&'static str]", "Activated abilities."),
    field("level_requirements", "level_requirements", "&'static [u32]", "XP required per level."),
];

/// The three generated models, in declaration order.
#[must_use]
pub fn model_descriptors() -> Vec<ModelDescriptor> {
    vec![
        ModelDescriptor {
            name: "Tower",
            description: "A placeable tower with its base stats and upgrades.",
            fields: TOWER_FIELDS,
        },
        ModelDescriptor {
            name: "TowerUpgrade",
            description: "One purchasable upgrade on a tower path.",
            fields: UPGRADE_FIELDS,
        },
        ModelDescriptor {
            name: "Hero",
            description: "A hero with its abilities and leveling curve.",
            fields: HERO_FIELDS,
        },
    ]
}

impl FieldDescriptor {
    /// The field as it appears inside the generated struct body.
    #[must_use]
    pub fn declaration(&self) -> String {
        format!(
            "    /// {}\n    ///\n    /// Key: `{}`\n    pub {}: {},",
            self.description, self.alias, self.name, self.ty
        )
    }
}

impl ModelDescriptor {
    /// All field declarations joined by newlines, without a trailing newline.
    #[must_use]
    pub fn field_block(&self) -> String {
        self.fields
            .iter()
            .map(FieldDescriptor::declaration)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_three_models_in_order() {
        let names: Vec<_> = model_descriptors().iter().map(|m| m.name).collect();
        assert_eq!(names, ["Tower", "TowerUpgrade", "Hero"]);
    }

    #[test]
    fn test_field_names_unique_per_model() {
        for model in model_descriptors() {
            let mut seen = HashSet::new();
            for field in model.fields {
                assert!(seen.insert(field.name), "{}.{} repeated", model.name, field.name);
            }
        }
    }

    #[test]
    fn test_declaration_carries_alias() {
        let decl = TOWER_FIELDS[3].declaration();
        assert!(decl.contains("Key: `base_cost.easy`"));
        assert!(decl.ends_with("pub cost_easy: u32,"));
    }
}
