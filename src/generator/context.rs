//! Template context: pre-rendered Rust fragments for every model and record.
//!
//! All Rust syntax is produced here so the template only needs loops and
//! `{{ value }}` tokens.

use serde::Serialize;

use super::descriptors::ModelDescriptor;
use crate::catalog::{Catalog, Hero, Tower, TowerUpgrade};

/// Value of the `generator` scalar in every rendered file.
pub const GENERATOR_NAME: &str = concat!("towerstats-gen ", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelBlock {
    pub name: String,
    pub description: String,
    /// Field declarations, one per descriptor field.
    pub fields: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordBlock {
    pub id: String,
    pub name: String,
    /// Rust struct expression followed by a comma.
    pub literal: String,
}

/// Everything a template can reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderContext {
    pub generator: String,
    pub tower_count: usize,
    pub hero_count: usize,
    pub model_count: usize,
    pub models: Vec<ModelBlock>,
    pub towers: Vec<RecordBlock>,
    pub heroes: Vec<RecordBlock>,
}

impl RenderContext {
    /// Records are emitted in catalog listing order.
    #[must_use]
    pub fn new(catalog: &Catalog, models: &[ModelDescriptor]) -> Self {
        let towers: Vec<RecordBlock> = catalog
            .list_towers(None)
            .into_iter()
            .map(|t| RecordBlock {
                id: t.id.clone(),
                name: t.name.clone(),
                literal: tower_literal(t),
            })
            .collect();
        let heroes: Vec<RecordBlock> = catalog
            .list_heroes()
            .into_iter()
            .map(|h| RecordBlock {
                id: h.id.clone(),
                name: h.name.clone(),
                literal: hero_literal(h),
            })
            .collect();
        let models: Vec<ModelBlock> = models
            .iter()
            .map(|m| ModelBlock {
                name: m.name.to_string(),
                description: m.description.to_string(),
                fields: m.field_block(),
            })
            .collect();

        RenderContext {
            generator: GENERATOR_NAME.to_string(),
            tower_count: towers.len(),
            hero_count: heroes.len(),
            model_count: models.len(),
            models,
            towers,
            heroes,
        }
    }
}

/// Indentation-aware builder for struct expressions.
struct LiteralWriter {
    out: String,
    depth: usize,
}

impl LiteralWriter {
    fn new(depth: usize) -> Self {
        Self {
            out: String::new(),
            depth,
        }
    }

    fn line(&mut self, text: &str) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        for _ in 0..self.depth {
            self.out.push_str("    ");
        }
        self.out.push_str(text);
    }

    fn open(&mut self, text: &str) {
        self.line(text);
        self.depth += 1;
    }

    fn close(&mut self, text: &str) {
        self.depth -= 1;
        self.line(text);
    }

    fn field(&mut self, name: &str, value: impl std::fmt::Display) {
        self.line(&format!("{name}: {value},"));
    }

    fn finish(self) -> String {
        self.out
    }
}

fn str_lit(s: &str) -> String {
    format!("{s:?}")
}

fn opt_str_lit(s: Option<&str>) -> String {
    match s {
        Some(s) => format!("Some({s:?})"),
        None => "None".to_string(),
    }
}

/// `{:?}` keeps a decimal point on whole numbers, so the result is always an f64 literal.
pub(crate) fn float_lit(v: f64) -> String {
    if v.is_nan() {
        "f64::NAN".to_string()
    } else if v.is_infinite() {
        if v > 0.0 { "f64::INFINITY" } else { "f64::NEG_INFINITY" }.to_string()
    } else {
        format!("{v:?}")
    }
}

fn upgrade_literal(w: &mut LiteralWriter, upgrade: &TowerUpgrade) {
    w.open("TowerUpgrade {");
    w.field("name", str_lit(&upgrade.name));
    w.field("path", str_lit(upgrade.path.as_str()));
    w.field("tier", upgrade.tier);
    w.field("cost_easy", upgrade.cost_easy);
    w.field("cost_medium", upgrade.cost_medium);
    w.field("cost_hard", upgrade.cost_hard);
    w.field("cost_impoppable", upgrade.cost_impoppable);
    w.field("description", str_lit(&upgrade.description));
    w.field(
        "ability_description",
        opt_str_lit(upgrade.ability_description.as_deref()),
    );
    w.close("},");
}

/// `Tower { .. },` at one level of indentation.
pub(crate) fn tower_literal(tower: &Tower) -> String {
    let stats = &tower.base_stats;
    let mut w = LiteralWriter::new(1);
    w.open("Tower {");
    w.field("id", str_lit(&tower.id));
    w.field("name", str_lit(&tower.name));
    w.field("category", str_lit(tower.category.as_str()));
    w.field("cost_easy", tower.cost_easy);
    w.field("cost_medium", tower.cost_medium);
    w.field("cost_hard", tower.cost_hard);
    w.field("cost_impoppable", tower.cost_impoppable);
    w.field("description", str_lit(&tower.description));
    w.field("damage", stats.damage);
    w.field("pierce", stats.pierce);
    w.field("attack_speed", float_lit(stats.attack_speed));
    w.field("range", stats.range);
    w.field(
        "projectile_speed",
        stats
            .projectile_speed
            .map_or_else(|| "None".to_string(), |v| format!("Some({v})")),
    );
    w.field("camo_detection", stats.camo_detection);
    w.field("lead_popping", stats.lead_popping);
    w.field("frozen_popping", stats.frozen_popping);
    let extra = stats
        .extra
        .iter()
        .map(|(k, v)| format!("({}, {})", str_lit(k), float_lit(*v)))
        .collect::<Vec<_>>()
        .join(", ");
    w.field("extra_stats", format!("&[{extra}]"));
    if tower.upgrades.is_empty() {
        w.field("upgrades", "&[]");
    } else {
        w.open("upgrades: &[");
        for upgrade in &tower.upgrades {
            upgrade_literal(&mut w, upgrade);
        }
        w.close("],");
    }
    w.field("hotkey", opt_str_lit(tower.hotkey.as_deref()));
    w.close("},");
    w.finish()
}

/// `Hero { .. },` at one level of indentation.
pub(crate) fn hero_literal(hero: &Hero) -> String {
    let mut w = LiteralWriter::new(1);
    w.open("Hero {");
    w.field("id", str_lit(&hero.id));
    w.field("name", str_lit(&hero.name));
    w.field("description", str_lit(&hero.description));
    w.field("cost", hero.cost);
    if hero.abilities.is_empty() {
        w.field("abilities", "&[]");
    } else {
        w.open("abilities: &[");
        for ability in &hero.abilities {
            w.line(&format!("{},", str_lit(ability)));
        }
        w.close("],");
    }
    let levels = hero
        .level_requirements
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    w.field("level_requirements", format!("&[{levels}]"));
    w.close("},");
    w.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SampleSource;
    use crate::generator::descriptors::model_descriptors;

    fn sample_context() -> RenderContext {
        let catalog = Catalog::load(&SampleSource).unwrap();
        RenderContext::new(&catalog, &model_descriptors())
    }

    #[test]
    fn test_counts_match_collections() {
        let ctx = sample_context();
        assert_eq!(ctx.tower_count, 12);
        assert_eq!(ctx.hero_count, 3);
        assert_eq!(ctx.model_count, 3);
        assert_eq!(ctx.towers[0].id, "dart_monkey");
        assert_eq!(ctx.heroes[2].id, "striker_jones");
    }

    #[test]
    fn test_float_literals_keep_decimal_point() {
        assert_eq!(float_lit(1.0), "1.0");
        assert_eq!(float_lit(0.6), "0.6");
        assert_eq!(float_lit(17.0), "17.0");
        assert_eq!(float_lit(f64::NAN), "f64::NAN");
    }

    #[test]
    fn test_tower_literal_covers_every_descriptor_field() {
        let ctx = sample_context();
        let tower_model = model_descriptors()[0];
        let literal = &ctx.towers[0].literal;
        for field in tower_model.fields {
            assert!(
                literal.contains(&format!("        {}: ", field.name)),
                "missing {}",
                field.name
            );
        }
        assert!(literal.starts_with("    Tower {\n"));
        assert!(literal.ends_with("\n    },"));
        assert!(literal.contains("name: \"Spike-o-pult\","));
    }

    #[test]
    fn test_hero_literal_covers_every_descriptor_field() {
        let ctx = sample_context();
        let hero_model = model_descriptors()[2];
        for field in hero_model.fields {
            assert!(ctx.heroes[0].literal.contains(&format!("        {}: ", field.name)));
        }
    }

    #[test]
    fn test_strings_are_escaped() {
        assert_eq!(str_lit("say \"pop\""), "\"say \\\"pop\\\"\"");
    }
}
