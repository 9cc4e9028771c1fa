use askama::Template;
use serde::Serialize;

use super::store::Catalog;
use super::types::Category;
use crate::error::{CatalogError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

/// Aggregate counts over a loaded catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub tower_count: usize,
    pub hero_count: usize,
    pub upgrade_count: usize,
    /// Categories in first-seen order; categories without towers are omitted.
    pub categories: Vec<CategoryCount>,
    pub hero_names: Vec<String>,
}

#[derive(Template)]
#[template(path = "summary.txt", escape = "none")]
struct SummaryTemplate<'a> {
    source: &'a str,
    summary: &'a CatalogSummary,
}

impl Catalog {
    #[must_use]
    pub fn summary(&self) -> CatalogSummary {
        let towers = self.list_towers(None);
        let mut categories: Vec<CategoryCount> = Vec::new();
        for tower in &towers {
            match categories.iter_mut().find(|c| c.category == tower.category) {
                Some(row) => row.count += 1,
                None => categories.push(CategoryCount {
                    category: tower.category,
                    count: 1,
                }),
            }
        }
        CatalogSummary {
            tower_count: towers.len(),
            hero_count: self.hero_count(),
            upgrade_count: towers.iter().map(|t| t.upgrades.len()).sum(),
            categories,
            hero_names: self.list_heroes().iter().map(|h| h.name.clone()).collect(),
        }
    }
}

impl CatalogSummary {
    /// Plain-text report; `source` names where the catalog came from.
    pub fn render(&self, source: &str) -> Result<String> {
        SummaryTemplate {
            source,
            summary: self,
        }
        .render()
        .map_err(|e| CatalogError::template(0, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::{Catalog, Category, SampleSource};

    #[test]
    fn test_summary_counts_sample_catalog() {
        let catalog = Catalog::load(&SampleSource).unwrap();
        let summary = catalog.summary();
        assert_eq!(summary.tower_count, 12);
        assert_eq!(summary.hero_count, 3);
        assert_eq!(summary.upgrade_count, 5);
        assert_eq!(summary.categories[0].category, Category::Primary);
        assert_eq!(summary.categories[0].count, 6);
        let total: usize = summary.categories.iter().map(|c| c.count).sum();
        assert_eq!(total, summary.tower_count);
    }

    #[test]
    fn test_summary_render() {
        let catalog = Catalog::load(&SampleSource).unwrap();
        let text = catalog.summary().render("built-in sample data").unwrap();
        assert!(text.contains("BTD6 catalog (built-in sample data)"));
        assert!(text.contains("Towers:   12"));
        assert!(text.contains("  Military: 2"));
        assert!(text.contains("  Striker Jones"));
    }
}
