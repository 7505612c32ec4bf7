//! Subcategory seed data loading from config.toml
//!
//! This module provides functionality to load the initial subcategory tree
//! from a TOML configuration file. The subcategories defined in config.toml
//! are used to seed the database on first run or when entries are missing.

use crate::{
    core::subcategory::{self, NewSubcategory},
    entities::{Category, Subcategory, subcategory as subcategory_entity},
    errors::{Error, Result},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct SeedConfig {
    /// List of subcategory configurations to seed
    #[serde(default)]
    pub subcategories: Vec<SubcategorySeed>,
}

/// Configuration for a single subcategory
#[derive(Debug, Deserialize, Clone)]
pub struct SubcategorySeed {
    /// Name of the subcategory
    pub name: String,
    /// URL slug, lowercase-kebab
    pub slug: String,
    /// Category code ("ELEC", "FOOD")
    pub category: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}

/// Loads seed configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SeedConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Seeds subcategories that are not yet present, matching by slug. Existing
/// rows (active or not) are left untouched. Returns the number created.
///
/// # Errors
/// Returns an error if a category code is unknown or a database operation
/// fails.
pub async fn seed_subcategories(db: &DatabaseConnection, config: &SeedConfig) -> Result<usize> {
    let mut created = 0;

    for seed in &config.subcategories {
        let category = Category::from_code(&seed.category).ok_or_else(|| Error::Config {
            message: format!(
                "Unknown category {:?} for subcategory {:?}",
                seed.category, seed.slug
            ),
        })?;

        let existing = Subcategory::find()
            .filter(subcategory_entity::Column::Slug.eq(seed.slug.as_str()))
            .one(db)
            .await?;
        if existing.is_some() {
            continue;
        }

        subcategory::create_subcategory(
            db,
            NewSubcategory {
                name: seed.name.clone(),
                slug: seed.slug.clone(),
                category,
                description: seed.description.clone(),
            },
        )
        .await?;
        info!(slug = %seed.slug, "seeded subcategory");
        created += 1;
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;

    fn sample_config() -> SeedConfig {
        toml::from_str(
            r#"
            [[subcategories]]
            name = "TV & Home Theater"
            slug = "tv-home-theater"
            category = "ELEC"
            description = "Screens and sound"

            [[subcategories]]
            name = "Snacks"
            slug = "snacks"
            category = "FOOD"
        "#,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_seed_config() {
        let config = sample_config();
        assert_eq!(config.subcategories.len(), 2);
        assert_eq!(config.subcategories[0].slug, "tv-home-theater");
        assert_eq!(
            config.subcategories[0].description.as_deref(),
            Some("Screens and sound")
        );
        assert!(config.subcategories[1].description.is_none());
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config: SeedConfig = toml::from_str("").unwrap();
        assert!(config.subcategories.is_empty());
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let config = sample_config();

        assert_eq!(seed_subcategories(&db, &config).await?, 2);
        assert_eq!(seed_subcategories(&db, &config).await?, 0);

        let all = subcategory::list_active_subcategories(&db, None, None).await?;
        assert_eq!(all.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_category_code_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let config: SeedConfig = toml::from_str(
            r#"
            [[subcategories]]
            name = "Books"
            slug = "books"
            category = "BOOK"
        "#,
        )
        .unwrap();

        let result = seed_subcategories(&db, &config).await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        Ok(())
    }
}
