//! Subcategory business logic - Handles all subcategory-related operations.
//!
//! Provides functions for creating, retrieving, updating, and soft-deleting
//! subcategories. Destroy operations never remove rows; they flip
//! `is_active` so products keep a resolvable reference and historical
//! listings stay coherent. All functions are async and return Result types
//! for error handling.

use crate::{
    entities::{Category, Subcategory, subcategory},
    errors::{Error, Result},
};
use sea_orm::{Condition, QueryOrder, Set, SqlErr, prelude::*};

/// Fields accepted when creating a subcategory.
#[derive(Debug, Clone)]
pub struct NewSubcategory {
    /// Human-readable name
    pub name: String,
    /// URL-friendly unique identifier
    pub slug: String,
    /// Top-level category this subcategory belongs to
    pub category: Category,
    /// Optional free-text description
    pub description: Option<String>,
}

/// Partial update applied by the PATCH endpoint; `None` fields are untouched.
#[derive(Debug, Clone, Default)]
pub struct SubcategoryPatch {
    /// New name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New category
    pub category: Option<Category>,
    /// Re-activate or deactivate
    pub is_active: Option<bool>,
}

fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty()
        || !slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(Error::Validation {
            message: format!("Invalid slug {slug:?}: use lowercase letters, digits, and hyphens"),
        });
    }
    Ok(())
}

/// Lists active subcategories ordered by name, optionally narrowed by
/// category and a name/description search term.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_active_subcategories(
    db: &DatabaseConnection,
    category: Option<Category>,
    search: Option<&str>,
) -> Result<Vec<subcategory::Model>> {
    let mut query = Subcategory::find().filter(subcategory::Column::IsActive.eq(true));

    if let Some(category) = category {
        query = query.filter(subcategory::Column::Category.eq(category));
    }
    if let Some(term) = search {
        let term = term.trim();
        if !term.is_empty() {
            query = query.filter(
                Condition::any()
                    .add(subcategory::Column::Name.contains(term))
                    .add(subcategory::Column::Description.contains(term)),
            );
        }
    }

    query
        .order_by_asc(subcategory::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an active subcategory by its slug, returning None if absent or
/// soft-deleted.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_subcategory_by_slug(
    db: &DatabaseConnection,
    slug: &str,
) -> Result<Option<subcategory::Model>> {
    Subcategory::find()
        .filter(subcategory::Column::Slug.eq(slug))
        .filter(subcategory::Column::IsActive.eq(true))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a subcategory by its unique ID, including soft-deleted rows.
/// Used where a stored reference must stay resolvable after deactivation.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_subcategory_by_id(
    db: &DatabaseConnection,
    subcategory_id: i64,
) -> Result<Option<subcategory::Model>> {
    Subcategory::find_by_id(subcategory_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Batch-loads subcategories by id (soft-deleted included), for product
/// serialization.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_subcategories_by_ids(
    db: &DatabaseConnection,
    ids: &[i64],
) -> Result<Vec<subcategory::Model>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    Subcategory::find()
        .filter(subcategory::Column::Id.is_in(ids.iter().copied()))
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a new subcategory, relying on the storage-layer unique constraint
/// to reject a colliding slug.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or the slug is not lowercase-kebab
/// - The slug is already taken
/// - The database insert operation fails
pub async fn create_subcategory(
    db: &DatabaseConnection,
    input: NewSubcategory,
) -> Result<subcategory::Model> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Subcategory name cannot be empty".to_string(),
        });
    }
    validate_slug(&input.slug)?;

    let now = chrono::Utc::now().naive_utc();

    let subcategory = subcategory::ActiveModel {
        name: Set(name.to_string()),
        slug: Set(input.slug.clone()),
        category: Set(input.category),
        description: Set(input.description.unwrap_or_default()),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    subcategory.insert(db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => Error::DuplicateSlug { slug: input.slug },
        _ => e.into(),
    })
}

/// Applies a partial update to an active subcategory and refreshes its
/// timestamp.
///
/// # Errors
/// Returns an error if no active subcategory has the slug or the update
/// fails.
pub async fn update_subcategory(
    db: &DatabaseConnection,
    slug: &str,
    patch: SubcategoryPatch,
) -> Result<subcategory::Model> {
    let mut subcategory: subcategory::ActiveModel = get_subcategory_by_slug(db, slug)
        .await?
        .ok_or_else(|| Error::SubcategoryNotFound {
            slug: slug.to_string(),
        })?
        .into();

    if let Some(name) = patch.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(Error::Validation {
                message: "Subcategory name cannot be empty".to_string(),
            });
        }
        subcategory.name = Set(name);
    }
    if let Some(description) = patch.description {
        subcategory.description = Set(description);
    }
    if let Some(category) = patch.category {
        subcategory.category = Set(category);
    }
    if let Some(is_active) = patch.is_active {
        subcategory.is_active = Set(is_active);
    }
    subcategory.updated_at = Set(chrono::Utc::now().naive_utc());

    subcategory.update(db).await.map_err(Into::into)
}

/// Soft deletes a subcategory: the row stays, `is_active` flips to false.
///
/// # Errors
/// Returns an error if no active subcategory has the slug or the update
/// fails.
pub async fn deactivate_subcategory(
    db: &DatabaseConnection,
    slug: &str,
) -> Result<subcategory::Model> {
    let mut subcategory: subcategory::ActiveModel = get_subcategory_by_slug(db, slug)
        .await?
        .ok_or_else(|| Error::SubcategoryNotFound {
            slug: slug.to_string(),
        })?
        .into();

    subcategory.is_active = Set(false);
    subcategory.updated_at = Set(chrono::Utc::now().naive_utc());

    subcategory.update(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_and_list_subcategories() -> Result<()> {
        let db = setup_test_db().await?;

        create_test_subcategory(&db, "Laptops", "laptops").await?;
        create_custom_subcategory(&db, "Snacks", "snacks", Category::Food).await?;

        let all = list_active_subcategories(&db, None, None).await?;
        assert_eq!(all.len(), 2);
        // Ordered by name.
        assert_eq!(all[0].name, "Laptops");

        let electronics =
            list_active_subcategories(&db, Some(Category::Electronics), None).await?;
        assert_eq!(electronics.len(), 1);
        assert_eq!(electronics[0].slug, "laptops");

        Ok(())
    }

    #[tokio::test]
    async fn test_search_matches_name_and_description() -> Result<()> {
        let db = setup_test_db().await?;
        create_subcategory(
            &db,
            NewSubcategory {
                name: "Audio".to_string(),
                slug: "audio".to_string(),
                category: Category::Electronics,
                description: Some("Speakers and headphones".to_string()),
            },
        )
        .await?;
        create_test_subcategory(&db, "Cameras", "cameras").await?;

        let hits = list_active_subcategories(&db, None, Some("headphones")).await?;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].slug, "audio");

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_slug_rejected_by_constraint() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_subcategory(&db, "Laptops", "laptops").await?;

        let result = create_subcategory(
            &db,
            NewSubcategory {
                name: "Laptop Deals".to_string(),
                slug: "laptops".to_string(),
                category: Category::Electronics,
                description: None,
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::DuplicateSlug { slug } if slug == "laptops"));

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_slug_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        for slug in ["", "Has Space", "UPPER", "Ünïcode"] {
            let result = create_subcategory(
                &db,
                NewSubcategory {
                    name: "X Y".to_string(),
                    slug: slug.to_string(),
                    category: Category::Food,
                    description: None,
                },
            )
            .await;
            assert!(result.is_err(), "slug {slug:?} should be rejected");
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_soft_delete_keeps_row_queryable_by_id() -> Result<()> {
        let db = setup_test_db().await?;
        let subcategory = create_test_subcategory(&db, "Laptops", "laptops").await?;

        let deactivated = deactivate_subcategory(&db, "laptops").await?;
        assert!(!deactivated.is_active);

        // Gone from the active listing and slug lookup...
        assert!(list_active_subcategories(&db, None, None).await?.is_empty());
        assert!(get_subcategory_by_slug(&db, "laptops").await?.is_none());

        // ...but still loadable by primary key.
        let by_id = get_subcategory_by_id(&db, subcategory.id).await?.unwrap();
        assert_eq!(by_id.slug, "laptops");
        assert!(!by_id.is_active);

        // A second destroy is a 404-class error, not a crash.
        let result = deactivate_subcategory(&db, "laptops").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::SubcategoryNotFound { slug: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_patch_updates_fields_and_timestamp() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_subcategory(&db, "Laptops", "laptops").await?;

        let patched = update_subcategory(
            &db,
            "laptops",
            SubcategoryPatch {
                name: Some("Notebooks".to_string()),
                description: Some("Portable computers".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(patched.name, "Notebooks");
        assert_eq!(patched.description, "Portable computers");
        assert_eq!(patched.slug, "laptops");
        assert!(patched.updated_at >= created.updated_at);

        let result = update_subcategory(&db, "missing", SubcategoryPatch::default()).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::SubcategoryNotFound { slug: _ }
        ));

        Ok(())
    }
}
