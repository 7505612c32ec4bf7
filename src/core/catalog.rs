//! Catalog business logic - Handles all product-related operations.
//!
//! This module provides the query surface for the product catalog (filtered
//! and paginated listings, featured sampling, category browsing) and the
//! mutations used to maintain it (product creation and update, gallery image
//! handling with primary-flag exclusivity). All functions are async and
//! return Result types for proper error handling throughout the system.

use crate::{
    entities::{Category, Product, ProductImage, Subcategory, product, product_image, subcategory},
    errors::{Error, Result},
};
use rand::seq::SliceRandom;
use sea_orm::{
    Condition, PaginatorTrait, QueryFilter, QueryOrder, Select, Set, TransactionTrait, prelude::*,
    sea_query::Expr,
};

/// Page size applied when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u64 = 10;
/// Upper bound a caller-supplied page size is clamped to.
pub const MAX_PAGE_SIZE: u64 = 100;
/// Maximum number of products the featured rotation returns.
pub const FEATURED_LIMIT: usize = 12;

/// Sort order for product listings. The wire format follows the
/// `ordering=-price` convention, `-` meaning descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductOrdering {
    /// Cheapest first
    PriceAsc,
    /// Most expensive first
    PriceDesc,
    /// Lowest rated first
    RatingAsc,
    /// Highest rated first
    RatingDesc,
    /// Oldest first
    CreatedAtAsc,
    /// Newest first (the catalog default)
    #[default]
    CreatedAtDesc,
}

impl ProductOrdering {
    /// Parses a wire ordering value; unknown fields yield `None` and callers
    /// fall back to the default rather than erroring.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "price" => Some(Self::PriceAsc),
            "-price" => Some(Self::PriceDesc),
            "rating" => Some(Self::RatingAsc),
            "-rating" => Some(Self::RatingDesc),
            "created_at" => Some(Self::CreatedAtAsc),
            "-created_at" => Some(Self::CreatedAtDesc),
            _ => None,
        }
    }
}

/// Filters accepted by the main product listing.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Exact category match
    pub category: Option<Category>,
    /// Exact subcategory match by id
    pub subcategory_id: Option<i64>,
    /// Featured flag match
    pub is_featured: Option<bool>,
    /// Inclusive lower price bound
    pub min_price: Option<f64>,
    /// Inclusive upper price bound
    pub max_price: Option<f64>,
    /// Case-insensitive free-text search over name and both descriptions
    pub search: Option<String>,
    /// Sort order
    pub ordering: ProductOrdering,
}

/// One page of products plus the pagination bookkeeping the API needs.
#[derive(Debug, Clone)]
pub struct ProductPage {
    /// Products on this page
    pub items: Vec<product::Model>,
    /// Total matching products across all pages
    pub total: u64,
    /// 1-based page number this result is for
    pub page: u64,
    /// Effective (clamped) page size
    pub page_size: u64,
}

/// Fields accepted when creating a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Display name, 2 to 100 characters
    pub name: String,
    /// Top-level category
    pub category: Category,
    /// Optional subcategory reference
    pub subcategory_id: Option<i64>,
    /// Price in dollars, strictly positive
    pub price: f64,
    /// Optional full description
    pub description: Option<String>,
    /// Optional listing summary
    pub short_description: Option<String>,
    /// Optional SEO description
    pub meta_description: Option<String>,
    /// Optional object-storage key for the main image
    pub image_path: Option<String>,
    /// Rating on a 0 to 5 scale
    pub rating: f64,
    /// Whether the product enters the featured rotation
    pub is_featured: bool,
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.len() < 2 {
        return Err(Error::Validation {
            message: "Product name must be at least 2 characters".to_string(),
        });
    }
    if trimmed.len() > 100 {
        return Err(Error::Validation {
            message: "Product name is too long".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() || price <= 0.0 {
        return Err(Error::Validation {
            message: format!("Price must be a positive amount, got {price}"),
        });
    }
    Ok(())
}

fn validate_rating(rating: f64) -> Result<()> {
    if !rating.is_finite() || !(0.0..=5.0).contains(&rating) {
        return Err(Error::Validation {
            message: format!("Rating must be between 0 and 5, got {rating}"),
        });
    }
    Ok(())
}

fn validate_description(name: &str, description: Option<&str>) -> Result<()> {
    let Some(description) = description else {
        return Ok(());
    };
    if description.len() < 10 {
        return Err(Error::Validation {
            message: "Provide a detailed product description (at least 10 characters)".to_string(),
        });
    }
    if description.to_lowercase() == name.to_lowercase() {
        return Err(Error::Validation {
            message: "Description cannot be the same as product name".to_string(),
        });
    }
    Ok(())
}

fn apply_price_bounds<Q: QueryFilter>(
    mut query: Q,
    min_price: Option<f64>,
    max_price: Option<f64>,
) -> Q {
    if let Some(min_price) = min_price {
        query = query.filter(product::Column::Price.gte(min_price));
    }
    if let Some(max_price) = max_price {
        query = query.filter(product::Column::Price.lte(max_price));
    }
    query
}

fn apply_ordering(query: Select<Product>, ordering: ProductOrdering) -> Select<Product> {
    match ordering {
        ProductOrdering::PriceAsc => query.order_by_asc(product::Column::Price),
        ProductOrdering::PriceDesc => query.order_by_desc(product::Column::Price),
        ProductOrdering::RatingAsc => query.order_by_asc(product::Column::Rating),
        ProductOrdering::RatingDesc => query.order_by_desc(product::Column::Rating),
        ProductOrdering::CreatedAtAsc => query.order_by_asc(product::Column::CreatedAt),
        ProductOrdering::CreatedAtDesc => query.order_by_desc(product::Column::CreatedAt),
    }
}

async fn fetch_page(
    db: &DatabaseConnection,
    query: Select<Product>,
    page: u64,
    page_size: u64,
) -> Result<ProductPage> {
    let page = page.max(1);
    let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
    let paginator = query.paginate(db, page_size);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page - 1).await?;
    Ok(ProductPage {
        items,
        total,
        page,
        page_size,
    })
}

/// Lists products matching `filter`, paginated.
///
/// No matches is an empty page, never an error.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_products(
    db: &DatabaseConnection,
    filter: &ProductFilter,
    page: u64,
    page_size: u64,
) -> Result<ProductPage> {
    let mut query = Product::find();

    if let Some(category) = filter.category {
        query = query.filter(product::Column::Category.eq(category));
    }
    if let Some(subcategory_id) = filter.subcategory_id {
        query = query.filter(product::Column::SubcategoryId.eq(subcategory_id));
    }
    if let Some(is_featured) = filter.is_featured {
        query = query.filter(product::Column::IsFeatured.eq(is_featured));
    }
    query = apply_price_bounds(query, filter.min_price, filter.max_price);

    if let Some(search) = filter.search.as_deref() {
        let term = search.trim();
        if !term.is_empty() {
            query = query.filter(
                Condition::any()
                    .add(product::Column::Name.contains(term))
                    .add(product::Column::Description.contains(term))
                    .add(product::Column::ShortDescription.contains(term)),
            );
        }
    }

    query = apply_ordering(query, filter.ordering);
    fetch_page(db, query, page, page_size).await
}

/// Lists products in `category`, optionally narrowed to a subcategory slug
/// and a price range.
///
/// An unknown slug matches nothing and yields an empty page.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_products_by_category(
    db: &DatabaseConnection,
    category: Category,
    subcategory_slug: Option<&str>,
    min_price: Option<f64>,
    max_price: Option<f64>,
    page: u64,
    page_size: u64,
) -> Result<ProductPage> {
    let mut query = Product::find().filter(product::Column::Category.eq(category));

    if let Some(slug) = subcategory_slug {
        let subcategory = Subcategory::find()
            .filter(subcategory::Column::Slug.eq(slug))
            .one(db)
            .await?;
        match subcategory {
            Some(subcategory) => {
                query = query.filter(product::Column::SubcategoryId.eq(subcategory.id));
            }
            None => {
                return Ok(ProductPage {
                    items: Vec::new(),
                    total: 0,
                    page: page.max(1),
                    page_size: page_size.clamp(1, MAX_PAGE_SIZE),
                });
            }
        }
    }

    query = apply_price_bounds(query, min_price, max_price);
    query = apply_ordering(query, ProductOrdering::CreatedAtDesc);
    fetch_page(db, query, page, page_size).await
}

/// Retrieves a specific product by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Returns the featured rotation: all featured products ordered by rating
/// descending, reduced to a uniform random subset of
/// [`FEATURED_LIMIT`] when more than that many exist.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_featured_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    let featured = Product::find()
        .filter(product::Column::IsFeatured.eq(true))
        .order_by_desc(product::Column::Rating)
        .all(db)
        .await?;

    if featured.len() <= FEATURED_LIMIT {
        return Ok(featured);
    }

    let mut rng = rand::thread_rng();
    Ok(featured
        .choose_multiple(&mut rng, FEATURED_LIMIT)
        .cloned()
        .collect())
}

/// Creates a new product, performing input validation.
///
/// # Errors
/// Returns an error if:
/// - The name is shorter than 2 or longer than 100 characters
/// - The price is not a positive finite amount
/// - The rating is outside 0 to 5
/// - The description is under 10 characters or equals the name
/// - The database insert operation fails
pub async fn create_product(
    db: &DatabaseConnection,
    input: NewProduct,
) -> Result<product::Model> {
    let name = validate_name(&input.name)?;
    validate_price(input.price)?;
    validate_rating(input.rating)?;
    validate_description(&name, input.description.as_deref())?;

    let now = chrono::Utc::now().naive_utc();

    let product = product::ActiveModel {
        name: Set(name),
        category: Set(input.category),
        subcategory_id: Set(input.subcategory_id),
        price: Set(input.price),
        description: Set(input.description),
        short_description: Set(input.short_description),
        meta_description: Set(input.meta_description),
        image_path: Set(input.image_path),
        rating: Set(input.rating),
        is_featured: Set(input.is_featured),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    product.insert(db).await.map_err(Into::into)
}

/// Updates an existing product's name and price, refreshing its timestamp.
///
/// # Errors
/// Returns an error if:
/// - The new name or price fails validation
/// - The product does not exist
/// - The database update operation fails
pub async fn update_product(
    db: &DatabaseConnection,
    product_id: i64,
    new_name: String,
    new_price: f64,
) -> Result<product::Model> {
    let name = validate_name(&new_name)?;
    validate_price(new_price)?;

    let mut product: product::ActiveModel = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?
        .into();

    product.name = Set(name);
    product.price = Set(new_price);
    product.updated_at = Set(chrono::Utc::now().naive_utc());

    product.update(db).await.map_err(Into::into)
}

/// Attaches a gallery image to a product. When `is_primary` is set, the flag
/// is cleared on all sibling images in the same transaction so a product
/// never ends up with two primaries.
///
/// # Errors
/// Returns an error if the product does not exist or the write fails.
pub async fn add_product_image(
    db: &DatabaseConnection,
    product_id: i64,
    image_path: String,
    is_primary: bool,
    alt_text: Option<String>,
) -> Result<product_image::Model> {
    Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    let txn = db.begin().await?;

    if is_primary {
        ProductImage::update_many()
            .col_expr(product_image::Column::IsPrimary, Expr::value(false))
            .filter(product_image::Column::ProductId.eq(product_id))
            .filter(product_image::Column::IsPrimary.eq(true))
            .exec(&txn)
            .await?;
    }

    let image = product_image::ActiveModel {
        product_id: Set(product_id),
        image_path: Set(image_path),
        is_primary: Set(is_primary),
        alt_text: Set(alt_text),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    Ok(image)
}

/// Promotes an existing image to primary, demoting any sibling that held the
/// flag, all within one transaction.
///
/// # Errors
/// Returns an error if the image does not exist or the write fails.
pub async fn set_primary_image(
    db: &DatabaseConnection,
    image_id: i64,
) -> Result<product_image::Model> {
    let image = ProductImage::find_by_id(image_id)
        .one(db)
        .await?
        .ok_or(Error::ImageNotFound { id: image_id })?;

    let txn = db.begin().await?;

    ProductImage::update_many()
        .col_expr(product_image::Column::IsPrimary, Expr::value(false))
        .filter(product_image::Column::ProductId.eq(image.product_id))
        .filter(product_image::Column::IsPrimary.eq(true))
        .exec(&txn)
        .await?;

    let mut image: product_image::ActiveModel = image.into();
    image.is_primary = Set(true);
    let image = image.update(&txn).await?;

    txn.commit().await?;
    Ok(image)
}

/// Retrieves all gallery images for a product, primary first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_images_for_product(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Vec<product_image::Model>> {
    ProductImage::find()
        .filter(product_image::Column::ProductId.eq(product_id))
        .order_by_desc(product_image::Column::IsPrimary)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Batch-loads gallery images for a set of products, for list serialization.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_images_for_products(
    db: &DatabaseConnection,
    product_ids: &[i64],
) -> Result<Vec<product_image::Model>> {
    if product_ids.is_empty() {
        return Ok(Vec::new());
    }
    ProductImage::find()
        .filter(product_image::Column::ProductId.is_in(product_ids.iter().copied()))
        .all(db)
        .await
        .map_err(Into::into)
}
