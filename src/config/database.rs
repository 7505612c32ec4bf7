//! Database configuration module for the storefront backend.
//!
//! This module handles the `SQLite` connection and table creation using
//! `SeaORM`. Tables are generated from the entity definitions via
//! `Schema::create_table_from_entity`, ensuring the database schema matches
//! the Rust struct definitions without requiring manual SQL.

use crate::entities::{
    NewsletterSubscriber, Order, OrderItem, Payment, Product, ProductImage, Subcategory,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Establishes a connection to the database at `database_url`.
///
/// # Errors
/// Returns an error if the connection cannot be established.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all tables from the entity definitions.
///
/// Creation order follows the dependency graph so foreign keys resolve:
/// subcategories before products, products before images and order items,
/// orders before items and payments.
///
/// # Errors
/// Returns an error if a DDL statement fails.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let subcategory_table = schema.create_table_from_entity(Subcategory);
    let product_table = schema.create_table_from_entity(Product);
    let product_image_table = schema.create_table_from_entity(ProductImage);
    let order_table = schema.create_table_from_entity(Order);
    let order_item_table = schema.create_table_from_entity(OrderItem);
    let payment_table = schema.create_table_from_entity(Payment);
    let subscriber_table = schema.create_table_from_entity(NewsletterSubscriber);

    db.execute(builder.build(&subcategory_table)).await?;
    db.execute(builder.build(&product_table)).await?;
    db.execute(builder.build(&product_image_table)).await?;
    db.execute(builder.build(&order_table)).await?;
    db.execute(builder.build(&order_item_table)).await?;
    db.execute(builder.build(&payment_table)).await?;
    db.execute(builder.build(&subscriber_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        newsletter_subscriber::Model as SubscriberModel, order::Model as OrderModel,
        product::Model as ProductModel, subcategory::Model as SubcategoryModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Tables exist if we can query them.
        let _: Vec<SubcategoryModel> = Subcategory::find().limit(1).all(&db).await?;
        let _: Vec<ProductModel> = Product::find().limit(1).all(&db).await?;
        let _: Vec<OrderModel> = Order::find().limit(1).all(&db).await?;
        let _: Vec<SubscriberModel> = NewsletterSubscriber::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_connection_in_memory() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;
        let _: Vec<ProductModel> = Product::find().limit(1).all(&db).await?;
        Ok(())
    }
}
