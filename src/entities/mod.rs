//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod newsletter_subscriber;
pub mod order;
pub mod order_item;
pub mod payment;
pub mod product;
pub mod product_image;
pub mod subcategory;

// Re-export specific types to avoid conflicts
pub use newsletter_subscriber::{
    Column as NewsletterSubscriberColumn, Entity as NewsletterSubscriber,
    Model as NewsletterSubscriberModel,
};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel, OrderStatus};
pub use order_item::{Column as OrderItemColumn, Entity as OrderItem, Model as OrderItemModel};
pub use payment::{Column as PaymentColumn, Entity as Payment, Model as PaymentModel, PaymentStatus};
pub use product::{Category, Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use product_image::{
    Column as ProductImageColumn, Entity as ProductImage, Model as ProductImageModel,
};
pub use subcategory::{Column as SubcategoryColumn, Entity as Subcategory, Model as SubcategoryModel};
