//! Newsletter business logic - Handles subscription capture.
//!
//! Uniqueness is enforced by the storage layer: the insert is attempted
//! unconditionally and a unique-constraint violation is translated into a
//! duplicate error, which avoids the check-then-act race a pre-query would
//! introduce under concurrent signups.

use crate::{
    entities::{NewsletterSubscriberModel, newsletter_subscriber},
    errors::{Error, Result},
};
use sea_orm::{Set, SqlErr, prelude::*};

fn validate_email(email: &str) -> Result<()> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(Error::Validation {
            message: "Enter a valid email address".to_string(),
        });
    };
    if local.is_empty()
        || domain.is_empty()
        || domain.starts_with('.')
        || domain.ends_with('.')
        || !domain.contains('.')
        || email.contains(char::is_whitespace)
        || email.matches('@').count() != 1
    {
        return Err(Error::Validation {
            message: "Enter a valid email address".to_string(),
        });
    }
    Ok(())
}

/// Subscribes an email to the newsletter.
///
/// # Errors
/// Returns an error if:
/// - The email is syntactically invalid
/// - The email is already subscribed ([`Error::DuplicateEmail`])
/// - The database insert operation fails
pub async fn subscribe(
    db: &DatabaseConnection,
    email: &str,
) -> Result<NewsletterSubscriberModel> {
    let email = email.trim();
    validate_email(email)?;

    let subscriber = newsletter_subscriber::ActiveModel {
        email: Set(email.to_string()),
        date_subscribed: Set(chrono::Utc::now()),
        is_active: Set(true),
        ..Default::default()
    };

    subscriber.insert(db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => Error::DuplicateEmail {
            email: email.to_string(),
        },
        _ => e.into(),
    })
}
