//! Shared test utilities for the admin back office.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        product::{self, NewProduct},
        user,
    },
    entities::{self, ProductStatus},
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test user with no auth id.
pub async fn create_test_user(
    db: &DatabaseConnection,
    name: &str,
    phone: &str,
) -> Result<entities::user::Model> {
    user::create_user(db, name, phone, None).await
}

/// Product input with sensible defaults.
///
/// # Defaults
/// * `code`: None
/// * `status`: active
#[must_use]
pub fn new_product(owner_id: i64, title: &str, price: &str) -> NewProduct {
    NewProduct {
        owner_id,
        title: title.to_string(),
        price: price.to_string(),
        code: None,
        status: ProductStatus::Active,
    }
}

/// Creates a test product priced at ₹1000.
pub async fn create_test_product(
    db: &DatabaseConnection,
    title: &str,
    owner_id: i64,
) -> Result<entities::product::Model> {
    product::create_product(db, new_product(owner_id, title, "₹1000")).await
}

/// Creates a test product with custom price.
pub async fn create_custom_product(
    db: &DatabaseConnection,
    title: &str,
    price: &str,
    owner_id: i64,
) -> Result<entities::product::Model> {
    product::create_product(db, new_product(owner_id, title, price)).await
}

/// Sets up a test environment with one user.
/// Returns (db, owner).
pub async fn setup_with_owner() -> Result<(DatabaseConnection, entities::user::Model)> {
    let db = setup_test_db().await?;
    let owner = create_test_user(&db, "Test Owner", "9000000000").await?;
    Ok((db, owner))
}

/// Sets up a test environment with an owner and one of their products.
/// Returns (db, owner, product).
pub async fn setup_with_product() -> Result<(
    DatabaseConnection,
    entities::user::Model,
    entities::product::Model,
)> {
    let (db, owner) = setup_with_owner().await?;
    let product = create_test_product(&db, "Test Product", owner.id).await?;
    Ok((db, owner, product))
}
