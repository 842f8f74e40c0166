//! Product business logic - Handles all product-related operations.
//!
//! This module provides functions for creating, retrieving, updating and
//! deleting listings, for assigning facet values to them, and for managing
//! their image list and cover image. All functions are async and return
//! Result types; callers re-read rows after every mutation.

use crate::{
    entities::{
        Facet, FacetKind, ImageList, Product, ProductFacet, ProductStatus, facet, product,
        product_facet,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info};

/// Fields needed to list a new garment
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Owner of the garment
    pub owner_id: i64,
    /// Listing title
    pub title: String,
    /// Price as displayed, currency symbol included
    pub price: String,
    /// Public product code, if assigned
    pub code: Option<String>,
    /// Initial listing state
    pub status: ProductStatus,
}

/// Editable fields of an existing listing
#[derive(Debug, Clone)]
pub struct ProductUpdate {
    /// Listing title
    pub title: String,
    /// Price as displayed
    pub price: String,
    /// Public product code
    pub code: Option<String>,
    /// Listing state
    pub status: ProductStatus,
}

fn validate_listing(title: &str, price: &str) -> Result<(String, String)> {
    let title = title.trim();
    if title.is_empty() {
        return Err(Error::validation("Product title cannot be empty"));
    }
    let price = price.trim();
    if price.is_empty() {
        return Err(Error::validation("Product price cannot be empty"));
    }
    Ok((title.to_string(), price.to_string()))
}

async fn require_product(db: &DatabaseConnection, id: i64) -> Result<product::Model> {
    get_product_by_id(db, id)
        .await?
        .ok_or_else(|| Error::not_found("product", id))
}

/// Retrieves a specific product by its id.
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

/// Lists every product, newest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .order_by_desc(product::Column::CreatedAt)
        .order_by_desc(product::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists the products of one owner, newest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_products_for_owner(
    db: &DatabaseConnection,
    owner_id: i64,
) -> Result<Vec<product::Model>> {
    Product::find()
        .filter(product::Column::OwnerId.eq(owner_id))
        .order_by_desc(product::Column::CreatedAt)
        .order_by_desc(product::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a new product with no images and no facet tags.
///
/// # Errors
/// Returns an error if the title or price is empty, the owner does not
/// exist, or the insert fails.
pub async fn create_product(db: &DatabaseConnection, new: NewProduct) -> Result<product::Model> {
    let (title, price) = validate_listing(&new.title, &new.price)?;
    if crate::core::user::get_user_by_id(db, new.owner_id)
        .await?
        .is_none()
    {
        return Err(Error::not_found("user", new.owner_id));
    }

    let now = chrono::Utc::now();
    let product = product::ActiveModel {
        code: Set(new.code.map(|c| c.trim().to_string()).filter(|c| !c.is_empty())),
        owner_id: Set(new.owner_id),
        title: Set(title),
        price: Set(price),
        images: Set(ImageList::default()),
        primary_image: Set(0),
        status: Set(new.status),
        created_at: Set(Some(now)),
        updated_at: Set(now),
        ..Default::default()
    };
    let created = product.insert(db).await?;
    info!("Created product {} '{}'", created.id, created.title);
    Ok(created)
}

/// Replaces the editable fields of a product.
///
/// # Errors
/// Returns an error if the product does not exist, the title or price is empty,
/// or the update fails.
pub async fn update_product(
    db: &DatabaseConnection,
    product_id: i64,
    update: ProductUpdate,
) -> Result<product::Model> {
    let (title, price) = validate_listing(&update.title, &update.price)?;
    let mut product: product::ActiveModel = require_product(db, product_id).await?.into();

    product.title = Set(title);
    product.price = Set(price);
    product.code = Set(update
        .code
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty()));
    product.status = Set(update.status);
    product.updated_at = Set(chrono::Utc::now());

    product.update(db).await.map_err(Into::into)
}

/// Deletes a product and its facet associations.
///
/// # Errors
/// Returns an error if the product does not exist or the transaction fails.
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    ProductFacet::delete_many()
        .filter(product_facet::Column::ProductId.eq(product_id))
        .exec(&txn)
        .await?;
    let deleted = Product::delete_by_id(product_id).exec(&txn).await?;
    if deleted.rows_affected == 0 {
        return Err(Error::not_found("product", product_id));
    }

    txn.commit().await?;
    info!("Deleted product {product_id}");
    Ok(())
}

/// Replaces a product's tags in one dimension with `facet_ids`.
///
/// Duplicate ids are collapsed; every id must be a value of `kind`.
///
/// # Errors
/// Returns an error if the product does not exist, an id is not a facet of
/// `kind`, or the transaction fails.
pub async fn set_product_facets(
    db: &DatabaseConnection,
    product_id: i64,
    kind: FacetKind,
    facet_ids: &[i64],
) -> Result<()> {
    require_product(db, product_id).await?;

    let mut unique: Vec<i64> = Vec::with_capacity(facet_ids.len());
    for id in facet_ids {
        if !unique.contains(id) {
            unique.push(*id);
        }
    }

    let known = Facet::find()
        .filter(facet::Column::Kind.eq(kind))
        .filter(facet::Column::Id.is_in(unique.iter().copied()))
        .all(db)
        .await?;
    if let Some(missing) = unique.iter().find(|id| !known.iter().any(|f| f.id == **id)) {
        return Err(Error::NotFound {
            entity: "facet",
            id: format!("{kind}:{missing}"),
        });
    }

    let txn = db.begin().await?;
    ProductFacet::delete_many()
        .filter(product_facet::Column::ProductId.eq(product_id))
        .filter(product_facet::Column::Kind.eq(kind))
        .exec(&txn)
        .await?;
    for facet_id in &unique {
        product_facet::ActiveModel {
            product_id: Set(product_id),
            kind: Set(kind),
            facet_id: Set(*facet_id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }
    txn.commit().await?;

    debug!(
        "Product {product_id} now has {} {kind} tag(s)",
        unique.len()
    );
    Ok(())
}

async fn save_images(
    db: &DatabaseConnection,
    product: product::Model,
    images: Vec<String>,
    primary_image: i32,
) -> Result<product::Model> {
    let mut product: product::ActiveModel = product.into();
    product.images = Set(ImageList(images));
    product.primary_image = Set(primary_image);
    product.updated_at = Set(chrono::Utc::now());
    product.update(db).await.map_err(Into::into)
}

fn to_index(index: usize) -> Result<i32> {
    i32::try_from(index).map_err(|_| Error::validation("Image index does not fit"))
}

/// Appends a public image URL to a product.
///
/// # Errors
/// Returns an error if the product does not exist or the update fails.
pub async fn add_product_image(
    db: &DatabaseConnection,
    product_id: i64,
    url: String,
) -> Result<product::Model> {
    let product = require_product(db, product_id).await?;
    let mut images = product.images.0.clone();
    images.push(url);
    let primary = product.primary_image;
    save_images(db, product, images, primary).await
}

/// Removes the image at `index`, keeping the cover pointing at the same
/// picture where possible and at the first picture otherwise.
///
/// # Errors
/// Returns [`Error::InvalidIndex`] if `index` is out of range, or an error if
/// the product does not exist or the update fails.
pub async fn remove_product_image(
    db: &DatabaseConnection,
    product_id: i64,
    index: usize,
) -> Result<product::Model> {
    let product = require_product(db, product_id).await?;
    let mut images = product.images.0.clone();
    if index >= images.len() {
        return Err(Error::InvalidIndex {
            index,
            len: images.len(),
        });
    }
    images.remove(index);

    let removed = to_index(index)?;
    let primary = match product.primary_image {
        current if current > removed => current - 1,
        current if current == removed => 0,
        current => current,
    };
    save_images(db, product, images, primary).await
}

/// Makes the image at `index` the product's cover.
///
/// # Errors
/// Returns [`Error::InvalidIndex`] if `index` is out of range, or an error if
/// the product does not exist or the update fails.
pub async fn set_primary_image(
    db: &DatabaseConnection,
    product_id: i64,
    index: usize,
) -> Result<product::Model> {
    let product = require_product(db, product_id).await?;
    let len = product.images.0.len();
    if index >= len {
        return Err(Error::InvalidIndex { index, len });
    }
    let images = product.images.0.clone();
    save_images(db, product, images, to_index(index)?).await
}
