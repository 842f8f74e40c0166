//! Media store for product images.
//!
//! Optimized uploads are written below a root directory that is served
//! publicly under `public_base_url`. Object keys are random, so uploads never
//! overwrite each other.

use crate::{
    config::settings::MediaSettings,
    core::image::{OptimizedImage, OptimizerSettings, optimize_image},
    entities::product,
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use std::path::PathBuf;
use tracing::{info, instrument, warn};

const PRODUCT_PREFIX: &str = "products";

/// Filesystem-backed object store
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
    public_base_url: String,
}

impl MediaStore {
    /// Store rooted at `root`, served under `public_base_url`.
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    /// Store described by [`MediaSettings`].
    #[must_use]
    pub fn from_settings(settings: &MediaSettings) -> Self {
        Self::new(settings.root.clone(), settings.public_base_url.clone())
    }

    /// Writes `bytes` as a new product object and returns its key.
    ///
    /// # Errors
    /// Returns an error if the directory or file cannot be written.
    pub async fn put(&self, bytes: &[u8], extension: &str) -> Result<String> {
        let key = format!(
            "{PRODUCT_PREFIX}/{}.{}",
            uuid::Uuid::new_v4().simple(),
            extension.trim_start_matches('.')
        );
        let path = self.root.join(&key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;
        Ok(key)
    }

    /// Deletes a stored object.
    ///
    /// # Errors
    /// Returns an error if the object does not exist or cannot be deleted.
    pub async fn remove(&self, key: &str) -> Result<()> {
        tokio::fs::remove_file(self.root.join(key)).await?;
        Ok(())
    }

    /// Public URL of a stored object.
    #[must_use]
    pub fn public_url(&self, key: &str) -> String {
        format!(
            "{}/{}",
            self.public_base_url.trim_end_matches('/'),
            key.trim_start_matches('/')
        )
    }
}

/// Optimizes an uploaded image, stores it and appends it to the product.
///
/// Nothing is written if the product does not exist or the upload cannot be
/// decoded, and the stored object is removed again if the product row cannot
/// be updated. Encoding runs on the blocking thread pool.
///
/// # Errors
/// Returns [`Error::NotFound`] for an unknown product, the optimizer's errors
/// for undecodable uploads, and I/O or database errors from storing the result.
#[instrument(skip(db, store, source, settings))]
pub async fn upload_product_image(
    db: &DatabaseConnection,
    store: &MediaStore,
    product_id: i64,
    source: &[u8],
    settings: &OptimizerSettings,
) -> Result<(product::Model, OptimizedImage)> {
    if crate::core::product::get_product_by_id(db, product_id)
        .await?
        .is_none()
    {
        return Err(Error::not_found("product", product_id));
    }

    let original_size = source.len() as u64;
    let owned_source = source.to_vec();
    let owned_settings = settings.clone();
    let optimized = tokio::task::spawn_blocking(move || {
        optimize_image(&owned_source, original_size, &owned_settings)
    })
    .await??;
    info!(
        "Optimized upload from {} to {} bytes at quality {}",
        original_size,
        optimized.size(),
        optimized.chosen.quality
    );

    let key = store.put(&optimized.bytes, "jpg").await?;
    match crate::core::product::add_product_image(db, product_id, store.public_url(&key)).await {
        Ok(product) => Ok((product, optimized)),
        Err(e) => {
            if let Err(cleanup) = store.remove(&key).await {
                warn!("Failed to remove orphaned object {key}: {cleanup}");
            }
            Err(e)
        }
    }
}
