//! Website settings business logic.
//!
//! Settings are plain key-value rows. A key without a row is the normal
//! state for a fresh install, so reads fall back to a caller-supplied default.

use crate::{
    entities::{WebsiteSetting, website_setting},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, prelude::*, sea_query::OnConflict};
use tracing::debug;

/// Key of the support phone shown in the storefront footer
pub const SUPPORT_PHONE_KEY: &str = "support_phone";
/// Key of the announcement bar text
pub const ANNOUNCEMENT_KEY: &str = "announcement";

/// Reads a setting, returning `None` if it was never stored.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn find_setting(db: &DatabaseConnection, key: &str) -> Result<Option<String>> {
    let value = WebsiteSetting::find_by_id(key.to_string())
        .one(db)
        .await?
        .map(|row| row.value);
    debug!("Website setting '{}': {:?}", key, value);
    Ok(value)
}

/// Reads a setting, falling back to `default` if it was never stored.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_setting(db: &DatabaseConnection, key: &str, default: &str) -> Result<String> {
    Ok(find_setting(db, key)
        .await?
        .unwrap_or_else(|| default.to_string()))
}

/// Inserts or replaces a setting.
///
/// # Errors
/// Returns an error if the upsert fails.
pub async fn set_setting(db: &DatabaseConnection, key: &str, value: &str) -> Result<()> {
    let row = website_setting::ActiveModel {
        key: Set(key.to_string()),
        value: Set(value.to_string()),
        updated_at: Set(chrono::Utc::now()),
    };
    WebsiteSetting::insert(row)
        .on_conflict(
            OnConflict::column(website_setting::Column::Key)
                .update_columns([
                    website_setting::Column::Value,
                    website_setting::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec(db)
        .await?;
    Ok(())
}

/// Lists every stored setting ordered by key.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_settings(db: &DatabaseConnection) -> Result<Vec<website_setting::Model>> {
    WebsiteSetting::find()
        .order_by_asc(website_setting::Column::Key)
        .all(db)
        .await
        .map_err(Into::into)
}
