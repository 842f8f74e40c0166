//! Category business logic - Storefront browsing categories.

use crate::{
    entities::{Category, category},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::validation("Category name cannot be empty"));
    }
    Ok(name.to_string())
}

/// Lists categories in display order.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .order_by_asc(category::Column::DisplayOrder)
        .order_by_asc(category::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a category at `display_order`.
///
/// # Errors
/// Returns an error if the name is empty or the insert fails.
pub async fn create_category(
    db: &DatabaseConnection,
    name: &str,
    image_url: Option<String>,
    display_order: i32,
) -> Result<category::Model> {
    let category = category::ActiveModel {
        name: Set(validate_name(name)?),
        image_url: Set(image_url),
        display_order: Set(display_order),
        ..Default::default()
    };
    let created = category.insert(db).await?;
    info!("Created category {} '{}'", created.id, created.name);
    Ok(created)
}

/// Replaces a category's name, image and position.
///
/// # Errors
/// Returns an error if the category does not exist, the name is empty, or the update fails.
pub async fn update_category(
    db: &DatabaseConnection,
    id: i64,
    name: &str,
    image_url: Option<String>,
    display_order: i32,
) -> Result<category::Model> {
    let name = validate_name(name)?;
    let mut category: category::ActiveModel = Category::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("category", id))?
        .into();

    category.name = Set(name);
    category.image_url = Set(image_url);
    category.display_order = Set(display_order);
    category.update(db).await.map_err(Into::into)
}

/// Deletes a category.
///
/// # Errors
/// Returns an error if no category has this id or the delete fails.
pub async fn delete_category(db: &DatabaseConnection, id: i64) -> Result<()> {
    let deleted = Category::delete_by_id(id).exec(db).await?;
    if deleted.rows_affected == 0 {
        return Err(Error::not_found("category", id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_category_crud() -> Result<()> {
        let db = setup_test_db().await?;

        let bridal = create_category(&db, "Bridal", None, 2).await?;
        let festive = create_category(&db, " Festive ", Some("festive.jpg".to_string()), 1).await?;
        assert_eq!(festive.name, "Festive");

        let names: Vec<String> = list_categories(&db)
            .await?
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Festive", "Bridal"]);

        let renamed = update_category(&db, bridal.id, "Bridal Wear", None, 0).await?;
        assert_eq!(renamed.name, "Bridal Wear");
        assert_eq!(list_categories(&db).await?[0].id, bridal.id);

        delete_category(&db, festive.id).await?;
        assert_eq!(list_categories(&db).await?.len(), 1);
        assert!(matches!(
            delete_category(&db, festive.id).await,
            Err(Error::NotFound { .. })
        ));

        let empty = create_category(&db, "", None, 0).await;
        assert!(matches!(empty, Err(Error::Validation { .. })));

        Ok(())
    }
}
