//! User business logic - Marketplace members who own listings.
//!
//! Phone numbers are normalised before they are stored and must be unique.
//! Uniqueness is checked with a read before the write, which leaves a window
//! for two concurrent registrations of the same number.

use crate::{
    entities::{Product, User, product, user},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};
use tracing::info;

/// Keeps digits and a leading `+`, dropping spaces, dashes and brackets.
#[must_use]
pub fn normalize_phone(raw: &str) -> String {
    let trimmed = raw.trim();
    let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
    if trimmed.starts_with('+') {
        format!("+{digits}")
    } else {
        digits
    }
}

fn validate(name: &str, phone: &str) -> Result<(String, String)> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::validation("User name cannot be empty"));
    }
    let phone = normalize_phone(phone);
    if phone.trim_start_matches('+').len() < 7 {
        return Err(Error::validation(format!(
            "Phone number is too short: {phone}"
        )));
    }
    Ok((name.to_string(), phone))
}

async fn ensure_phone_free(
    db: &DatabaseConnection,
    phone: &str,
    exclude_id: Option<i64>,
) -> Result<()> {
    if let Some(existing) = get_user_by_phone(db, phone).await? {
        if Some(existing.id) != exclude_id {
            return Err(Error::DuplicatePhone {
                phone: phone.to_string(),
            });
        }
    }
    Ok(())
}

/// Lists all users alphabetically by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_users(db: &DatabaseConnection) -> Result<Vec<user::Model>> {
    User::find()
        .order_by_asc(user::Column::Name)
        .order_by_asc(user::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a user by id.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_user_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<user::Model>> {
    User::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Finds a user by phone number in any common notation.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_user_by_phone(
    db: &DatabaseConnection,
    phone: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Phone.eq(normalize_phone(phone)))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a user after validating the name and phone.
///
/// # Errors
/// Returns an error if the name is empty, the phone is too short or already
/// registered, or the insert fails.
pub async fn create_user(
    db: &DatabaseConnection,
    name: &str,
    phone: &str,
    auth_id: Option<String>,
) -> Result<user::Model> {
    let (name, phone) = validate(name, phone)?;
    ensure_phone_free(db, &phone, None).await?;

    let user = user::ActiveModel {
        name: Set(name),
        phone: Set(phone),
        auth_id: Set(auth_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let created = user.insert(db).await?;
    info!("Created user {} ({})", created.id, created.name);
    Ok(created)
}

/// Updates a user's name and phone.
///
/// # Errors
/// Returns an error if the user does not exist, the name or phone is invalid,
/// the phone belongs to another user, or the update fails.
pub async fn update_user(
    db: &DatabaseConnection,
    id: i64,
    name: &str,
    phone: &str,
) -> Result<user::Model> {
    let (name, phone) = validate(name, phone)?;
    let existing = get_user_by_id(db, id)
        .await?
        .ok_or_else(|| Error::not_found("user", id))?;
    ensure_phone_free(db, &phone, Some(id)).await?;

    let mut user: user::ActiveModel = existing.into();
    user.name = Set(name);
    user.phone = Set(phone);
    user.update(db).await.map_err(Into::into)
}

/// Deletes a user that no longer owns any products.
///
/// # Errors
/// Returns [`Error::UserHasProducts`] while the user still owns listings, or an
/// error if no user has this id or the delete fails.
pub async fn delete_user(db: &DatabaseConnection, id: i64) -> Result<()> {
    let owned = Product::find()
        .filter(product::Column::OwnerId.eq(id))
        .count(db)
        .await?;
    if owned > 0 {
        return Err(Error::UserHasProducts {
            user_id: id,
            count: owned,
        });
    }

    let deleted = User::delete_by_id(id).exec(db).await?;
    if deleted.rows_affected == 0 {
        return Err(Error::not_found("user", id));
    }
    info!("Deleted user {id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("+91 98765-43210"), "+919876543210");
        assert_eq!(normalize_phone(" (022) 2345 6789 "), "02223456789");
        assert_eq!(normalize_phone("abc"), "");
    }

    #[tokio::test]
    async fn test_create_user_normalizes_phone() -> Result<()> {
        let db = setup_test_db().await?;

        let user = create_user(&db, "  Asha  ", "+91 98765 43210", None).await?;

        assert_eq!(user.name, "Asha");
        assert_eq!(user.phone, "+919876543210");
        let found = get_user_by_phone(&db, "+91-98765-43210").await?;
        assert_eq!(found.map(|u| u.id), Some(user.id));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_user_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let empty = create_user(&db, " ", "9876543210", None).await;
        assert!(matches!(empty, Err(Error::Validation { .. })));

        let short = create_user(&db, "Asha", "12-34", None).await;
        assert!(matches!(short, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_phone_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        create_user(&db, "Asha", "9876543210", None).await?;

        let duplicate = create_user(&db, "Ravi", "98765 43210", None).await;
        assert!(matches!(duplicate, Err(Error::DuplicatePhone { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_user_keeps_own_phone() -> Result<()> {
        let db = setup_test_db().await?;
        let asha = create_user(&db, "Asha", "9876543210", None).await?;
        let ravi = create_user(&db, "Ravi", "9123456780", None).await?;

        let renamed = update_user(&db, asha.id, "Asha K", "9876543210").await?;
        assert_eq!(renamed.name, "Asha K");

        let stolen = update_user(&db, ravi.id, "Ravi", "9876543210").await;
        assert!(matches!(stolen, Err(Error::DuplicatePhone { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_user_with_products_refused() -> Result<()> {
        let (db, owner, product) = setup_with_product().await?;

        let refused = delete_user(&db, owner.id).await;
        assert!(matches!(
            refused,
            Err(Error::UserHasProducts { count: 1, .. })
        ));

        crate::core::product::delete_product(&db, product.id).await?;
        delete_user(&db, owner.id).await?;
        assert!(get_user_by_id(&db, owner.id).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_list_users_sorted_by_name() -> Result<()> {
        let db = setup_test_db().await?;
        create_user(&db, "Zoya", "9000000001", None).await?;
        create_user(&db, "Aman", "9000000002", None).await?;

        let names: Vec<String> = list_users(&db).await?.into_iter().map(|u| u.name).collect();
        assert_eq!(names, vec!["Aman", "Zoya"]);

        Ok(())
    }
}
