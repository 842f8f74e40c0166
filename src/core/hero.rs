//! Hero slide business logic - The storefront banner carousel.
//!
//! Slides are appended at the end of the carousel and can be reordered as a
//! whole or hidden without being deleted.

use crate::{
    entities::{HeroSlide, hero_slide},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// Content of a slide
#[derive(Debug, Clone, Default)]
pub struct SlideContent {
    /// Headline
    pub title: String,
    /// Secondary line
    pub subtitle: Option<String>,
    /// Banner image URL
    pub image_url: String,
    /// Click-through target
    pub link_url: Option<String>,
}

fn validate(content: &SlideContent) -> Result<()> {
    if content.title.trim().is_empty() {
        return Err(Error::validation("Slide title cannot be empty"));
    }
    if content.image_url.trim().is_empty() {
        return Err(Error::validation("Slide needs an image"));
    }
    Ok(())
}

async fn require_slide(db: &DatabaseConnection, id: i64) -> Result<hero_slide::Model> {
    HeroSlide::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("hero slide", id))
}

/// Lists slides in carousel order, optionally only the visible ones.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_slides(
    db: &DatabaseConnection,
    active_only: bool,
) -> Result<Vec<hero_slide::Model>> {
    let mut query = HeroSlide::find();
    if active_only {
        query = query.filter(hero_slide::Column::IsActive.eq(true));
    }
    query
        .order_by_asc(hero_slide::Column::DisplayOrder)
        .order_by_asc(hero_slide::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Appends a visible slide to the carousel.
///
/// # Errors
/// Returns an error if the title or image URL is empty or the insert fails.
pub async fn create_slide(
    db: &DatabaseConnection,
    content: SlideContent,
) -> Result<hero_slide::Model> {
    validate(&content)?;
    let next_order = HeroSlide::find()
        .order_by_desc(hero_slide::Column::DisplayOrder)
        .one(db)
        .await?
        .map_or(0, |last| last.display_order + 1);

    let slide = hero_slide::ActiveModel {
        title: Set(content.title.trim().to_string()),
        subtitle: Set(content.subtitle),
        image_url: Set(content.image_url),
        link_url: Set(content.link_url),
        display_order: Set(next_order),
        is_active: Set(true),
        ..Default::default()
    };
    let created = slide.insert(db).await?;
    info!("Created hero slide {} at position {}", created.id, next_order);
    Ok(created)
}

/// Replaces the content of a slide.
///
/// # Errors
/// Returns an error if the slide does not exist, the content is invalid, or the
/// update fails.
pub async fn update_slide(
    db: &DatabaseConnection,
    id: i64,
    content: SlideContent,
) -> Result<hero_slide::Model> {
    validate(&content)?;
    let mut slide: hero_slide::ActiveModel = require_slide(db, id).await?.into();
    slide.title = Set(content.title.trim().to_string());
    slide.subtitle = Set(content.subtitle);
    slide.image_url = Set(content.image_url);
    slide.link_url = Set(content.link_url);
    slide.update(db).await.map_err(Into::into)
}

/// Shows or hides a slide.
///
/// # Errors
/// Returns an error if the slide does not exist or the update fails.
pub async fn set_slide_active(
    db: &DatabaseConnection,
    id: i64,
    is_active: bool,
) -> Result<hero_slide::Model> {
    let mut slide: hero_slide::ActiveModel = require_slide(db, id).await?.into();
    slide.is_active = Set(is_active);
    slide.update(db).await.map_err(Into::into)
}

/// Deletes a slide.
///
/// # Errors
/// Returns an error if no slide has this id or the delete fails.
pub async fn delete_slide(db: &DatabaseConnection, id: i64) -> Result<()> {
    let deleted = HeroSlide::delete_by_id(id).exec(db).await?;
    if deleted.rows_affected == 0 {
        return Err(Error::not_found("hero slide", id));
    }
    Ok(())
}

/// Rewrites the carousel order; `ordered_ids` must list every slide once.
///
/// # Errors
/// Returns an error if `ordered_ids` is not a permutation of the slide ids or
/// the transaction fails.
pub async fn reorder_slides(
    db: &DatabaseConnection,
    ordered_ids: &[i64],
) -> Result<Vec<hero_slide::Model>> {
    let mut current: Vec<i64> = list_slides(db, false).await?.iter().map(|s| s.id).collect();
    let mut requested = ordered_ids.to_vec();
    current.sort_unstable();
    requested.sort_unstable();
    if current != requested {
        return Err(Error::validation("Reorder must list every slide exactly once"));
    }

    let txn = db.begin().await?;
    for (position, id) in ordered_ids.iter().enumerate() {
        let position = i32::try_from(position)
            .map_err(|_| Error::validation("Too many slides to reorder"))?;
        HeroSlide::update_many()
            .col_expr(hero_slide::Column::DisplayOrder, Expr::value(position))
            .filter(hero_slide::Column::Id.eq(*id))
            .exec(&txn)
            .await?;
    }
    txn.commit().await?;

    list_slides(db, false).await
}
