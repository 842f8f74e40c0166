//! Hero slide entity - Banners rotated at the top of the storefront.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Hero slide database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "hero_slides")]
pub struct Model {
    /// Unique identifier for the slide
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Headline
    pub title: String,
    /// Secondary line under the headline
    pub subtitle: Option<String>,
    /// Banner image
    pub image_url: String,
    /// Where the banner links to, if anywhere
    pub link_url: Option<String>,
    /// Position in the carousel, ascending
    pub display_order: i32,
    /// Hidden slides stay in the table but are not shown
    pub is_active: bool,
}

/// `HeroSlide` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
