//! Product entity - A garment listed for rent.
//!
//! Prices are stored exactly as the owner entered them (e.g. `"₹500"`), the
//! image list is a JSON array of public URLs and `primary_image` indexes into it.
//! Facet tags live in the `product_facets` association table.

use sea_orm::{FromJsonQueryResult, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// Ordered list of public image URLs, stored as a JSON column
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ImageList(pub Vec<String>);

/// Listing lifecycle state
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    /// Not yet visible to renters
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Listed and rentable
    #[sea_orm(string_value = "active")]
    Active,
    /// Withdrawn by the owner or staff
    #[sea_orm(string_value = "archived")]
    Archived,
}

/// Product database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Public product code shown to staff (e.g. "RW-0042"), if assigned
    pub code: Option<String>,
    /// ID of the user who owns the garment
    pub owner_id: i64,
    /// Listing title (e.g. "Red Silk Saree")
    pub title: String,
    /// Price as entered, currency symbol included
    pub price: String,
    /// Public image URLs
    #[sea_orm(column_type = "Json")]
    pub images: ImageList,
    /// Index of the cover image within `images`
    pub primary_image: i32,
    /// Listing state
    pub status: ProductStatus,
    /// When the product was created, missing for imported rows
    pub created_at: Option<DateTimeUtc>,
    /// When the product was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product belongs to one owner
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id"
    )]
    Owner,
    /// One product has many facet associations
    #[sea_orm(has_many = "super::product_facet::Entity")]
    Facets,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::product_facet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Facets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
