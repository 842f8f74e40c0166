//! Facet entity - Values of the five product-tagging dimensions.
//!
//! Product types, occasions, colors, materials and cities share one table and
//! are told apart by `kind`. Each dimension has its own display order.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five independent tagging dimensions
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum FacetKind {
    /// Garment type (saree, lehenga, sherwani...)
    #[sea_orm(string_value = "type")]
    Type,
    /// Occasion (wedding, party...)
    #[sea_orm(string_value = "occasion")]
    Occasion,
    /// Color, optionally with a hex swatch
    #[sea_orm(string_value = "color")]
    Color,
    /// Fabric
    #[sea_orm(string_value = "material")]
    Material,
    /// City where the garment can be picked up
    #[sea_orm(string_value = "city")]
    City,
}

impl FacetKind {
    /// All dimensions, in the priority order used to resolve un-namespaced ids.
    pub const ALL: [Self; 5] = [
        Self::Type,
        Self::Occasion,
        Self::Color,
        Self::Material,
        Self::City,
    ];

    /// Stable lowercase name, matching the stored value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Occasion => "occasion",
            Self::Color => "color",
            Self::Material => "material",
            Self::City => "city",
        }
    }

    /// Parses the lowercase name produced by [`FacetKind::as_str`].
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for FacetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Facet database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "facets")]
pub struct Model {
    /// Unique identifier for the facet value
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Dimension this value belongs to
    pub kind: FacetKind,
    /// Display name (e.g. "Wedding", "Silk")
    pub name: String,
    /// Optional illustration shown on the storefront
    pub image_url: Option<String>,
    /// Hex swatch for colors (e.g. `"#b22222"`)
    pub hex_color: Option<String>,
    /// Pickup location for cities
    pub location: Option<String>,
    /// Position within its dimension, ascending
    pub display_order: i32,
}

/// Defines relationships between Facet and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One facet value is attached to many products
    #[sea_orm(has_many = "super::product_facet::Entity")]
    Products,
}

impl Related<super::product_facet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
