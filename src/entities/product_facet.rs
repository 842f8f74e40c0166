//! Product facet entity - Many-to-many association between products and facet values.
//!
//! `kind` duplicates the facet's dimension so that associations can be read
//! per dimension without joining the facets table.

use super::facet::FacetKind;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Association row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_facets")]
pub struct Model {
    /// Unique identifier for the association
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Tagged product
    pub product_id: i64,
    /// Dimension of the facet value
    pub kind: FacetKind,
    /// Facet value
    pub facet_id: i64,
}

/// Defines relationships between `ProductFacet` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each association belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    /// Each association points at one facet value
    #[sea_orm(
        belongs_to = "super::facet::Entity",
        from = "Column::FacetId",
        to = "super::facet::Column::Id"
    )]
    Facet,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::facet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Facet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
