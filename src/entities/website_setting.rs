//! Website setting entity - Key-value pairs for storefront-wide settings
//! (support phone, announcement bar text, and the like).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Website setting database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "website_settings")]
pub struct Model {
    /// Setting key (e.g. `"support_phone"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// Value stored as string
    pub value: String,
    /// When this setting was last modified
    pub updated_at: DateTimeUtc,
}

/// `WebsiteSetting` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
