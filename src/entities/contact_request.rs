//! Contact request entity - Messages sent through the storefront contact form.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Handling state of a contact request
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    /// Not yet looked at
    #[sea_orm(string_value = "new")]
    New,
    /// Picked up by staff
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    /// Answered or discarded
    #[sea_orm(string_value = "closed")]
    Closed,
}

/// Contact request database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contact_requests")]
pub struct Model {
    /// Unique identifier for the request
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Sender name
    pub name: String,
    /// Sender phone
    pub phone: String,
    /// Free-form message
    pub message: String,
    /// Handling state
    pub status: ContactStatus,
    /// When the request was received
    pub created_at: DateTimeUtc,
}

/// `ContactRequest` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
