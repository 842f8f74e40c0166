//! Report entity - Abuse reports filed by users against listings.
//!
//! Reports keep plain ids instead of foreign keys so they survive deletion of
//! the reported product.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Moderation state of a report
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// Awaiting moderation
    #[sea_orm(string_value = "open")]
    Open,
    /// Action was taken
    #[sea_orm(string_value = "resolved")]
    Resolved,
    /// No action needed
    #[sea_orm(string_value = "dismissed")]
    Dismissed,
}

/// Report database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    /// Unique identifier for the report
    #[sea_orm(primary_key)]
    pub id: i64,
    /// User who filed the report
    pub reporter_id: i64,
    /// Reported product
    pub product_id: i64,
    /// Reason given by the reporter
    pub reason: String,
    /// Moderation state
    pub status: ReportStatus,
    /// When the report was filed
    pub created_at: DateTimeUtc,
}

/// `Report` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
