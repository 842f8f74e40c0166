//! Core business logic, independent of how the admin console is presented.

/// Product table filtering, sorting and query-string state
pub mod catalog;
/// Storefront categories
pub mod category;
/// Concurrent loading of every dashboard tab
pub mod dashboard;
/// Facet values, aggregation of product tags and display order
pub mod facet;
/// Hero banner carousel
pub mod hero;
/// Size-budgeted re-encoding of uploaded images
pub mod image;
/// Contact requests and abuse reports
pub mod inbox;
/// Product listings, their facet tags and images
pub mod product;
/// Website-wide key-value settings
pub mod settings;
/// Marketplace members
pub mod user;
