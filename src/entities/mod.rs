//! Entity module - Contains all SeaORM entity definitions for the marketplace tables.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod category;
pub mod contact_request;
pub mod facet;
pub mod hero_slide;
pub mod product;
pub mod product_facet;
pub mod report;
pub mod user;
pub mod website_setting;

// Re-export specific types to avoid conflicts
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use contact_request::{
    Column as ContactRequestColumn, ContactStatus, Entity as ContactRequest,
    Model as ContactRequestModel,
};
pub use facet::{Column as FacetColumn, Entity as Facet, FacetKind, Model as FacetModel};
pub use hero_slide::{Column as HeroSlideColumn, Entity as HeroSlide, Model as HeroSlideModel};
pub use product::{
    Column as ProductColumn, Entity as Product, ImageList, Model as ProductModel, ProductStatus,
};
pub use product_facet::{
    Column as ProductFacetColumn, Entity as ProductFacet, Model as ProductFacetModel,
};
pub use report::{Column as ReportColumn, Entity as Report, Model as ReportModel, ReportStatus};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
pub use website_setting::{
    Column as WebsiteSettingColumn, Entity as WebsiteSetting, Model as WebsiteSettingModel,
};
