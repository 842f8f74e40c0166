//! Dashboard loading.
//!
//! Right after sign-in every admin tab's data is fetched at once. The loads
//! run concurrently and fail independently: a broken reports query leaves
//! users, products and everything else usable.

use crate::{
    core::{
        catalog::{Catalog, load_catalog},
        category::list_categories,
        facet::list_all_facets,
        hero::list_slides,
        inbox::{list_contact_requests, list_reports},
        user::list_users,
    },
    entities::{category, contact_request, facet, hero_slide, report, user},
    errors::Result,
};
use sea_orm::DatabaseConnection;
use tracing::{error, info};

/// Result of every dashboard load, each kept separately
#[derive(Debug)]
pub struct Dashboard {
    /// Users tab
    pub users: Result<Vec<user::Model>>,
    /// Products tab, already joined with owners and facet tags
    pub catalog: Result<Catalog>,
    /// Facets tab, all five dimensions
    pub facets: Result<Vec<facet::Model>>,
    /// Categories tab
    pub categories: Result<Vec<category::Model>>,
    /// Hero banner tab, hidden slides included
    pub hero_slides: Result<Vec<hero_slide::Model>>,
    /// Contact requests tab
    pub contact_requests: Result<Vec<contact_request::Model>>,
    /// Reports tab
    pub reports: Result<Vec<report::Model>>,
}

impl Dashboard {
    /// Names and messages of the loads that failed.
    #[must_use]
    pub fn failures(&self) -> Vec<(&'static str, String)> {
        fn failure<T>(name: &'static str, result: &Result<T>) -> Option<(&'static str, String)> {
            result.as_ref().err().map(|e| (name, e.to_string()))
        }

        [
            failure("users", &self.users),
            failure("products", &self.catalog),
            failure("facets", &self.facets),
            failure("categories", &self.categories),
            failure("hero slides", &self.hero_slides),
            failure("contact requests", &self.contact_requests),
            failure("reports", &self.reports),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Runs all dashboard loads concurrently and waits for every one of them.
pub async fn load_dashboard(db: &DatabaseConnection) -> Dashboard {
    let (users, catalog, facets, categories, hero_slides, contact_requests, reports) = tokio::join!(
        list_users(db),
        load_catalog(db),
        list_all_facets(db),
        list_categories(db),
        list_slides(db, false),
        list_contact_requests(db),
        list_reports(db, None),
    );

    let dashboard = Dashboard {
        users,
        catalog,
        facets,
        categories,
        hero_slides,
        contact_requests,
        reports,
    };

    let failures = dashboard.failures();
    for (name, message) in &failures {
        error!("Failed to load {name}: {message}");
    }
    info!("Dashboard loaded with {} failed section(s)", failures.len());

    dashboard
}
