//! Facet business logic - Product tagging across five dimensions.
//!
//! Products are tagged with product types, occasions, colors, materials and
//! cities through the `product_facets` association table. This module owns:
//!
//! * the in-memory aggregation that turns association rows back into per-product
//!   tag lists ([`aggregate_facets`]),
//! * namespaced facet references ([`FacetRef`]) so an id is never looked up in
//!   the wrong dimension,
//! * facet CRUD and display-order management for the admin tables.

use crate::{
    config::settings::AppConfig,
    entities::{Facet, FacetKind, ProductFacet, facet, product_facet},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use std::{collections::HashMap, fmt, str::FromStr};
use tracing::{debug, info};

/// A facet value addressed by dimension and id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FacetRef {
    /// Dimension the id lives in
    pub kind: FacetKind,
    /// Row id in the facets table
    pub id: i64,
}

impl FacetRef {
    /// Builds a reference.
    #[must_use]
    pub const fn new(kind: FacetKind, id: i64) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for FacetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

impl FromStr for FacetRef {
    type Err = Error;

    /// Parses the `kind:id` form produced by `Display`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::validation(format!("Invalid facet reference: {s}"));
        let (kind, id) = s.split_once(':').ok_or_else(invalid)?;
        let kind = FacetKind::parse(kind).ok_or_else(invalid)?;
        let id = id.trim().parse().map_err(|_| invalid())?;
        Ok(Self { kind, id })
    }
}

/// Per-product tag names, one list per dimension.
///
/// Lists keep the order in which association rows were read and never hold
/// the same name twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetTags {
    types: Vec<String>,
    occasions: Vec<String>,
    colors: Vec<String>,
    materials: Vec<String>,
    cities: Vec<String>,
}

impl FacetTags {
    /// Names in one dimension.
    #[must_use]
    pub fn get(&self, kind: FacetKind) -> &[String] {
        match kind {
            FacetKind::Type => &self.types,
            FacetKind::Occasion => &self.occasions,
            FacetKind::Color => &self.colors,
            FacetKind::Material => &self.materials,
            FacetKind::City => &self.cities,
        }
    }

    const fn get_mut(&mut self, kind: FacetKind) -> &mut Vec<String> {
        match kind {
            FacetKind::Type => &mut self.types,
            FacetKind::Occasion => &mut self.occasions,
            FacetKind::Color => &mut self.colors,
            FacetKind::Material => &mut self.materials,
            FacetKind::City => &mut self.cities,
        }
    }

    /// Adds `name` to a dimension; returns false if it was already present.
    pub fn insert(&mut self, kind: FacetKind, name: &str) -> bool {
        let names = self.get_mut(kind);
        if names.iter().any(|existing| existing == name) {
            return false;
        }
        names.push(name.to_string());
        true
    }

    /// Whether a dimension holds `name`.
    #[must_use]
    pub fn contains(&self, kind: FacetKind, name: &str) -> bool {
        self.get(kind).iter().any(|existing| existing == name)
    }

    /// Every name across all dimensions, in dimension order, joined with ", ".
    #[must_use]
    pub fn joined(&self) -> String {
        FacetKind::ALL
            .iter()
            .flat_map(|kind| self.get(*kind))
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// True when no dimension has any tag.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        FacetKind::ALL.iter().all(|kind| self.get(*kind).is_empty())
    }
}

/// Id to display-name tables for all five dimensions.
#[derive(Debug, Clone, Default)]
pub struct FacetLookup {
    names: HashMap<FacetKind, HashMap<i64, String>>,
}

impl FacetLookup {
    /// Builds the lookup from facet rows.
    #[must_use]
    pub fn from_facets(facets: &[facet::Model]) -> Self {
        let mut lookup = Self::default();
        for facet in facets {
            lookup.insert(facet.kind, facet.id, facet.name.clone());
        }
        lookup
    }

    /// Registers one name.
    pub fn insert(&mut self, kind: FacetKind, id: i64, name: impl Into<String>) {
        self.names.entry(kind).or_default().insert(id, name.into());
    }

    /// Name of `id` within `kind`.
    #[must_use]
    pub fn name(&self, kind: FacetKind, id: i64) -> Option<&str> {
        self.names
            .get(&kind)
            .and_then(|table| table.get(&id))
            .map(String::as_str)
    }

    /// Name behind a namespaced reference.
    #[must_use]
    pub fn resolve(&self, facet: FacetRef) -> Option<&str> {
        self.name(facet.kind, facet.id)
    }

    /// Resolves an id that carries no dimension by probing type, occasion,
    /// color, material and city in that order. The first hit wins.
    #[must_use]
    pub fn resolve_bare(&self, id: i64) -> Option<FacetRef> {
        FacetKind::ALL
            .into_iter()
            .find(|kind| self.name(*kind, id).is_some())
            .map(|kind| FacetRef::new(kind, id))
    }
}

/// One association row, product to facet value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Association {
    /// Tagged product
    pub product_id: i64,
    /// Facet value id within the dimension
    pub facet_id: i64,
}

/// Association rows split by dimension.
#[derive(Debug, Clone, Default)]
pub struct FacetAssociations {
    rows: HashMap<FacetKind, Vec<Association>>,
}

impl FacetAssociations {
    /// Partitions association rows by dimension, keeping their order.
    #[must_use]
    pub fn from_rows(rows: &[product_facet::Model]) -> Self {
        let mut associations = Self::default();
        for row in rows {
            associations.push(row.kind, row.product_id, row.facet_id);
        }
        associations
    }

    /// Appends one row to a dimension.
    pub fn push(&mut self, kind: FacetKind, product_id: i64, facet_id: i64) {
        self.rows.entry(kind).or_default().push(Association {
            product_id,
            facet_id,
        });
    }

    /// Rows of one dimension.
    #[must_use]
    pub fn rows(&self, kind: FacetKind) -> &[Association] {
        self.rows.get(&kind).map_or(&[], Vec::as_slice)
    }
}

/// Rebuilds the tag lists of `product_ids` from association rows.
///
/// Every requested product gets an entry, with an empty list for each
/// dimension it has no rows in. Rows for other products are ignored and
/// rows whose facet id does not resolve to a name are dropped.
#[must_use]
pub fn aggregate_facets(
    product_ids: &[i64],
    associations: &FacetAssociations,
    lookup: &FacetLookup,
) -> HashMap<i64, FacetTags> {
    let mut tags: HashMap<i64, FacetTags> = product_ids
        .iter()
        .map(|id| (*id, FacetTags::default()))
        .collect();

    for kind in FacetKind::ALL {
        for association in associations.rows(kind) {
            let Some(entry) = tags.get_mut(&association.product_id) else {
                continue;
            };
            match lookup.name(kind, association.facet_id) {
                Some(name) => {
                    entry.insert(kind, name);
                }
                None => debug!(
                    "Dropping dangling {kind} association {} -> {}",
                    association.product_id, association.facet_id
                ),
            }
        }
    }

    tags
}

/// Reads every facet value and builds the id to name lookup.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn load_facet_lookup(db: &DatabaseConnection) -> Result<FacetLookup> {
    let facets = list_all_facets(db).await?;
    Ok(FacetLookup::from_facets(&facets))
}

/// Reads the association rows of `product_ids`, in insertion order.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn load_associations(
    db: &DatabaseConnection,
    product_ids: &[i64],
) -> Result<FacetAssociations> {
    let rows = ProductFacet::find()
        .filter(product_facet::Column::ProductId.is_in(product_ids.iter().copied()))
        .order_by_asc(product_facet::Column::Id)
        .all(db)
        .await?;
    Ok(FacetAssociations::from_rows(&rows))
}

/// Loads associations and names for `product_ids` and aggregates them.
///
/// # Errors
/// Returns an error if either the facets or the association rows cannot be read.
pub async fn load_facet_tags(
    db: &DatabaseConnection,
    product_ids: &[i64],
) -> Result<HashMap<i64, FacetTags>> {
    let lookup = load_facet_lookup(db).await?;
    let associations = load_associations(db, product_ids).await?;
    Ok(aggregate_facets(product_ids, &associations, &lookup))
}

/// Editable attributes of a facet value
#[derive(Debug, Clone, Default)]
pub struct FacetDetails {
    /// Display name
    pub name: String,
    /// Optional illustration
    pub image_url: Option<String>,
    /// Hex swatch, colors only
    pub hex_color: Option<String>,
    /// Pickup location, cities only
    pub location: Option<String>,
}

impl FacetDetails {
    /// Details with only a name set.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

fn is_hex_color(value: &str) -> bool {
    value.strip_prefix('#').is_some_and(|digits| {
        matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
    })
}

fn validate_details(details: &FacetDetails) -> Result<String> {
    let name = details.name.trim();
    if name.is_empty() {
        return Err(Error::validation("Facet name cannot be empty"));
    }
    if let Some(hex) = details.hex_color.as_deref() {
        if !is_hex_color(hex) {
            return Err(Error::validation(format!("Invalid hex color: {hex}")));
        }
    }
    Ok(name.to_string())
}

async fn ensure_unique_name(
    db: &DatabaseConnection,
    kind: FacetKind,
    name: &str,
    exclude_id: Option<i64>,
) -> Result<()> {
    let clash = list_facets(db, kind)
        .await?
        .into_iter()
        .any(|f| Some(f.id) != exclude_id && f.name.eq_ignore_ascii_case(name));
    if clash {
        return Err(Error::validation(format!("A {kind} named '{name}' already exists")));
    }
    Ok(())
}

/// Lists one dimension in display order.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_facets(db: &DatabaseConnection, kind: FacetKind) -> Result<Vec<facet::Model>> {
    Facet::find()
        .filter(facet::Column::Kind.eq(kind))
        .order_by_asc(facet::Column::DisplayOrder)
        .order_by_asc(facet::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists every facet value, grouped by dimension and in display order.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_all_facets(db: &DatabaseConnection) -> Result<Vec<facet::Model>> {
    Facet::find()
        .order_by_asc(facet::Column::Kind)
        .order_by_asc(facet::Column::DisplayOrder)
        .order_by_asc(facet::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a facet value by id.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_facet_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<facet::Model>> {
    Facet::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Creates a facet value at the end of its dimension's display order.
///
/// # Errors
/// Returns an error if the name is empty or already used in the dimension,
/// if the hex color is malformed, or if the insert fails.
pub async fn create_facet(
    db: &DatabaseConnection,
    kind: FacetKind,
    details: FacetDetails,
) -> Result<facet::Model> {
    let name = validate_details(&details)?;
    ensure_unique_name(db, kind, &name, None).await?;

    let next_order = Facet::find()
        .filter(facet::Column::Kind.eq(kind))
        .order_by_desc(facet::Column::DisplayOrder)
        .one(db)
        .await?
        .map_or(0, |last| last.display_order + 1);

    let facet = facet::ActiveModel {
        kind: Set(kind),
        name: Set(name),
        image_url: Set(details.image_url),
        hex_color: Set(details.hex_color),
        location: Set(details.location),
        display_order: Set(next_order),
        ..Default::default()
    };
    let created = facet.insert(db).await?;
    info!("Created {} '{}' (id {})", created.kind, created.name, created.id);
    Ok(created)
}

/// Replaces the editable attributes of a facet value.
///
/// # Errors
/// Returns an error if the facet does not exist, the new name is empty or taken
/// within its dimension, the hex color is malformed, or the update fails.
pub async fn update_facet(
    db: &DatabaseConnection,
    id: i64,
    details: FacetDetails,
) -> Result<facet::Model> {
    let name = validate_details(&details)?;
    let existing = get_facet_by_id(db, id)
        .await?
        .ok_or_else(|| Error::not_found("facet", id))?;
    ensure_unique_name(db, existing.kind, &name, Some(id)).await?;

    let mut facet: facet::ActiveModel = existing.into();
    facet.name = Set(name);
    facet.image_url = Set(details.image_url);
    facet.hex_color = Set(details.hex_color);
    facet.location = Set(details.location);

    facet.update(db).await.map_err(Into::into)
}

/// Deletes a facet value together with every association pointing at it.
///
/// # Errors
/// Returns an error if the facet does not exist or the transaction fails; in that
/// case neither the facet nor its associations are removed.
pub async fn delete_facet(db: &DatabaseConnection, id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let removed = ProductFacet::delete_many()
        .filter(product_facet::Column::FacetId.eq(id))
        .exec(&txn)
        .await?;
    let deleted = Facet::delete_by_id(id).exec(&txn).await?;
    if deleted.rows_affected == 0 {
        return Err(Error::not_found("facet", id));
    }

    txn.commit().await?;
    info!(
        "Deleted facet {id} and {} product association(s)",
        removed.rows_affected
    );
    Ok(())
}

/// Rewrites a dimension's display order to match `ordered_ids`.
///
/// `ordered_ids` must list every value of the dimension exactly once, as a
/// drag-and-drop reorder of the whole list produces.
///
/// # Errors
/// Returns an error if `ordered_ids` is not a permutation of the dimension's
/// ids or the transaction fails.
pub async fn reorder_facets(
    db: &DatabaseConnection,
    kind: FacetKind,
    ordered_ids: &[i64],
) -> Result<Vec<facet::Model>> {
    let mut current: Vec<i64> = list_facets(db, kind).await?.iter().map(|f| f.id).collect();
    let mut requested = ordered_ids.to_vec();
    current.sort_unstable();
    requested.sort_unstable();
    if current != requested {
        return Err(Error::validation(format!(
            "Reorder must list every {kind} exactly once"
        )));
    }

    let txn = db.begin().await?;
    for (position, id) in ordered_ids.iter().enumerate() {
        let position = i32::try_from(position)
            .map_err(|_| Error::validation("Too many facet values to reorder"))?;
        Facet::update_many()
            .col_expr(facet::Column::DisplayOrder, Expr::value(position))
            .filter(facet::Column::Id.eq(*id))
            .exec(&txn)
            .await?;
    }
    txn.commit().await?;

    list_facets(db, kind).await
}

/// Creates the configured seed values that are not present yet.
///
/// Returns the number of values created.
///
/// # Errors
/// Returns an error if a seed value fails validation or cannot be inserted.
pub async fn seed_facets(db: &DatabaseConnection, config: &AppConfig) -> Result<usize> {
    let mut created = 0;
    for seed in &config.seed_facets {
        let exists = list_facets(db, seed.kind)
            .await?
            .iter()
            .any(|f| f.name.eq_ignore_ascii_case(seed.name.trim()));
        if exists {
            continue;
        }
        create_facet(
            db,
            seed.kind,
            FacetDetails {
                name: seed.name.clone(),
                image_url: None,
                hex_color: seed.hex_color.clone(),
                location: seed.location.clone(),
            },
        )
        .await?;
        created += 1;
    }
    if created > 0 {
        info!("Seeded {created} facet value(s)");
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::settings::SeedFacet;
    use crate::test_utils::*;

    fn lookup() -> FacetLookup {
        let mut lookup = FacetLookup::default();
        lookup.insert(FacetKind::Type, 1, "Saree");
        lookup.insert(FacetKind::Type, 2, "Lehenga");
        lookup.insert(FacetKind::Occasion, 10, "Wedding");
        lookup.insert(FacetKind::Color, 20, "Red");
        lookup.insert(FacetKind::Color, 21, "Gold");
        lookup.insert(FacetKind::City, 40, "Jaipur");
        lookup
    }

    #[test]
    fn test_aggregate_groups_by_dimension() {
        let mut associations = FacetAssociations::default();
        associations.push(FacetKind::Type, 100, 1);
        associations.push(FacetKind::Color, 100, 21);
        associations.push(FacetKind::Color, 100, 20);
        associations.push(FacetKind::Occasion, 101, 10);

        let tags = aggregate_facets(&[100, 101], &associations, &lookup());

        assert_eq!(tags[&100].get(FacetKind::Type), ["Saree"]);
        // association order is kept
        assert_eq!(tags[&100].get(FacetKind::Color), ["Gold", "Red"]);
        assert_eq!(tags[&101].get(FacetKind::Occasion), ["Wedding"]);
    }

    #[test]
    fn test_aggregate_yields_empty_lists_not_missing_entries() {
        let tags = aggregate_facets(&[7], &FacetAssociations::default(), &lookup());

        let entry = tags.get(&7).unwrap();
        assert!(entry.is_empty());
        for kind in FacetKind::ALL {
            assert!(entry.get(kind).is_empty());
        }
    }

    #[test]
    fn test_aggregate_drops_dangling_and_unrequested_rows() {
        let mut associations = FacetAssociations::default();
        associations.push(FacetKind::Material, 100, 999);
        associations.push(FacetKind::Type, 100, 2);
        associations.push(FacetKind::Type, 555, 1);

        let tags = aggregate_facets(&[100], &associations, &lookup());

        assert_eq!(tags.len(), 1);
        assert!(tags[&100].get(FacetKind::Material).is_empty());
        assert_eq!(tags[&100].get(FacetKind::Type), ["Lehenga"]);
    }

    #[test]
    fn test_aggregate_deduplicates_names() {
        let mut associations = FacetAssociations::default();
        associations.push(FacetKind::City, 100, 40);
        associations.push(FacetKind::City, 100, 40);

        let tags = aggregate_facets(&[100], &associations, &lookup());

        assert_eq!(tags[&100].get(FacetKind::City), ["Jaipur"]);
    }

    #[test]
    fn test_joined_follows_dimension_order() {
        let mut tags = FacetTags::default();
        tags.insert(FacetKind::City, "Jaipur");
        tags.insert(FacetKind::Type, "Saree");
        tags.insert(FacetKind::Color, "Red");
        assert_eq!(tags.joined(), "Saree, Red, Jaipur");
    }

    #[test]
    fn test_resolve_bare_uses_priority_order() {
        let mut lookup = lookup();
        // id 10 exists as both an occasion and a material
        lookup.insert(FacetKind::Material, 10, "Silk");

        assert_eq!(
            lookup.resolve_bare(10),
            Some(FacetRef::new(FacetKind::Occasion, 10))
        );
        assert_eq!(lookup.resolve_bare(12345), None);
        assert_eq!(
            lookup.resolve(FacetRef::new(FacetKind::Material, 10)),
            Some("Silk")
        );
    }

    #[test]
    fn test_facet_ref_parse_and_display() {
        let parsed: FacetRef = "color:21".parse().unwrap();
        assert_eq!(parsed, FacetRef::new(FacetKind::Color, 21));
        assert_eq!(parsed.to_string(), "color:21");
        assert!("color".parse::<FacetRef>().is_err());
        assert!("shade:1".parse::<FacetRef>().is_err());
        assert!("color:abc".parse::<FacetRef>().is_err());
    }

    #[tokio::test]
    async fn test_create_facet_appends_to_display_order() -> Result<()> {
        let db = setup_test_db().await?;

        let first = create_facet(&db, FacetKind::Occasion, FacetDetails::named("Wedding")).await?;
        let second = create_facet(&db, FacetKind::Occasion, FacetDetails::named("Party")).await?;
        let other = create_facet(&db, FacetKind::Material, FacetDetails::named("Silk")).await?;

        assert_eq!(first.display_order, 0);
        assert_eq!(second.display_order, 1);
        // display order is per dimension
        assert_eq!(other.display_order, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_facet_validation() -> Result<()> {
        let db = setup_test_db().await?;
        create_facet(&db, FacetKind::Color, FacetDetails::named("Red")).await?;

        let empty = create_facet(&db, FacetKind::Color, FacetDetails::named("  ")).await;
        assert!(matches!(empty, Err(Error::Validation { .. })));

        let duplicate = create_facet(&db, FacetKind::Color, FacetDetails::named("red")).await;
        assert!(matches!(duplicate, Err(Error::Validation { .. })));

        let bad_hex = create_facet(
            &db,
            FacetKind::Color,
            FacetDetails {
                hex_color: Some("#zzz".to_string()),
                ..FacetDetails::named("Teal")
            },
        )
        .await;
        assert!(matches!(bad_hex, Err(Error::Validation { .. })));

        // the same name in another dimension is fine
        create_facet(&db, FacetKind::Type, FacetDetails::named("Red")).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_update_facet() -> Result<()> {
        let db = setup_test_db().await?;
        let city = create_facet(&db, FacetKind::City, FacetDetails::named("Jaipr")).await?;

        let updated = update_facet(
            &db,
            city.id,
            FacetDetails {
                location: Some("MI Road".to_string()),
                ..FacetDetails::named("Jaipur")
            },
        )
        .await?;

        assert_eq!(updated.name, "Jaipur");
        assert_eq!(updated.location.as_deref(), Some("MI Road"));
        assert_eq!(updated.display_order, city.display_order);

        let missing = update_facet(&db, 999, FacetDetails::named("Nowhere")).await;
        assert!(matches!(missing, Err(Error::NotFound { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_reorder_facets() -> Result<()> {
        let db = setup_test_db().await?;
        let a = create_facet(&db, FacetKind::Type, FacetDetails::named("Saree")).await?;
        let b = create_facet(&db, FacetKind::Type, FacetDetails::named("Lehenga")).await?;
        let c = create_facet(&db, FacetKind::Type, FacetDetails::named("Sherwani")).await?;

        let reordered = reorder_facets(&db, FacetKind::Type, &[c.id, a.id, b.id]).await?;

        let ids: Vec<i64> = reordered.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![c.id, a.id, b.id]);
        let orders: Vec<i32> = reordered.iter().map(|f| f.display_order).collect();
        assert_eq!(orders, vec![0, 1, 2]);

        let partial = reorder_facets(&db, FacetKind::Type, &[c.id, a.id]).await;
        assert!(matches!(partial, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_facet_removes_associations() -> Result<()> {
        let (db, _owner, product) = setup_with_product().await?;
        let red = create_facet(&db, FacetKind::Color, FacetDetails::named("Red")).await?;
        let gold = create_facet(&db, FacetKind::Color, FacetDetails::named("Gold")).await?;
        crate::core::product::set_product_facets(
            &db,
            product.id,
            FacetKind::Color,
            &[red.id, gold.id],
        )
        .await?;

        delete_facet(&db, red.id).await?;

        let tags = load_facet_tags(&db, &[product.id]).await?;
        assert_eq!(tags[&product.id].get(FacetKind::Color), ["Gold"]);
        let remaining = ProductFacet::find().all(&db).await?;
        assert_eq!(remaining.len(), 1);

        assert!(matches!(
            delete_facet(&db, red.id).await,
            Err(Error::NotFound { .. })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_facets_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let config = AppConfig {
            seed_facets: vec![
                SeedFacet {
                    kind: FacetKind::Color,
                    name: "Maroon".to_string(),
                    hex_color: Some("#800000".to_string()),
                    location: None,
                },
                SeedFacet {
                    kind: FacetKind::City,
                    name: "Udaipur".to_string(),
                    hex_color: None,
                    location: Some("Lake Palace Rd".to_string()),
                },
            ],
            ..AppConfig::default()
        };

        assert_eq!(seed_facets(&db, &config).await?, 2);
        assert_eq!(seed_facets(&db, &config).await?, 0);
        assert_eq!(list_all_facets(&db).await?.len(), 2);

        Ok(())
    }
}
