//! Catalog view - Filtering and sorting of the admin product table.
//!
//! The product table is narrowed and ordered entirely in memory from a
//! [`CatalogQuery`] each time the view state changes. Filters are
//! conjunctive; sorting is stable. Nothing in here mutates its input.
//!
//! The query also round-trips through URL query parameters so the current
//! view can be bookmarked or shared.

use crate::{
    core::facet::{
        FacetLookup, FacetRef, FacetTags, aggregate_facets, load_associations, load_facet_lookup,
    },
    entities::{Product, User, product, user},
    errors::Result,
};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use serde::Serialize;
use std::{cmp::Ordering, collections::HashMap};

/// Literal shown in the type column; every row is a product today.
pub const ROW_TYPE: &str = "Product";

/// One row of the admin product table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRow {
    /// The listing
    pub product: product::Model,
    /// Its owner, if the owner row still exists
    pub owner: Option<user::Model>,
    /// Aggregated facet tags
    pub tags: FacetTags,
}

impl CatalogRow {
    /// Product code, or the row id when no code was assigned.
    #[must_use]
    pub fn product_id_text(&self) -> String {
        self.product
            .code
            .clone()
            .unwrap_or_else(|| self.product.id.to_string())
    }

    fn owner_name(&self) -> &str {
        self.owner.as_ref().map_or("", |o| o.name.as_str())
    }

    fn owner_phone(&self) -> &str {
        self.owner.as_ref().map_or("", |o| o.phone.as_str())
    }

    /// Numeric price: everything but digits and dots is stripped, 0 if unparsable.
    #[must_use]
    pub fn price_value(&self) -> f64 {
        parse_price(&self.product.price)
    }

    fn created_value(&self) -> i64 {
        self.product
            .created_at
            .map_or(0, |created| created.timestamp_millis())
    }
}

/// Strips every character except ASCII digits and `.` and parses the rest.
///
/// Dots before the first digit belong to a currency prefix such as `Rs.`
/// and are dropped, so `"Rs. 1,299.50"` reads as 1299.5.
#[must_use]
pub fn parse_price(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.trim_start_matches('.').parse().unwrap_or(0.0)
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Facet filter value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetSelector {
    /// A namespaced reference
    Ref(FacetRef),
    /// An id without dimension, resolved type -> occasion -> color -> material -> city
    Bare(i64),
}

impl FacetSelector {
    /// Parses `kind:id` or a bare id; blank and `all` mean no filter.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            return None;
        }
        if value.contains(':') {
            return value.parse().ok().map(Self::Ref);
        }
        value.parse().ok().map(Self::Bare)
    }

    fn to_param(self) -> String {
        match self {
            Self::Ref(facet) => facet.to_string(),
            Self::Bare(id) => id.to_string(),
        }
    }
}

/// Per-column substring filters; `None` or blank means unfiltered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnFilters {
    /// Product title
    pub name: Option<String>,
    /// Owner name or phone
    pub owner: Option<String>,
    /// Joined facet names
    pub facet: Option<String>,
    /// Product code or raw row id
    pub product_id: Option<String>,
    /// Price as entered
    pub price: Option<String>,
}

/// Sortable columns of the product table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    /// Title, case-folded
    Name,
    /// Row type literal
    Type,
    /// Joined facet names
    Facet,
    /// Product code or id, as text
    ProductId,
    /// Numeric price
    Price,
    /// Creation time
    #[default]
    Created,
}

impl SortColumn {
    const ALL: [Self; 6] = [
        Self::Name,
        Self::Type,
        Self::Facet,
        Self::ProductId,
        Self::Price,
        Self::Created,
    ];

    /// Parameter value used in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Type => "type",
            Self::Facet => "facet",
            Self::ProductId => "product_id",
            Self::Price => "price",
            Self::Created => "created",
        }
    }

    /// Parses [`SortColumn::as_str`] output.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value.trim())
    }

    fn compare(self, a: &CatalogRow, b: &CatalogRow) -> Ordering {
        match self {
            Self::Name => a
                .product
                .title
                .to_lowercase()
                .cmp(&b.product.title.to_lowercase()),
            Self::Type => Ordering::Equal,
            Self::Facet => a.tags.joined().cmp(&b.tags.joined()),
            Self::ProductId => a.product_id_text().cmp(&b.product_id_text()),
            Self::Price => a.price_value().total_cmp(&b.price_value()),
            Self::Created => a.created_value().cmp(&b.created_value()),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Smallest first
    #[default]
    Asc,
    /// Largest first
    Desc,
}

impl SortDirection {
    /// The other direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Current sort column and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    /// Column rows are ordered by
    pub column: SortColumn,
    /// Direction of the ordering
    pub direction: SortDirection,
}

impl SortState {
    /// Sorting by `column` in `direction`.
    #[must_use]
    pub const fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    /// Header click: the same column flips direction, a new column starts ascending.
    pub fn select(&mut self, column: SortColumn) {
        if self.column == column {
            self.direction = self.direction.flipped();
        } else {
            self.column = column;
            self.direction = SortDirection::Asc;
        }
    }
}

/// Complete filter and sort state of the product table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Only products of this owner; `None` for all owners
    pub owner: Option<i64>,
    /// Only products tagged with this facet value; `None` for all
    pub facet: Option<FacetSelector>,
    /// Free-text search over name, id, tags and owner
    pub text: Option<String>,
    /// Per-column filters
    pub columns: ColumnFilters,
    /// Ordering
    pub sort: SortState,
}

/// Query string form of [`CatalogQuery`]
#[derive(Debug, Default, Serialize)]
struct QueryParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    facet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    f_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    f_owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    f_facet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    f_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    f_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dir: Option<String>,
}

impl QueryParams {
    /// Collects parameters key by key; a repeated key keeps its last value
    /// and unknown keys are ignored.
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "owner" => &mut params.owner,
                "facet" => &mut params.facet,
                "q" => &mut params.q,
                "f_name" => &mut params.f_name,
                "f_owner" => &mut params.f_owner,
                "f_facet" => &mut params.f_facet,
                "f_id" => &mut params.f_id,
                "f_price" => &mut params.f_price,
                "sort" => &mut params.sort,
                "dir" => &mut params.dir,
                _ => continue,
            };
            *slot = Some(value);
        }
        params
    }
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl CatalogQuery {
    /// Serialises the non-default parts of the query as URL parameters.
    ///
    /// # Errors
    /// Returns an error if the parameters cannot be encoded.
    pub fn to_query_string(&self) -> Result<String> {
        let params = QueryParams {
            owner: self.owner.map(|id| id.to_string()),
            facet: self.facet.map(FacetSelector::to_param),
            q: non_blank(self.text.as_ref()),
            f_name: non_blank(self.columns.name.as_ref()),
            f_owner: non_blank(self.columns.owner.as_ref()),
            f_facet: non_blank(self.columns.facet.as_ref()),
            f_id: non_blank(self.columns.product_id.as_ref()),
            f_price: non_blank(self.columns.price.as_ref()),
            sort: (self.sort != SortState::default())
                .then(|| self.sort.column.as_str().to_string()),
            dir: (self.sort != SortState::default()).then(|| {
                match self.sort.direction {
                    SortDirection::Asc => "asc",
                    SortDirection::Desc => "desc",
                }
                .to_string()
            }),
        };
        Ok(serde_urlencoded::to_string(params)?)
    }

    /// Rebuilds a query from URL parameters. Unknown or malformed values fall
    /// back to "all" and the default ordering instead of failing.
    #[must_use]
    pub fn from_query_string(query: &str) -> Self {
        let pairs: Vec<(String, String)> =
            serde_urlencoded::from_str(query.trim_start_matches('?')).unwrap_or_default();
        let params = QueryParams::from_pairs(pairs);

        let column = params.sort.as_deref().and_then(SortColumn::parse);
        let direction = match params.dir.as_deref() {
            Some("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        };

        Self {
            owner: params.owner.as_deref().and_then(|o| o.trim().parse().ok()),
            facet: params.facet.as_deref().and_then(FacetSelector::parse),
            text: non_blank(params.q.as_ref()),
            columns: ColumnFilters {
                name: non_blank(params.f_name.as_ref()),
                owner: non_blank(params.f_owner.as_ref()),
                facet: non_blank(params.f_facet.as_ref()),
                product_id: non_blank(params.f_id.as_ref()),
                price: non_blank(params.f_price.as_ref()),
            },
            sort: column.map_or_else(SortState::default, |column| {
                SortState::new(column, direction)
            }),
        }
    }

    /// Whether `row` passes every filter of this query.
    #[must_use]
    pub fn matches(&self, row: &CatalogRow, lookup: &FacetLookup) -> bool {
        self.matches_owner(row)
            && self.matches_facet(row, lookup)
            && self.matches_text(row)
            && self.matches_columns(row)
    }

    fn matches_owner(&self, row: &CatalogRow) -> bool {
        self.owner.is_none_or(|owner| row.product.owner_id == owner)
    }

    fn matches_facet(&self, row: &CatalogRow, lookup: &FacetLookup) -> bool {
        let Some(selector) = self.facet else {
            return true;
        };
        let facet = match selector {
            FacetSelector::Ref(facet) => Some(facet),
            FacetSelector::Bare(id) => lookup.resolve_bare(id),
        };
        facet
            .and_then(|facet| lookup.resolve(facet).map(|name| (facet.kind, name)))
            .is_some_and(|(kind, name)| row.tags.contains(kind, name))
    }

    fn matches_text(&self, row: &CatalogRow) -> bool {
        let Some(text) = non_blank(self.text.as_ref()) else {
            return true;
        };
        let needle = text.to_lowercase();
        contains_folded(&row.product.title, &needle)
            || contains_folded(&row.product_id_text(), &needle)
            || row.product.id.to_string().contains(&needle)
            || contains_folded(&row.tags.joined(), &needle)
            || contains_folded(row.owner_name(), &needle)
            || contains_folded(row.owner_phone(), &needle)
    }

    fn matches_columns(&self, row: &CatalogRow) -> bool {
        let columns = &self.columns;
        column_matches(columns.name.as_ref(), |n| {
            contains_folded(&row.product.title, n)
        }) && column_matches(columns.owner.as_ref(), |n| {
            contains_folded(row.owner_name(), n) || contains_folded(row.owner_phone(), n)
        }) && column_matches(columns.facet.as_ref(), |n| {
            contains_folded(&row.tags.joined(), n)
        }) && column_matches(columns.product_id.as_ref(), |n| {
            contains_folded(&row.product_id_text(), n) || row.product.id.to_string().contains(n)
        }) && column_matches(columns.price.as_ref(), |n| {
            contains_folded(&row.product.price, n)
        })
    }
}

fn column_matches(filter: Option<&String>, check: impl Fn(&str) -> bool) -> bool {
    non_blank(filter).is_none_or(|value| check(&value.to_lowercase()))
}

/// Keeps the rows that pass every filter of `query`, in their input order.
pub fn filter_rows<'a, I>(
    rows: I,
    query: &CatalogQuery,
    lookup: &FacetLookup,
) -> Vec<&'a CatalogRow>
where
    I: IntoIterator<Item = &'a CatalogRow>,
{
    rows.into_iter()
        .filter(|row| query.matches(row, lookup))
        .collect()
}

/// Stable sort of `rows` by `sort`.
pub fn sort_rows(rows: &mut [&CatalogRow], sort: SortState) {
    rows.sort_by(|a, b| {
        let ordering = sort.column.compare(a, b);
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Filters then sorts, the full pipeline behind the product table.
pub fn apply_query<'a, I>(
    rows: I,
    query: &CatalogQuery,
    lookup: &FacetLookup,
) -> Vec<&'a CatalogRow>
where
    I: IntoIterator<Item = &'a CatalogRow>,
{
    let mut filtered = filter_rows(rows, query, lookup);
    sort_rows(&mut filtered, query.sort);
    filtered
}

/// Everything the product table needs, read in one go
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// One row per product, newest first
    pub rows: Vec<CatalogRow>,
    /// Facet names for the facet filter and selector
    pub lookup: FacetLookup,
}

impl Catalog {
    /// Runs `query` over the loaded rows.
    #[must_use]
    pub fn query(&self, query: &CatalogQuery) -> Vec<&CatalogRow> {
        apply_query(&self.rows, query, &self.lookup)
    }
}

/// Joins products with their owners and aggregated facet tags.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn load_catalog(db: &DatabaseConnection) -> Result<Catalog> {
    let products = crate::core::product::list_products(db).await?;
    let owners: HashMap<i64, user::Model> = User::find()
        .order_by_asc(user::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
    let lookup = load_facet_lookup(db).await?;
    let associations = load_associations(db, &ids).await?;
    let mut tags = aggregate_facets(&ids, &associations, &lookup);

    let rows = products
        .into_iter()
        .map(|product| CatalogRow {
            owner: owners.get(&product.owner_id).cloned(),
            tags: tags.remove(&product.id).unwrap_or_default(),
            product,
        })
        .collect();

    Ok(Catalog { rows, lookup })
}

/// Counts products per owner, for the owner filter drop-down.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn product_counts_by_owner(db: &DatabaseConnection) -> Result<HashMap<i64, usize>> {
    let mut counts = HashMap::new();
    for product in Product::find().all(db).await? {
        *counts.entry(product.owner_id).or_insert(0) += 1;
    }
    Ok(counts)
}
