use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use sea_orm::DatabaseConnection;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use wardrobe_admin::{
    config::{
        database::{create_connection, create_tables},
        settings::{AppConfig, BackendCredentials, MediaSettings, load_config},
    },
    core::{
        catalog::{CatalogQuery, FacetSelector, ROW_TYPE, SortColumn, SortDirection, SortState},
        dashboard::load_dashboard,
        facet::seed_facets,
        image::optimize_image,
    },
    errors::{Error, Result},
    media::{MediaStore, upload_product_image},
};

/// Back office for the rental wardrobe marketplace
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path of the TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create tables, seed facets and check backend credentials
    Init,
    /// Re-encode an image file the way uploads are optimized
    Optimize {
        /// Source image
        input: PathBuf,
        /// Where to write the optimized JPEG
        output: PathBuf,
    },
    /// Optimize an image and attach it to a product
    Upload {
        /// Product row id
        product_id: i64,
        /// Source image
        path: PathBuf,
    },
    /// Print the filtered and sorted product table
    Products {
        /// Only products of this owner id
        #[arg(long)]
        owner: Option<i64>,
        /// Facet filter, `kind:id` or a bare id
        #[arg(long)]
        facet: Option<String>,
        /// Free-text search
        #[arg(long, short)]
        query: Option<String>,
        /// Sort column (name, type, facet, product_id, price, created)
        #[arg(long)]
        sort: Option<String>,
        /// Sort descending
        #[arg(long)]
        desc: bool,
        /// Full view state as a URL query string; overrides the other flags
        #[arg(long)]
        url: Option<String>,
    },
    /// Load every dashboard section and report what failed
    Dashboard,
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, env vars can also be set externally
    dotenv().ok();

    let cli = Cli::parse();

    // 3. Load the application configuration
    let app_config = load_config(&cli.config)
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    // 4. Connect and make sure the schema exists
    let db = create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    create_tables(&db)
        .await
        .inspect(|()| info!("Database initialized successfully."))?;

    match cli.command {
        Command::Init => init(&db, &app_config).await,
        Command::Optimize { input, output } => optimize(&app_config, &input, &output).await,
        Command::Upload { product_id, path } => {
            upload(&db, &app_config, product_id, &path).await
        }
        Command::Products {
            owner,
            facet,
            query,
            sort,
            desc,
            url,
        } => {
            let query = match url {
                Some(url) => CatalogQuery::from_query_string(&url),
                None => query_from_flags(owner, facet, query, sort.as_deref(), desc),
            };
            products(&db, &query).await
        }
        Command::Dashboard => dashboard(&db).await,
    }
}

async fn init(db: &DatabaseConnection, app_config: &AppConfig) -> Result<()> {
    let seeded = seed_facets(db, app_config).await?;
    info!("Seeded {} facet(s)", seeded);

    match BackendCredentials::from_env() {
        Ok(credentials) => info!("Backend credentials look valid for {}", credentials.url),
        Err(Error::EnvVar(e)) => warn!("Backend credentials not configured: {}", e),
        Err(e) => return Err(e),
    }
    Ok(())
}

async fn optimize(app_config: &AppConfig, input: &Path, output: &Path) -> Result<()> {
    let source = tokio::fs::read(input).await?;
    let optimized = optimize_image(&source, source.len() as u64, &app_config.images)?;
    tokio::fs::write(output, &optimized.bytes).await?;

    println!(
        "{} -> {}: {} -> {} bytes ({:.1}% smaller, quality {}, {}x{}, {} attempt(s))",
        input.display(),
        output.display(),
        source.len(),
        optimized.size(),
        optimized.reduction(source.len() as u64) * 100.0,
        optimized.chosen.quality,
        optimized.chosen.width,
        optimized.chosen.height,
        optimized.attempts.len(),
    );
    Ok(())
}

async fn upload(
    db: &DatabaseConnection,
    app_config: &AppConfig,
    product_id: i64,
    path: &Path,
) -> Result<()> {
    let store = MediaStore::from_settings(&MediaSettings::from_env());
    let source = tokio::fs::read(path).await?;
    let (product, optimized) =
        upload_product_image(db, &store, product_id, &source, &app_config.images).await?;

    let url = product.images.0.last().cloned().unwrap_or_default();
    println!(
        "Attached {} ({} bytes) to product {}, now {} image(s)",
        url,
        optimized.size(),
        product.id,
        product.images.0.len()
    );
    Ok(())
}

fn query_from_flags(
    owner: Option<i64>,
    facet: Option<String>,
    text: Option<String>,
    sort: Option<&str>,
    desc: bool,
) -> CatalogQuery {
    let mut query = CatalogQuery {
        owner,
        facet: facet.as_deref().and_then(FacetSelector::parse),
        text,
        ..CatalogQuery::default()
    };
    let column = sort.and_then(SortColumn::parse).unwrap_or_default();
    let direction = if desc {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    };
    query.sort = SortState::new(column, direction);
    query
}

async fn products(db: &DatabaseConnection, query: &CatalogQuery) -> Result<()> {
    let catalog = wardrobe_admin::core::catalog::load_catalog(db).await?;
    let rows = catalog.query(query);

    for row in &rows {
        let owner = row
            .owner
            .as_ref()
            .map_or_else(|| "-".to_string(), |o| format!("{} ({})", o.name, o.phone));
        println!(
            "{:<10} {:<8} {:<30} {:<24} {:>10}  {}",
            row.product_id_text(),
            ROW_TYPE,
            row.product.title,
            owner,
            row.product.price,
            row.tags.joined(),
        );
    }
    println!(
        "{} of {} product(s) [{}]",
        rows.len(),
        catalog.rows.len(),
        query.to_query_string()?
    );
    Ok(())
}

async fn dashboard(db: &DatabaseConnection) -> Result<()> {
    let dashboard = load_dashboard(db).await;

    fn section<T>(name: &str, result: &Result<Vec<T>>) {
        match result {
            Ok(items) => println!("{name:<18} {}", items.len()),
            Err(e) => println!("{name:<18} failed: {e}"),
        }
    }

    section("users", &dashboard.users);
    match &dashboard.catalog {
        Ok(catalog) => println!("{:<18} {}", "products", catalog.rows.len()),
        Err(e) => println!("{:<18} failed: {e}", "products"),
    }
    section("facets", &dashboard.facets);
    section("categories", &dashboard.categories);
    section("hero slides", &dashboard.hero_slides);
    section("contact requests", &dashboard.contact_requests);
    section("reports", &dashboard.reports);

    let failures = dashboard.failures();
    if !failures.is_empty() {
        warn!("{} dashboard section(s) failed to load", failures.len());
    }
    Ok(())
}
