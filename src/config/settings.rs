//! Application settings.
//!
//! Tunables and seed data come from `config.toml`; credentials and locations
//! come from the environment (optionally via `.env`). A missing config file is
//! not an error, every section has defaults.

use crate::core::image::OptimizerSettings;
use crate::entities::FacetKind;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Values that appear in sample `.env` files and must never reach a real backend.
const PLACEHOLDER_MARKERS: [&str; 6] = [
    "your-project",
    "your-anon-key",
    "example",
    "placeholder",
    "changeme",
    "xxx",
];

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Image optimizer thresholds
    pub images: OptimizerSettings,
    /// Facet values created on first start when their dimension is empty
    pub seed_facets: Vec<SeedFacet>,
}

/// A facet value to seed
#[derive(Debug, Clone, Deserialize)]
pub struct SeedFacet {
    /// Dimension of the value
    pub kind: FacetKind,
    /// Display name
    pub name: String,
    /// Hex swatch, colors only
    #[serde(default)]
    pub hex_color: Option<String>,
    /// Pickup location, cities only
    #[serde(default)]
    pub location: Option<String>,
}

/// Loads the application configuration from a TOML file
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        info!("{} not found, using default configuration", path_ref.display());
        return Ok(AppConfig::default());
    }

    debug!("Loading configuration from {}", path_ref.display());
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Endpoint and public key of the hosted backend
#[derive(Debug, Clone)]
pub struct BackendCredentials {
    /// Base URL of the backend project
    pub url: String,
    /// Public (anonymous) API key
    pub api_key: String,
}

impl BackendCredentials {
    /// Reads `BACKEND_URL` and `BACKEND_API_KEY` and validates them.
    pub fn from_env() -> Result<Self> {
        let credentials = Self {
            url: std::env::var("BACKEND_URL")?,
            api_key: std::env::var("BACKEND_API_KEY")?,
        };
        validate_backend_credentials(&credentials)?;
        Ok(credentials)
    }
}

fn looks_like_placeholder(value: &str) -> bool {
    let lowered = value.to_lowercase();
    PLACEHOLDER_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}

/// Rejects empty, non-http(s) or sample values before any sign-in attempt.
pub fn validate_backend_credentials(credentials: &BackendCredentials) -> Result<()> {
    let url = credentials.url.trim();
    let key = credentials.api_key.trim();

    if url.is_empty() || key.is_empty() {
        return Err(Error::Config {
            message: "Backend URL and API key must both be set".to_string(),
        });
    }
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(Error::Config {
            message: format!("Backend URL must start with http:// or https://, got {url}"),
        });
    }
    if looks_like_placeholder(url) || looks_like_placeholder(key) {
        return Err(Error::Config {
            message: "Backend credentials still contain placeholder values".to_string(),
        });
    }
    Ok(())
}

/// Where optimized uploads are written and how they are addressed publicly
#[derive(Debug, Clone)]
pub struct MediaSettings {
    /// Directory objects are written under
    pub root: PathBuf,
    /// URL prefix that serves `root`
    pub public_base_url: String,
}

impl MediaSettings {
    /// Reads `MEDIA_ROOT` and `MEDIA_PUBLIC_URL`, falling back to local defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            root: std::env::var("MEDIA_ROOT")
                .map_or_else(|_| PathBuf::from("media"), PathBuf::from),
            public_base_url: std::env::var("MEDIA_PUBLIC_URL")
                .unwrap_or_else(|_| "http://localhost:8080/media".to_string()),
        }
    }
}
