//! Unified error type for the admin back office.
//!
//! Expected "not found" lookups are modelled as `Option` by the calling code;
//! everything in here is a real failure that aborts the operation in progress.

use thiserror::Error;

/// Errors produced by configuration, persistence, media and image handling.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read, parsed, or contained placeholder values
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description
        message: String,
    },

    /// Input rejected before touching the database
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable description
        message: String,
    },

    /// A referenced row does not exist
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of row that was looked up (e.g. "product")
        entity: &'static str,
        /// Identifier used for the lookup
        id: String,
    },

    /// Phone numbers are unique across users
    #[error("Phone number already registered: {phone}")]
    DuplicatePhone {
        /// The normalised phone number
        phone: String,
    },

    /// Users cannot be deleted while they still own listings
    #[error("User {user_id} still owns {count} product(s)")]
    UserHasProducts {
        /// The user being deleted
        user_id: i64,
        /// Number of products still attached
        count: u64,
    },

    /// An image index outside the product's image list
    #[error("Image index {index} out of range for {len} image(s)")]
    InvalidIndex {
        /// Requested index
        index: usize,
        /// Current length of the image list
        len: usize,
    },

    /// The uploaded bytes are not a decodable image
    #[error("Could not decode image: {message}")]
    ImageDecode {
        /// Decoder message
        message: String,
    },

    /// Every encode attempt failed
    #[error("Could not encode image: {message}")]
    ImageEncode {
        /// Encoder message from the last attempt
        message: String,
    },

    /// Errors bubbled up from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem errors (config file, media store)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variables
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// JSON (de)serialisation failures
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A blocking task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Filter state could not be written as a query string
    #[error("Query string error: {0}")]
    QueryString(#[from] serde_urlencoded::ser::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for [`Error::Validation`].
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for [`Error::NotFound`] keyed by a numeric id.
    pub(crate) fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
