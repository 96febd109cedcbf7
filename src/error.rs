/// Error types for catalog-view
///
/// Every fallible operation in the crate returns `CatalogError`. Join-time
/// integrity faults are startup fatal: callers are expected to propagate them
/// rather than render a partial catalog.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, CatalogError>;

/// A broken foreign-key-like reference between the raw record sets
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityFault {
    #[error("product {product_id} references missing category {category_id}")]
    MissingCategory { product_id: i64, category_id: i64 },

    #[error("category {category_id} references missing owner {owner_id}")]
    MissingOwner { category_id: i64, owner_id: i64 },

    #[error("product id {0} appears more than once")]
    DuplicateProduct(i64),

    #[error("category id {0} appears more than once")]
    DuplicateCategory(i64),

    #[error("owner id {0} appears more than once")]
    DuplicateOwner(i64),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("referential integrity violated: {0}")]
    ReferentialIntegrity(#[from] IntegrityFault),

    #[error("invalid sort field '{0}': expected one of ID, Product, Category, User")]
    InvalidSortField(String),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {what}: {source}")]
    Json {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("catalog state lock poisoned")]
    Poisoned,
}

impl CatalogError {
    /// Returns the integrity fault if this is a join-time error
    pub fn integrity_fault(&self) -> Option<&IntegrityFault> {
        match self {
            CatalogError::ReferentialIntegrity(fault) => Some(fault),
            _ => None,
        }
    }
}
