/// Raw record sets
///
/// Products, categories and owners exactly as an external loader supplies
/// them. These are never mutated once loaded; the join turns them into
/// `ViewRow`s.

use crate::error::{CatalogError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// File names of the conventional on-disk layout
pub const PRODUCTS_FILE: &str = "products.json";
pub const CATEGORIES_FILE: &str = "categories.json";
pub const OWNERS_FILE: &str = "users.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "m")]
    Male,
    #[serde(rename = "f")]
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "m",
            Sex::Female => "f",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCategory {
    pub id: i64,
    pub title: String,
    pub icon: String,
    pub owner_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOwner {
    pub id: i64,
    pub name: String,
    pub sex: Sex,
}

/// The three raw collections, loaded together
///
/// # Examples
///
/// ```
/// use catalog_view::RecordSet;
///
/// let records = RecordSet::from_json_strs(
///     r#"[{"id": 1, "name": "Milk", "categoryId": 10}]"#,
///     r#"[{"id": 10, "title": "Dairy", "icon": "🍦", "ownerId": 100}]"#,
///     r#"[{"id": 100, "name": "Max", "sex": "m"}]"#,
/// ).unwrap();
///
/// assert_eq!(records.products.len(), 1);
/// assert_eq!(records.categories[0].title, "Dairy");
/// ```

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    pub products: Vec<RawProduct>,
    pub categories: Vec<RawCategory>,
    pub owners: Vec<RawOwner>,
}

impl RecordSet {
    pub fn new(
        products: Vec<RawProduct>,
        categories: Vec<RawCategory>,
        owners: Vec<RawOwner>,
    ) -> Self {
        RecordSet {
            products,
            categories,
            owners,
        }
    }

    /// Parse the three collections from JSON array texts
    pub fn from_json_strs(products: &str, categories: &str, owners: &str) -> Result<Self> {
        Ok(RecordSet {
            products: parse_json(products, "products")?,
            categories: parse_json(categories, "categories")?,
            owners: parse_json(owners, "owners")?,
        })
    }

    /// Load `products.json`, `categories.json` and `users.json` from a directory
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let read = |name: &str| {
            let path = dir.join(name);
            fs::read_to_string(&path).map_err(|source| CatalogError::Io { path, source })
        };

        let products = read(PRODUCTS_FILE)?;
        let categories = read(CATEGORIES_FILE)?;
        let owners = read(OWNERS_FILE)?;

        let records = Self::from_json_strs(&products, &categories, &owners)?;
        log::info!(
            "loaded {} products, {} categories, {} owners from {}",
            records.products.len(),
            records.categories.len(),
            records.owners.len(),
            dir.display()
        );
        Ok(records)
    }
}

fn parse_json<T: DeserializeOwned>(text: &str, what: &str) -> Result<Vec<T>> {
    serde_json::from_str(text).map_err(|source| CatalogError::Json {
        what: what.to_string(),
        source,
    })
}
