/// Catalog View - Denormalized Product Catalog
///
/// Joins products, categories and owners into flat view rows, then narrows
/// and orders them with an interactive filter state and a tri-state column
/// sort. Every stage is a pure function of its inputs; `Catalog` ties them
/// together with memoization for hosts that re-render on each user action.

pub mod error;
pub mod records;
pub mod row;
pub mod join;
pub mod filter;
pub mod sort;
pub mod catalog;
pub mod config;

pub use error::{CatalogError, IntegrityFault, Result};
pub use records::{RawCategory, RawOwner, RawProduct, RecordSet, Sex};
pub use row::ViewRow;
pub use join::join;
pub use filter::{filter, reset_filters, FilterState};
pub use sort::{advance_sort, reset_sort, sort, SortDirection, SortField, SortIndicator, SortState};
pub use catalog::{Catalog, SharedCatalog, Snapshot, ViewAction, ViewState, Visible};
pub use config::BrowserConfig;
