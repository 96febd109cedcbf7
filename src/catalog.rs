/// Catalog session
///
/// `Catalog` owns the joined rows and the interactive `ViewState`, and turns
/// user actions into state transitions. The visible rows are recomputed with
/// `filter` then `sort`, and the result is kept as an index into the joined
/// rows until either the state or the rows change.

use crate::error::{CatalogError, Result};
use crate::filter::{filter, FilterState};
use crate::join::join;
use crate::records::{RawCategory, RawOwner, RawProduct, RecordSet};
use crate::row::ViewRow;
use crate::sort::{sort, SortField, SortState};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Filter and sort state, always replaced as a pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewState {
    pub filter: FilterState,
    pub sort: SortState,
}

/// A discrete user action against the catalog panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ViewAction {
    /// Select an owner tab; `None` is the "All" tab
    SelectOwner { name: Option<String> },

    SetSearchText { text: String },

    ClearSearchText,

    /// Add or remove a category from the selection
    ToggleCategory { title: String },

    ClearCategories,

    /// Click on a column header
    ActivateSort { field: SortField },

    /// Restore both filter and sort state
    ResetAll,
}

impl ViewState {
    /// Returns the state after `action`; `self` is left untouched
    pub fn apply(&self, action: ViewAction) -> ViewState {
        let mut next = self.clone();
        match action {
            ViewAction::SelectOwner { name } => next.filter.select_owner(name),
            ViewAction::SetSearchText { text } => next.filter.set_search_text(text),
            ViewAction::ClearSearchText => next.filter.clear_search_text(),
            ViewAction::ToggleCategory { title } => {
                next.filter.toggle_category(title);
            }
            ViewAction::ClearCategories => next.filter.clear_categories(),
            ViewAction::ActivateSort { field } => next.sort = next.sort.advance(field),
            ViewAction::ResetAll => next = ViewState::default(),
        }
        next
    }
}

/// Outcome of a visibility query
#[derive(Debug, PartialEq, Eq)]
pub enum Visible<'a> {
    /// No record sets have been loaded yet
    NotLoaded,
    /// Rows are loaded but none match the current filter
    NoResults,
    Rows(Vec<&'a ViewRow>),
}

impl<'a> Visible<'a> {
    /// Visible rows, empty for both `NotLoaded` and `NoResults`
    pub fn rows(&self) -> &[&'a ViewRow] {
        match self {
            Visible::Rows(rows) => rows,
            _ => &[],
        }
    }

    pub fn is_loaded(&self) -> bool {
        !matches!(self, Visible::NotLoaded)
    }
}

/// Cached result: positions into the joined rows, and the state they were
/// computed for
#[derive(Debug, Clone)]
struct VisibleIndex {
    state: ViewState,
    positions: Vec<usize>,
}

/// Owns the joined rows and the current `ViewState`
///
/// # Examples
///
/// ```
/// use catalog_view::{Catalog, RawCategory, RawOwner, RawProduct, Sex, SortField, ViewAction, Visible};
///
/// let mut catalog = Catalog::new();
/// assert!(matches!(catalog.visible(), Visible::NotLoaded));
///
/// catalog.load(
///     &[
///         RawProduct { id: 2, name: "Bread".to_string(), category_id: 10 },
///         RawProduct { id: 1, name: "Apple".to_string(), category_id: 10 },
///     ],
///     &[RawCategory { id: 10, title: "Food".to_string(), icon: "🍎".to_string(), owner_id: 7 }],
///     &[RawOwner { id: 7, name: "Anna".to_string(), sex: Sex::Female }],
/// ).unwrap();
///
/// catalog.apply(ViewAction::ActivateSort { field: SortField::Product });
/// let visible = catalog.visible();
/// let names: Vec<&str> = visible.rows().iter().map(|r| r.product_name.as_str()).collect();
/// assert_eq!(names, vec!["Apple", "Bread"]);
/// ```
#[derive(Debug, Default)]
pub struct Catalog {
    rows: Option<Arc<[ViewRow]>>,
    owner_names: Vec<String>,
    category_titles: Vec<String>,
    state: ViewState,
    cache: Option<VisibleIndex>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a loaded catalog over already-joined rows
    ///
    /// Without the raw records, the owner and category lists fall back to the
    /// distinct values found in the rows.
    pub fn from_rows(rows: impl Into<Arc<[ViewRow]>>) -> Self {
        let rows: Arc<[ViewRow]> = rows.into();
        Catalog {
            owner_names: distinct(&rows, |row| row.owner_name.as_str()),
            category_titles: distinct(&rows, |row| row.category_title.as_str()),
            rows: Some(rows),
            state: ViewState::default(),
            cache: None,
        }
    }

    /// Joins and installs the record sets. On failure the catalog keeps
    /// whatever rows it had before.
    pub fn load(
        &mut self,
        products: &[RawProduct],
        categories: &[RawCategory],
        owners: &[RawOwner],
    ) -> Result<()> {
        let rows = join(products, categories, owners)?;
        log::info!("catalog loaded with {} rows", rows.len());
        self.rows = Some(rows.into());
        self.owner_names = owners.iter().map(|owner| owner.name.clone()).collect();
        self.category_titles = categories.iter().map(|c| c.title.clone()).collect();
        self.cache = None;
        Ok(())
    }

    pub fn load_records(&mut self, records: &RecordSet) -> Result<()> {
        self.load(&records.products, &records.categories, &records.owners)
    }

    pub fn is_loaded(&self) -> bool {
        self.rows.is_some()
    }

    /// All joined rows in natural order
    pub fn rows(&self) -> Option<&Arc<[ViewRow]>> {
        self.rows.as_ref()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Replaces the whole state in one step
    pub fn set_state(&mut self, state: ViewState) {
        self.state = state;
    }

    pub fn apply(&mut self, action: ViewAction) {
        log::debug!("applying {:?}", action);
        self.state = self.state.apply(action);
    }

    /// Owner names in load order, including owners with no products
    pub fn owners(&self) -> Vec<&str> {
        self.owner_names.iter().map(String::as_str).collect()
    }

    /// Category titles in load order, including empty categories
    pub fn categories(&self) -> Vec<&str> {
        self.category_titles.iter().map(String::as_str).collect()
    }

    /// Rows to display for the current state
    pub fn visible(&mut self) -> Visible<'_> {
        let rows = match &self.rows {
            Some(rows) => rows,
            None => return Visible::NotLoaded,
        };

        let fresh = matches!(&self.cache, Some(cache) if cache.state == self.state);
        if fresh {
            log::debug!("visible rows served from cache");
        } else {
            let handles: Vec<Indexed<'_>> = rows
                .iter()
                .enumerate()
                .map(|(position, row)| Indexed(position, row))
                .collect();
            let filtered = filter(&self.state.filter, &handles);
            let positions = sort(&self.state.sort, &filtered)
                .into_iter()
                .map(|Indexed(position, _)| position)
                .collect();
            self.cache = Some(VisibleIndex {
                state: self.state.clone(),
                positions,
            });
        }

        let positions = self.cache.as_ref().map(|c| c.positions.as_slice()).unwrap_or(&[]);
        if positions.is_empty() {
            Visible::NoResults
        } else {
            Visible::Rows(positions.iter().map(|&i| &rows[i]).collect())
        }
    }
}

/// Row handle that remembers its position in the joined rows
#[derive(Clone, Copy)]
struct Indexed<'a>(usize, &'a ViewRow);

impl std::borrow::Borrow<ViewRow> for Indexed<'_> {
    fn borrow(&self) -> &ViewRow {
        self.1
    }
}

/// Owned view of the catalog taken under a single lock
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub loaded: bool,
    pub state: ViewState,
    pub rows: Vec<ViewRow>,
}

impl Snapshot {
    /// True when rows are loaded but nothing matches
    pub fn no_results(&self) -> bool {
        self.loaded && self.rows.is_empty()
    }
}

/// Thread-safe catalog handle. State transitions are serialized by the lock
/// and every snapshot sees one complete `ViewState`.
#[derive(Debug, Clone, Default)]
pub struct SharedCatalog {
    inner: Arc<Mutex<Catalog>>,
}

impl SharedCatalog {
    pub fn new(catalog: Catalog) -> Self {
        SharedCatalog {
            inner: Arc::new(Mutex::new(catalog)),
        }
    }

    pub fn apply(&self, action: ViewAction) -> Result<()> {
        let mut catalog = self.inner.lock().map_err(|_| CatalogError::Poisoned)?;
        catalog.apply(action);
        Ok(())
    }

    pub fn load_records(&self, records: &RecordSet) -> Result<()> {
        let mut catalog = self.inner.lock().map_err(|_| CatalogError::Poisoned)?;
        catalog.load_records(records)
    }

    pub fn snapshot(&self) -> Result<Snapshot> {
        let mut catalog = self.inner.lock().map_err(|_| CatalogError::Poisoned)?;
        let state = catalog.state().clone();
        let visible = catalog.visible();
        Ok(Snapshot {
            loaded: visible.is_loaded(),
            state,
            rows: visible.rows().iter().map(|&row| row.clone()).collect(),
        })
    }
}

/// Distinct values in first-seen row order
fn distinct(rows: &[ViewRow], key: impl Fn(&ViewRow) -> &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut values = Vec::new();
    for row in rows {
        let value = key(row);
        if seen.insert(value) {
            values.push(value.to_string());
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Sex;
    use crate::sort::{SortDirection, SortIndicator};
    use std::thread;

    fn records() -> RecordSet {
        RecordSet::new(
            vec![
                RawProduct { id: 1, name: "Milk".to_string(), category_id: 10 },
                RawProduct { id: 2, name: "Bread".to_string(), category_id: 20 },
                RawProduct { id: 3, name: "Cheese".to_string(), category_id: 10 },
                RawProduct { id: 4, name: "Apple".to_string(), category_id: 30 },
            ],
            vec![
                RawCategory { id: 10, title: "Dairy".to_string(), icon: "🍦".to_string(), owner_id: 100 },
                RawCategory { id: 20, title: "Bakery".to_string(), icon: "🍞".to_string(), owner_id: 200 },
                RawCategory { id: 30, title: "Fruit".to_string(), icon: "🍎".to_string(), owner_id: 100 },
            ],
            vec![
                RawOwner { id: 100, name: "Max".to_string(), sex: Sex::Male },
                RawOwner { id: 200, name: "Anna".to_string(), sex: Sex::Female },
            ],
        )
    }

    fn loaded() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.load_records(&records()).unwrap();
        catalog
    }

    fn visible_ids(catalog: &mut Catalog) -> Vec<i64> {
        catalog.visible().rows().iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_not_loaded_differs_from_no_results() {
        let mut catalog = Catalog::new();
        assert_eq!(catalog.visible(), Visible::NotLoaded);
        assert!(!catalog.visible().is_loaded());

        let mut catalog = loaded();
        catalog.apply(ViewAction::SelectOwner { name: Some("Nobody".to_string()) });
        assert_eq!(catalog.visible(), Visible::NoResults);
        assert!(catalog.visible().is_loaded());
    }

    #[test]
    fn test_default_state_shows_natural_order() {
        let mut catalog = loaded();
        assert_eq!(visible_ids(&mut catalog), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_actions_drive_filter_then_sort() {
        let mut catalog = loaded();
        catalog.apply(ViewAction::SelectOwner { name: Some("Max".to_string()) });
        assert_eq!(visible_ids(&mut catalog), vec![1, 3, 4]);

        catalog.apply(ViewAction::ActivateSort { field: SortField::Product });
        assert_eq!(visible_ids(&mut catalog), vec![4, 3, 1]);

        catalog.apply(ViewAction::ActivateSort { field: SortField::Product });
        assert_eq!(visible_ids(&mut catalog), vec![1, 3, 4]);

        catalog.apply(ViewAction::ToggleCategory { title: "Dairy".to_string() });
        assert_eq!(visible_ids(&mut catalog), vec![1, 3]);

        catalog.apply(ViewAction::SetSearchText { text: " CHE".to_string() });
        assert_eq!(visible_ids(&mut catalog), vec![3]);

        catalog.apply(ViewAction::ClearSearchText);
        catalog.apply(ViewAction::ClearCategories);
        catalog.apply(ViewAction::SelectOwner { name: None });
        // still sorted by product, descending
        assert_eq!(visible_ids(&mut catalog), vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_reset_all_restores_both_states() {
        let mut catalog = loaded();
        catalog.apply(ViewAction::SelectOwner { name: Some("Anna".to_string()) });
        catalog.apply(ViewAction::ToggleCategory { title: "Bakery".to_string() });
        catalog.apply(ViewAction::SetSearchText { text: "br".to_string() });
        catalog.apply(ViewAction::ActivateSort { field: SortField::Id });

        catalog.apply(ViewAction::ResetAll);
        assert_eq!(catalog.state(), &ViewState::default());
        assert_eq!(visible_ids(&mut catalog), vec![1, 2, 3, 4]);
        assert_eq!(catalog.state().sort.indicator(SortField::Id), SortIndicator::Unsorted);
    }

    #[test]
    fn test_cache_tracks_state_changes() {
        let mut catalog = loaded();
        assert_eq!(visible_ids(&mut catalog), vec![1, 2, 3, 4]);

        catalog.set_state(ViewState {
            filter: FilterState::default(),
            sort: SortState::new(SortField::Id, SortDirection::Desc),
        });
        assert_eq!(visible_ids(&mut catalog), vec![4, 3, 2, 1]);
        // same state, served from the cache
        assert_eq!(visible_ids(&mut catalog), vec![4, 3, 2, 1]);

        catalog.load(&records().products[..2], &records().categories, &records().owners)
            .unwrap();
        assert_eq!(visible_ids(&mut catalog), vec![2, 1]);
    }

    #[test]
    fn test_failed_load_keeps_previous_rows() {
        let mut catalog = loaded();
        let mut broken = records();
        broken.products.push(RawProduct { id: 9, name: "Ghost".to_string(), category_id: 99 });

        let err = catalog.load_records(&broken).unwrap_err();
        assert!(err.integrity_fault().is_some());
        assert_eq!(catalog.rows().map(|rows| rows.len()), Some(4));
    }

    #[test]
    fn test_from_rows_is_loaded() {
        let records = records();
        let rows = join(&records.products, &records.categories, &records.owners).unwrap();
        let mut catalog = Catalog::from_rows(rows);
        assert!(catalog.is_loaded());
        catalog.apply(ViewAction::ActivateSort { field: SortField::User });
        assert_eq!(visible_ids(&mut catalog), vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_owner_and_category_lists() {
        let catalog = loaded();
        assert_eq!(catalog.owners(), vec!["Max", "Anna"]);
        assert_eq!(catalog.categories(), vec!["Dairy", "Bakery", "Fruit"]);
        assert!(Catalog::new().owners().is_empty());
    }

    #[test]
    fn test_lists_include_records_without_products() {
        let mut records = records();
        records.owners.push(RawOwner { id: 300, name: "John".to_string(), sex: Sex::Male });
        records.categories.insert(
            0,
            RawCategory { id: 40, title: "Toys".to_string(), icon: "🧸".to_string(), owner_id: 300 },
        );

        let mut catalog = Catalog::new();
        catalog.load_records(&records).unwrap();
        assert_eq!(catalog.owners(), vec!["Max", "Anna", "John"]);
        assert_eq!(catalog.categories(), vec!["Toys", "Dairy", "Bakery", "Fruit"]);

        // a failed load keeps the lists it had
        records.products.push(RawProduct { id: 9, name: "Ghost".to_string(), category_id: 99 });
        assert!(catalog.load_records(&records).is_err());
        assert_eq!(catalog.owners().len(), 3);
    }

    #[test]
    fn test_from_rows_lists_come_from_rows() {
        let records = records();
        let rows = join(&records.products, &records.categories, &records.owners).unwrap();
        let catalog = Catalog::from_rows(rows);
        assert_eq!(catalog.owners(), vec!["Max", "Anna"]);
        assert_eq!(catalog.categories(), vec!["Dairy", "Bakery", "Fruit"]);
    }

    #[test]
    fn test_empty_owner_name_shows_every_row() {
        let mut catalog = loaded();
        catalog.apply(ViewAction::SelectOwner { name: Some("Anna".to_string()) });
        assert_eq!(visible_ids(&mut catalog), vec![2]);

        let action: ViewAction =
            serde_json::from_str(r#"{"type": "SelectOwner", "name": ""}"#).unwrap();
        catalog.apply(action);
        assert!(catalog.state().filter.is_default());
        assert_eq!(visible_ids(&mut catalog), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_view_state_apply_is_pure() {
        let state = ViewState::default();
        let next = state.apply(ViewAction::ToggleCategory { title: "Dairy".to_string() });
        assert!(state.filter.is_default());
        assert!(next.filter.is_category_selected("Dairy"));

        let next = next.apply(ViewAction::ToggleCategory { title: "Dairy".to_string() });
        assert!(next.filter.is_default());
    }

    #[test]
    fn test_actions_deserialize_from_tagged_json() {
        let action: ViewAction =
            serde_json::from_str(r#"{"type": "ActivateSort", "field": "ID"}"#).unwrap();
        assert_eq!(action, ViewAction::ActivateSort { field: SortField::Id });

        let action: ViewAction = serde_json::from_str(r#"{"type": "ResetAll"}"#).unwrap();
        assert_eq!(action, ViewAction::ResetAll);

        assert!(serde_json::from_str::<ViewAction>(r#"{"type": "ActivateSort", "field": "Price"}"#).is_err());
    }

    #[test]
    fn test_shared_catalog_serializes_updates() {
        let mut catalog = Catalog::new();
        catalog.load_records(&records()).unwrap();
        let shared = SharedCatalog::new(catalog);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    shared
                        .apply(ViewAction::ToggleCategory { title: "Dairy".to_string() })
                        .unwrap();
                    shared.snapshot().unwrap()
                })
            })
            .collect();

        for handle in handles {
            let snapshot = handle.join().unwrap();
            // every snapshot pairs its state with the rows for that state
            let dairy_only = snapshot.state.filter.is_category_selected("Dairy");
            let expected = if dairy_only { 2 } else { 4 };
            assert_eq!(snapshot.rows.len(), expected);
        }

        // an even number of toggles leaves the selection empty
        let snapshot = shared.snapshot().unwrap();
        assert!(snapshot.state.filter.is_default());
        assert!(!snapshot.no_results());
    }

    #[test]
    fn test_snapshot_of_unloaded_catalog() {
        let shared = SharedCatalog::default();
        let snapshot = shared.snapshot().unwrap();
        assert!(!snapshot.loaded);
        assert!(!snapshot.no_results());

        shared.load_records(&records()).unwrap();
        shared.apply(ViewAction::SetSearchText { text: "zzz".to_string() }).unwrap();
        assert!(shared.snapshot().unwrap().no_results());
    }
}
