/// Row filtering
///
/// A `FilterState` holds the three interactive criteria of the catalog panel:
/// the selected owner, the search text and the set of selected categories.
/// Active criteria are ANDed; inactive ones are skipped entirely, and a state
/// with no active criteria returns its input untouched.

use crate::row::ViewRow;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Exact, case-sensitive owner name; `None` means all owners
    pub owner_name: Option<String>,
    /// Raw search text as typed; trimmed and lower-cased when matching
    pub search_text: String,
    pub selected_categories: BTreeSet<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no criterion is active
    pub fn is_default(&self) -> bool {
        self.owner_name.is_none()
            && self.search_needle().is_none()
            && self.selected_categories.is_empty()
    }

    /// Selects one owner, or all owners with `None`. An empty name is the
    /// "All" choice too.
    pub fn select_owner(&mut self, owner_name: Option<String>) {
        self.owner_name = owner_name.filter(|name| !name.is_empty());
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    pub fn clear_search_text(&mut self) {
        self.search_text.clear();
    }

    /// Adds the title if absent, removes it if present.
    /// Returns whether the category is selected afterwards.
    pub fn toggle_category(&mut self, title: impl Into<String>) -> bool {
        let title = title.into();
        if self.selected_categories.remove(&title) {
            false
        } else {
            self.selected_categories.insert(title);
            true
        }
    }

    pub fn clear_categories(&mut self) {
        self.selected_categories.clear();
    }

    pub fn is_category_selected(&self, title: &str) -> bool {
        self.selected_categories.contains(title)
    }

    /// Normalized search text, or `None` if it is blank
    fn search_needle(&self) -> Option<String> {
        let trimmed = self.search_text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        }
    }

    /// Tests a single row against every active criterion
    pub fn matches(&self, row: &ViewRow) -> bool {
        let needle = self.search_needle();
        self.matches_with(row, needle.as_deref())
    }

    fn matches_with(&self, row: &ViewRow, needle: Option<&str>) -> bool {
        // Cheap checks first, substring scan last
        if let Some(owner) = &self.owner_name {
            if row.owner_name != *owner {
                return false;
            }
        }

        if !self.selected_categories.is_empty()
            && !self.selected_categories.contains(&row.category_title)
        {
            return false;
        }

        match needle {
            Some(needle) => row.product_name.trim().to_lowercase().contains(needle),
            None => true,
        }
    }
}

/// Returns the filter state with no active criteria
pub fn reset_filters() -> FilterState {
    FilterState::default()
}

/// Keeps the rows matching all active criteria of `state`, in input order.
///
/// Generic over the row handle, so it filters owned rows, `&ViewRow` slices
/// or `Arc<ViewRow>`s alike; the returned rows are clones of the handles.
///
/// # Examples
///
/// ```
/// use catalog_view::{filter, FilterState, Sex, ViewRow};
///
/// let rows = vec![ViewRow {
///     id: 1,
///     product_name: "Milk".to_string(),
///     category_title: "Dairy".to_string(),
///     category_icon: "🍦".to_string(),
///     owner_sex: Sex::Male,
///     owner_name: "Max".to_string(),
/// }];
///
/// let mut state = FilterState::new();
/// state.select_owner(Some("Max".to_string()));
/// assert_eq!(filter(&state, &rows).len(), 1);
///
/// state.select_owner(Some("Anna".to_string()));
/// assert!(filter(&state, &rows).is_empty());
/// ```
pub fn filter<R>(state: &FilterState, rows: &[R]) -> Vec<R>
where
    R: Borrow<ViewRow> + Clone,
{
    if state.is_default() {
        return rows.to_vec();
    }

    let needle = state.search_needle();
    let kept: Vec<R> = rows
        .iter()
        .filter(|row| {
            state.matches_with(<R as Borrow<ViewRow>>::borrow(*row), needle.as_deref())
        })
        .cloned()
        .collect();

    log::debug!("filter kept {} of {} rows", kept.len(), rows.len());
    kept
}
