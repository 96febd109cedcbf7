/// Column sorting and the tri-state header toggle
///
/// A `SortState` names at most one column and a direction. Repeatedly
/// activating the same column header cycles its direction
/// `Asc -> Desc -> None -> Asc`; activating a different column always starts
/// over at `Asc`. With no field or `SortDirection::None` the rows keep their
/// natural order, which is the raw product load order.

use crate::error::{CatalogError, Result};
use crate::row::ViewRow;
use feruca::Collator;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sortable columns, in header order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortField {
    #[serde(rename = "ID")]
    Id,
    Product,
    Category,
    User,
}

impl SortField {
    pub const ALL: [SortField; 4] = [
        SortField::Id,
        SortField::Product,
        SortField::Category,
        SortField::User,
    ];

    /// Header label, also the accepted name when parsing
    pub fn label(&self) -> &'static str {
        match self {
            SortField::Id => "ID",
            SortField::Product => "Product",
            SortField::Category => "Category",
            SortField::User => "User",
        }
    }

    /// Base ascending comparison for this column
    fn compare(&self, collator: &mut Collator, a: &ViewRow, b: &ViewRow) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Product => collator.collate(&a.product_name, &b.product_name),
            SortField::Category => collator.collate(&a.category_title, &b.category_title),
            SortField::User => collator.collate(&a.owner_name, &b.owner_name),
        }
    }
}

impl FromStr for SortField {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        SortField::ALL
            .iter()
            .find(|field| field.label() == s)
            .copied()
            .ok_or_else(|| CatalogError::InvalidSortField(s.to_string()))
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    None,
    Asc,
    Desc,
}

impl SortDirection {
    /// Next direction when the active column is activated again
    pub fn next(self) -> Self {
        match self {
            SortDirection::None => SortDirection::Asc,
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::None,
        }
    }
}

/// What a column header should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    Unsorted,
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SortState {
    /// Last activated column. May stay set after the direction cycles back
    /// to `None`.
    pub field: Option<SortField>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        SortState {
            field: Some(field),
            direction,
        }
    }

    /// Builds a state from a header name as stored by a host, e.g. `"Product"`.
    /// An empty name means no field.
    pub fn from_parts(field: &str, direction: SortDirection) -> Result<Self> {
        let field = if field.is_empty() {
            None
        } else {
            Some(field.parse()?)
        };
        Ok(SortState { field, direction })
    }

    /// The column actually ordering the rows, if any
    pub fn active_field(&self) -> Option<SortField> {
        match self.direction {
            SortDirection::None => None,
            _ => self.field,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active_field().is_some()
    }

    /// Toggle transition for a header activation
    pub fn advance(&self, activated: SortField) -> SortState {
        if self.field == Some(activated) {
            SortState {
                field: self.field,
                direction: self.direction.next(),
            }
        } else {
            SortState::new(activated, SortDirection::Asc)
        }
    }

    pub fn indicator(&self, field: SortField) -> SortIndicator {
        if self.field != Some(field) {
            return SortIndicator::Unsorted;
        }
        match self.direction {
            SortDirection::None => SortIndicator::Unsorted,
            SortDirection::Asc => SortIndicator::Ascending,
            SortDirection::Desc => SortIndicator::Descending,
        }
    }
}

/// Pure toggle transition, see `SortState::advance`
///
/// # Examples
///
/// ```
/// use catalog_view::{advance_sort, SortDirection, SortField, SortState};
///
/// let state = SortState::default();
/// let state = advance_sort(&state, SortField::Product);
/// assert_eq!(state.direction, SortDirection::Asc);
///
/// let state = advance_sort(&state, SortField::Product);
/// assert_eq!(state.direction, SortDirection::Desc);
///
/// let state = advance_sort(&state, SortField::Product);
/// assert!(!state.is_active());
/// ```

pub fn advance_sort(current: &SortState, activated: SortField) -> SortState {
    current.advance(activated)
}

/// Returns the initial, unsorted state
pub fn reset_sort() -> SortState {
    SortState::default()
}

/// Returns the rows ordered by `state`. Stable: rows that compare equal keep
/// their input order in both directions. Inactive states return the input
/// order unchanged.
pub fn sort<R>(state: &SortState, rows: &[R]) -> Vec<R>
where
    R: Borrow<ViewRow> + Clone,
{
    let mut sorted = rows.to_vec();

    let field = match state.active_field() {
        Some(field) => field,
        None => return sorted,
    };

    // CLDR root order, with a code point tie-break so it stays total
    let mut collator = Collator::default();
    sorted.sort_by(|a, b| {
        let cmp = field.compare(
            &mut collator,
            <R as Borrow<ViewRow>>::borrow(a),
            <R as Borrow<ViewRow>>::borrow(b),
        );
        match state.direction {
            SortDirection::Desc => cmp.reverse(),
            _ => cmp,
        }
    });

    log::debug!(
        "sorted {} rows by {} {:?}",
        sorted.len(),
        field,
        state.direction
    );
    sorted
}
