/// Denormalized view rows
///
/// A `ViewRow` is one product flattened together with its category and the
/// category's owner. Rows are immutable once joined.

use crate::records::Sex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRow {
    /// Source product id, unique across the collection
    pub id: i64,
    pub product_name: String,
    pub category_title: String,
    pub category_icon: String,
    pub owner_sex: Sex,
    pub owner_name: String,
}

impl ViewRow {
    /// Category cell as the catalog table shows it, e.g. `🍦 - Dairy`
    pub fn category_label(&self) -> String {
        format!("{} - {}", self.category_icon, self.category_title)
    }
}
