/// Record join
///
/// Flattens products, categories and owners into `ViewRow`s by following
/// `product.category_id -> category -> category.owner_id -> owner`.
///
/// Both lookups go through hash indexes built once per call, the same way a
/// hash join indexes its right-hand side. Unlike a left join there is no null
/// fill: a reference that does not resolve to exactly one record is an
/// integrity fault and the whole join fails.

use crate::error::{IntegrityFault, Result};
use crate::records::{RawCategory, RawOwner, RawProduct};
use crate::row::ViewRow;
use std::collections::{HashMap, HashSet};

/// Joins the three record sets into view rows, preserving product order
///
/// # Examples
///
/// ```
/// use catalog_view::{join, RawCategory, RawOwner, RawProduct, Sex};
///
/// let products = vec![RawProduct { id: 1, name: "Milk".to_string(), category_id: 10 }];
/// let categories = vec![RawCategory {
///     id: 10,
///     title: "Dairy".to_string(),
///     icon: "🍦".to_string(),
///     owner_id: 100,
/// }];
/// let owners = vec![RawOwner { id: 100, name: "Max".to_string(), sex: Sex::Male }];
///
/// let rows = join(&products, &categories, &owners).unwrap();
/// assert_eq!(rows[0].category_title, "Dairy");
/// assert_eq!(rows[0].owner_name, "Max");
/// ```
pub fn join(
    products: &[RawProduct],
    categories: &[RawCategory],
    owners: &[RawOwner],
) -> Result<Vec<ViewRow>> {
    let category_index = index_by_id(categories, |c| c.id, IntegrityFault::DuplicateCategory)?;
    let owner_index = index_by_id(owners, |o| o.id, IntegrityFault::DuplicateOwner)?;

    let mut seen_products = HashSet::with_capacity(products.len());
    let mut rows = Vec::with_capacity(products.len());

    for product in products {
        if !seen_products.insert(product.id) {
            log::warn!("rejecting record sets: duplicate product id {}", product.id);
            return Err(IntegrityFault::DuplicateProduct(product.id).into());
        }

        let category = category_index.get(&product.category_id).ok_or_else(|| {
            log::warn!(
                "rejecting record sets: product {} has no category {}",
                product.id,
                product.category_id
            );
            IntegrityFault::MissingCategory {
                product_id: product.id,
                category_id: product.category_id,
            }
        })?;

        let owner = owner_index.get(&category.owner_id).ok_or_else(|| {
            log::warn!(
                "rejecting record sets: category {} has no owner {}",
                category.id,
                category.owner_id
            );
            IntegrityFault::MissingOwner {
                category_id: category.id,
                owner_id: category.owner_id,
            }
        })?;

        rows.push(ViewRow {
            id: product.id,
            product_name: product.name.clone(),
            category_title: category.title.clone(),
            category_icon: category.icon.clone(),
            owner_sex: owner.sex,
            owner_name: owner.name.clone(),
        });
    }

    log::debug!("joined {} view rows", rows.len());
    Ok(rows)
}

/// Builds an id -> record lookup, rejecting ids that occur twice
fn index_by_id<'a, T>(
    records: &'a [T],
    id_of: impl Fn(&T) -> i64,
    duplicate: impl Fn(i64) -> IntegrityFault,
) -> Result<HashMap<i64, &'a T>> {
    let mut index = HashMap::with_capacity(records.len());
    for record in records {
        let id = id_of(record);
        if index.insert(id, record).is_some() {
            log::warn!("rejecting record sets: duplicate id {}", id);
            return Err(duplicate(id).into());
        }
    }
    Ok(index)
}
