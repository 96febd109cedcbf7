/// Column Sorting Example
///
/// This example demonstrates:
/// - The tri-state header toggle (ascending, descending, unsorted)
/// - Switching columns restarting at ascending
/// - Stable ordering for rows with equal keys

use catalog_view::{advance_sort, join, sort, RecordSet, SortField, SortState, ViewRow};

fn show(label: &str, state: &SortState, rows: &[&ViewRow]) {
    let ordered = sort(state, rows);
    let cells: Vec<String> = ordered
        .iter()
        .map(|r| format!("{}:{}/{}", r.id, r.product_name, r.owner_name))
        .collect();
    println!("{:<28} {:?} {:?}", label, state.field, state.direction);
    println!("   {}\n", cells.join(", "));
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Catalog View Sorting Example ===\n");

    let data_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/data");
    let records = RecordSet::load_dir(data_dir)?;
    let rows = join(&records.products, &records.categories, &records.owners)?;
    let refs: Vec<&ViewRow> = rows.iter().collect();

    let mut state = SortState::default();
    show("Initial (load order)", &state, &refs);

    for click in 1..=4 {
        state = advance_sort(&state, SortField::Product);
        show(&format!("Product click #{}", click), &state, &refs);
    }

    state = advance_sort(&state, SortField::User);
    show("Switch to User (ties stable)", &state, &refs);

    let parsed: SortField = "Category".parse()?;
    state = advance_sort(&state, parsed);
    show("Switch to Category", &state, &refs);

    Ok(())
}
