/// Catalog Browsing Example
///
/// This example demonstrates:
/// - Loading the three record sets from the bundled `data/` directory
/// - Narrowing the catalog with owner, search and category filters
/// - Telling "no results" apart from "not loaded"
/// - Resetting every filter in one action

use catalog_view::{Catalog, RecordSet, ViewAction, Visible};

fn print_visible(catalog: &mut Catalog) {
    match catalog.visible() {
        Visible::NotLoaded => println!("   (not loaded)"),
        Visible::NoResults => println!("   No products matching selected criteria"),
        Visible::Rows(rows) => {
            for row in rows {
                println!(
                    "   {:>2} | {:<10} | {:<16} | {}",
                    row.id,
                    row.product_name,
                    row.category_label(),
                    row.owner_name
                );
            }
        }
    }
    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Catalog View Browsing Example ===\n");

    let mut catalog = Catalog::new();
    println!("0. Before loading:");
    print_visible(&mut catalog);

    let data_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/data");
    let records = RecordSet::load_dir(data_dir)?;
    catalog.load_records(&records)?;

    println!("1. All products (owners: {:?}):", catalog.owners());
    print_visible(&mut catalog);

    println!("2. Owned by Anna:");
    catalog.apply(ViewAction::SelectOwner { name: Some("Anna".to_string()) });
    print_visible(&mut catalog);

    println!("3. ...and named like \"  E \":");
    catalog.apply(ViewAction::SetSearchText { text: "  E ".to_string() });
    print_visible(&mut catalog);

    println!("4. ...and in Drinks only:");
    catalog.apply(ViewAction::ToggleCategory { title: "Drinks".to_string() });
    print_visible(&mut catalog);

    println!("5. Reset all filters:");
    catalog.apply(ViewAction::ResetAll);
    print_visible(&mut catalog);

    Ok(())
}
