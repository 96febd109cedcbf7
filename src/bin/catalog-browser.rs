/// Catalog Browser
///
/// Loads the record sets from `CATALOG_DATA_DIR`, then reads one JSON
/// `ViewAction` per line from stdin and prints the visible table after each
/// action. A blank line re-prints the current table.
///
/// ```text
/// {"type": "SelectOwner", "name": "Max"}
/// {"type": "ActivateSort", "field": "Product"}
/// {"type": "ResetAll"}
/// ```

use catalog_view::{BrowserConfig, Catalog, RecordSet, SortField, SortIndicator, ViewAction, Visible};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = BrowserConfig::from_env();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(config.log_filter.as_str()));

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &BrowserConfig) -> Result<(), Box<dyn std::error::Error>> {
    let records = RecordSet::load_dir(&config.data_dir)?;
    let mut catalog = Catalog::new();
    catalog.load_records(&records)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render(&mut catalog, &mut out)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            match serde_json::from_str::<ViewAction>(&line) {
                Ok(action) => catalog.apply(action),
                Err(err) => {
                    log::warn!("ignoring unreadable action {:?}: {}", line, err);
                    continue;
                }
            }
        }
        render(&mut catalog, &mut out)?;
    }

    Ok(())
}

fn render(catalog: &mut Catalog, out: &mut impl Write) -> io::Result<()> {
    let sort = catalog.state().sort;
    let header: Vec<String> = SortField::ALL
        .iter()
        .map(|field| {
            let glyph = match sort.indicator(*field) {
                SortIndicator::Unsorted => "↕",
                SortIndicator::Ascending => "↑",
                SortIndicator::Descending => "↓",
            };
            format!("{} {}", field, glyph)
        })
        .collect();

    match catalog.visible() {
        Visible::NotLoaded => writeln!(out, "Loading...")?,
        Visible::NoResults => writeln!(out, "No products matching selected criteria")?,
        Visible::Rows(rows) => {
            writeln!(out, "{}", header.join(" | "))?;
            for row in rows {
                writeln!(
                    out,
                    "{} | {} | {} | {} ({})",
                    row.id,
                    row.product_name,
                    row.category_label(),
                    row.owner_name,
                    row.owner_sex
                )?;
            }
        }
    }
    writeln!(out)?;
    out.flush()
}
