use anyhow::{Context, Result};
use chrono::DateTime;

use super::loader::CatalogLoader;
use super::ui::{self, StyleType};
use crate::core::catalog::{CatalogProvider, visible_options};
use crate::core::convert::format_amount;

/// Renders the quote date as a calendar day, falling back to the raw string
/// when the feed sends something unexpected.
fn display_date(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive().to_string())
        .unwrap_or_else(|_| raw.to_string())
}

pub async fn run(exclude: Option<&str>, provider: &dyn CatalogProvider) -> Result<()> {
    let mut loader = CatalogLoader::new(provider);
    let catalog = loader.load().await.context("Could not load the price catalog")?;

    let visible = visible_options(catalog.codes(), exclude);
    if visible.is_empty() {
        println!("No currencies available.");
        return Ok(());
    }

    println!(
        "{}",
        ui::style_text("Price catalog", StyleType::Title)
    );

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell("Unit Price"),
        ui::header_cell("As Of"),
    ]);

    for code in &visible {
        if let Some(record) = catalog.get(code) {
            table.add_row(vec![
                comfy_table::Cell::new(code),
                ui::value_cell(&format_amount(record.price)),
                comfy_table::Cell::new(display_date(&record.date)),
            ]);
        }
    }

    println!("{table}");

    if let Some((from, to)) = catalog.default_pair() {
        println!(
            "{}",
            ui::style_text(&format!("Default pair: {from} -> {to}"), StyleType::Subtle)
        );
    }

    Ok(())
}
