use anyhow::{Context, Result, bail};

use super::loader::CatalogLoader;
use super::ui::{self, StyleType};
use crate::core::catalog::{Catalog, CatalogProvider};
use crate::core::config::AppConfig;
use crate::core::convert::{MissingPrice, convert};

#[derive(Debug, Clone)]
pub struct SwapArgs {
    pub amount: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub assume_unit: bool,
}

/// Picks the currency pair for a swap: explicit flags first, then config
/// defaults, then the first two catalog entries.
fn resolve_pair(args: &SwapArgs, config: &AppConfig, catalog: &Catalog) -> Result<(String, String)> {
    let catalog_pair = catalog.default_pair();

    let from = args
        .from
        .clone()
        .or_else(|| config.default_from.clone())
        .or_else(|| catalog_pair.map(|(first, _)| first.to_string()));
    let to = args
        .to
        .clone()
        .or_else(|| config.default_to.clone())
        .or_else(|| catalog_pair.map(|(_, second)| second.to_string()));

    match (from, to) {
        (Some(from), Some(to)) => Ok((from, to)),
        _ => bail!(
            "The catalog lists {} currencies, not enough to pick a default pair. \
             Pass --from and --to explicitly.",
            catalog.len()
        ),
    }
}

pub async fn run(
    args: &SwapArgs,
    provider: &dyn CatalogProvider,
    config: &AppConfig,
) -> Result<()> {
    let mut loader = CatalogLoader::new(provider);
    let catalog = loader.load().await.context("Could not load the price catalog")?;

    let (from, to) = resolve_pair(args, config, catalog)?;

    let missing = if args.assume_unit {
        MissingPrice::AssumeUnit
    } else {
        MissingPrice::Fail
    };

    let received = convert(&args.amount, &from, &to, catalog, missing)?;

    println!(
        "{} {} = {} {}",
        ui::style_text(&args.amount, StyleType::ResultLabel),
        from,
        ui::style_text(&received, StyleType::ResultValue),
        to,
    );

    Ok(())
}
