pub mod cli;
pub mod core;
pub mod providers;

pub use crate::core::config;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::swap::SwapArgs;
use crate::core::config::AppConfig;
use crate::providers::switcheo::SwitcheoProvider;

pub enum AppCommand {
    List { exclude: Option<String> },
    Swap(SwapArgs),
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency swapper starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = SwitcheoProvider::new(config.catalog_base_url())?;

    match command {
        AppCommand::List { exclude } => cli::list::run(exclude.as_deref(), &provider).await,
        AppCommand::Swap(args) => cli::swap::run(&args, &provider, &config).await,
    }
}
