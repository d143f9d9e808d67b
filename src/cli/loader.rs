use anyhow::{Result, anyhow};
use tracing::debug;

use super::ui;
use crate::core::catalog::{Catalog, CatalogProvider};

/// Lifecycle of the one catalog fetch an invocation performs.
///
/// The state moves from `Loading` to exactly one of `Ready` or `Failed`;
/// there is no way back to `Loading`.
#[derive(Debug)]
pub enum LoadState {
    Loading,
    Ready(Catalog),
    Failed(String),
}

/// Drives the catalog fetch and the spinner shown while it runs.
///
/// The spinner is cleared on both outcomes, so a failed fetch never leaves a
/// stuck loading indicator behind.
pub struct CatalogLoader<'a> {
    provider: &'a dyn CatalogProvider,
    state: LoadState,
}

impl<'a> CatalogLoader<'a> {
    pub fn new(provider: &'a dyn CatalogProvider) -> Self {
        CatalogLoader {
            provider,
            state: LoadState::Loading,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub async fn load(&mut self) -> Result<&Catalog> {
        let spinner = ui::new_spinner("Loading price catalog...");
        self.state = match self.provider.fetch_catalog().await {
            Ok(catalog) => {
                debug!("Price catalog ready with {} currencies", catalog.len());
                LoadState::Ready(catalog)
            }
            Err(e) => LoadState::Failed(format!("{e:#}")),
        };
        spinner.finish_and_clear();

        match &self.state {
            LoadState::Ready(catalog) => Ok(catalog),
            LoadState::Failed(reason) => Err(anyhow!("{reason}")),
            LoadState::Loading => Err(anyhow!("price catalog fetch did not run")),
        }
    }
}
