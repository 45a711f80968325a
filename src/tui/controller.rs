use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task;
use tracing::error;

use crate::app::AppMessage;
use crate::catalog::{Catalog, CatalogStore};
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppController {
    config: AppConfig,
    catalog: CatalogStore,
    message_tx: UnboundedSender<AppMessage>,
}

impl AppController {
    pub fn new(
        config: AppConfig,
        catalog: CatalogStore,
        message_tx: UnboundedSender<AppMessage>,
    ) -> Self {
        Self {
            config,
            catalog,
            message_tx,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Starts the dataset load in the background. Repeated calls reuse the
    /// snapshot from the first successful load.
    pub fn load_catalog(&self) {
        let catalog = self.catalog.clone();
        let source = self.config.dataset().clone();
        let tx = self.message_tx.clone();

        task::spawn(async move {
            let described = source.describe();
            match catalog.get_or_load(source).await {
                Ok(snapshot) => {
                    let _ = tx.send(AppMessage::CatalogLoaded(snapshot));
                }
                Err(err) => {
                    error!(source = %described, "dataset load failed: {err}");
                    let _ = tx.send(AppMessage::LoadFailed(format!(
                        "Could not load {described}: {err}"
                    )));
                }
            }
        });
    }

    pub fn loaded_catalog(&self) -> Option<Arc<Catalog>> {
        self.catalog.get()
    }
}
