use std::sync::Arc;

use crate::catalog::Catalog;

#[derive(Debug, Clone)]
pub enum AppMessage {
    CatalogLoaded(Arc<Catalog>),
    LoadFailed(String),
}
