use std::sync::Arc;

use tokio::sync::OnceCell;
use tokio::task;

use crate::config::DatasetSource;
use crate::loader::{self, LoadError, LoadOutcome, RejectedRow};
use crate::models::ArtistRecord;
use crate::query;

/// Immutable snapshot produced by a single load.
#[derive(Debug)]
pub struct Catalog {
    records: Vec<ArtistRecord>,
    groups: Vec<String>,
    rejected: Vec<RejectedRow>,
}

impl Catalog {
    pub fn from_outcome(outcome: LoadOutcome) -> Self {
        let groups = query::distinct_groups(&outcome.records);
        Self {
            records: outcome.records,
            groups,
            rejected: outcome.rejected,
        }
    }

    pub fn records(&self) -> &[ArtistRecord] {
        &self.records
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    pub fn rejected(&self) -> &[RejectedRow] {
        &self.rejected
    }
}

/// Guards the dataset load so it runs at most once per session.
///
/// Every caller gets the same snapshot. A failed load leaves the cell empty
/// and may be retried.
#[derive(Clone, Default)]
pub struct CatalogStore {
    cell: Arc<OnceCell<Arc<Catalog>>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_load(&self, source: DatasetSource) -> Result<Arc<Catalog>, LoadError> {
        self.cell
            .get_or_try_init(|| async move {
                let outcome = task::spawn_blocking(move || loader::load_source(&source))
                    .await
                    .map_err(|join_err| LoadError::Read {
                        source_name: "dataset loader task".to_string(),
                        source: std::io::Error::other(join_err),
                    })??;
                Ok::<_, LoadError>(Arc::new(Catalog::from_outcome(outcome)))
            })
            .await
            .cloned()
    }

    pub fn get(&self) -> Option<Arc<Catalog>> {
        self.cell.get().cloned()
    }
}
