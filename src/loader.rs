use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::DatasetSource;
use crate::models::ArtistRecord;

/// Dataset compiled into the binary, used when no `--data` path is given.
pub const BUNDLED_DATASET: &str = include_str!("../data/kpop_idol_database.csv");

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dataset not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read dataset {source_name}: {source}")]
    Read {
        source_name: String,
        #[source]
        source: io::Error,
    },
}

/// A data line that did not yield enough fields to build a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    /// 1-based line number in the source, header included.
    pub line_number: usize,
    pub raw: String,
}

#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub records: Vec<ArtistRecord>,
    pub rejected: Vec<RejectedRow>,
}

pub fn load_source(source: &DatasetSource) -> Result<LoadOutcome, LoadError> {
    match source {
        DatasetSource::Bundled => load(BUNDLED_DATASET.as_bytes(), "bundled dataset"),
        DatasetSource::File(path) => load_file(path),
    }
}

pub fn load_file(path: &Path) -> Result<LoadOutcome, LoadError> {
    let file = File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Read {
            source_name: path.display().to_string(),
            source: err,
        },
    })?;

    load(BufReader::new(file), &path.display().to_string())
}

/// Parses a header line followed by comma separated data lines.
///
/// Each field is trimmed; blank fields keep their position. Rows with fewer
/// than seven fields are skipped and reported, any read failure aborts the
/// whole load.
pub fn load<R: BufRead>(reader: R, source_name: &str) -> Result<LoadOutcome, LoadError> {
    let mut outcome = LoadOutcome::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|err| LoadError::Read {
            source_name: source_name.to_string(),
            source: err,
        })?;

        if idx == 0 {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        match ArtistRecord::from_fields(fields.as_slice()) {
            Some(record) => {
                debug!(line_number = idx + 1, stage_name = %record.stage_name, "loaded row");
                outcome.records.push(record);
            }
            None => {
                warn!(line_number = idx + 1, fields = fields.len(), "invalid row: {line}");
                outcome.rejected.push(RejectedRow {
                    line_number: idx + 1,
                    raw: line,
                });
            }
        }
    }

    info!(
        source = source_name,
        loaded = outcome.records.len(),
        rejected = outcome.rejected.len(),
        "dataset loaded"
    );

    Ok(outcome)
}
