use std::convert::Infallible;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use crate::models::SortKey;

/// Browse, search and sort the K-pop idol dataset in the terminal.
#[derive(Debug, Parser)]
#[command(name = "kpop-idol-finder", version)]
pub struct Args {
    /// CSV file to load instead of the bundled dataset.
    #[arg(long, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Where diagnostics are written (the terminal is taken by the UI).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Initial sort order: name, age or group. Anything else sorts by name.
    #[arg(long, value_name = "KEY", default_value = "name", value_parser = parse_sort_key)]
    pub sort: SortKey,
}

fn parse_sort_key(value: &str) -> Result<SortKey, Infallible> {
    Ok(SortKey::from_label(value))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatasetSource {
    Bundled,
    File(PathBuf),
}

impl DatasetSource {
    pub fn describe(&self) -> String {
        match self {
            DatasetSource::Bundled => "bundled dataset".to_string(),
            DatasetSource::File(path) => path.display().to_string(),
        }
    }
}

/// Static configuration resolved once at startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    dataset: DatasetSource,
    log_path: PathBuf,
    initial_sort: SortKey,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetSource::Bundled,
            log_path: PathBuf::from("data")
                .join("logs")
                .join("kpop-idol-finder.log"),
            initial_sort: SortKey::Name,
        }
    }
}

impl AppConfig {
    pub fn from_args(args: Args) -> Self {
        let defaults = Self::default();
        Self {
            dataset: args
                .data
                .map(DatasetSource::File)
                .unwrap_or(defaults.dataset),
            log_path: args.log_file.unwrap_or(defaults.log_path),
            initial_sort: args.sort,
        }
    }

    pub fn dataset(&self) -> &DatasetSource {
        &self.dataset
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn initial_sort(&self) -> SortKey {
        self.initial_sort
    }

    /// Creates the directory that holds the diagnostics log.
    pub fn ensure_filesystem(&self) -> Result<()> {
        if let Some(dir) = self.log_path().parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use super::*;

    #[test]
    fn defaults_to_bundled_dataset_and_name_sort() {
        let config = AppConfig::from_args(Args::parse_from(["kpop-idol-finder"]));
        assert_eq!(config.dataset(), &DatasetSource::Bundled);
        assert_eq!(config.initial_sort(), SortKey::Name);
        assert!(config.log_path().ends_with("kpop-idol-finder.log"));
    }

    #[test]
    fn cli_overrides_defaults() {
        let args = Args::parse_from([
            "kpop-idol-finder",
            "--data",
            "idols.csv",
            "--log-file",
            "out/app.log",
            "--sort",
            "Age",
        ]);
        let config = AppConfig::from_args(args);
        assert_eq!(config.dataset(), &DatasetSource::File(PathBuf::from("idols.csv")));
        assert_eq!(config.log_path(), Path::new("out/app.log"));
        assert_eq!(config.initial_sort(), SortKey::Age);
    }

    #[test]
    fn unknown_sort_key_falls_back_to_name() {
        let args = Args::try_parse_from(["kpop-idol-finder", "--sort", "height"]).expect("parse");
        assert_eq!(args.sort, SortKey::Name);
    }

    #[test]
    fn ensure_filesystem_creates_log_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let log_file = dir.path().join("nested").join("logs").join("app.log");
        let config = AppConfig::from_args(Args::parse_from([
            OsStr::new("kpop-idol-finder"),
            OsStr::new("--log-file"),
            log_file.as_os_str(),
        ]));

        config.ensure_filesystem().expect("create dirs");
        assert!(log_file.parent().is_some_and(Path::is_dir));
    }
}
