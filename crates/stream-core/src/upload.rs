// File: crates/stream-core/src/upload.rs
// Summary: Single-file CSV upload: extension check, read as text, parse and hand the dataset over.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::config::SeriesConfig;
use crate::ingest::parse_with;
use crate::record::Dataset;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("{} is not a .csv file", .0.display())]
    NotCsv(PathBuf),
    #[error("reading {}: {source}", .path.display())]
    Read { path: PathBuf, #[source] source: std::io::Error },
}

/// True for a `.csv` extension, any letter case.
pub fn is_csv(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

/// Read `path` as text (invalid UTF-8 is replaced, not rejected) and parse it.
pub fn read_dataset(path: &Path, config: &SeriesConfig) -> Result<Dataset, UploadError> {
    let bytes = std::fs::read(path).map_err(|source| UploadError::Read { path: path.to_path_buf(), source })?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(parse_with(&text, config))
}

/// The upload form: one selected `.csv` file and a submit action.
pub struct CsvUpload {
    config: Arc<SeriesConfig>,
    selected: Option<PathBuf>,
}

impl CsvUpload {
    pub fn new(config: Arc<SeriesConfig>) -> Self {
        Self { config, selected: None }
    }

    pub fn selected(&self) -> Option<&Path> { self.selected.as_deref() }

    /// Choose the file to upload. A non-`.csv` path is refused and clears the selection.
    pub fn select(&mut self, path: impl Into<PathBuf>) -> Result<(), UploadError> {
        let path = path.into();
        if !is_csv(&path) {
            self.selected = None;
            return Err(UploadError::NotCsv(path));
        }
        self.selected = Some(path);
        Ok(())
    }

    /// Read and parse the selected file, then pass the fresh dataset to `set_data`.
    /// Returns `Ok(false)` without calling back when nothing is selected.
    pub fn submit<F>(&self, set_data: F) -> Result<bool, UploadError>
    where
        F: FnOnce(Arc<Dataset>),
    {
        let Some(path) = self.selected.as_deref() else { return Ok(false) };
        let dataset = read_dataset(path, &self.config)?;
        info!(path = %path.display(), records = dataset.len(), "loaded csv");
        set_data(Arc::new(dataset));
        Ok(true)
    }
}
