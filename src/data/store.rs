use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::{DataError, Result};
use super::loader::parse_table;
use super::model::{DatasetKind, Table};

// ---------------------------------------------------------------------------
// Read primitive
// ---------------------------------------------------------------------------

/// Where file bytes come from. The store never touches the filesystem
/// directly, so reads can be counted or faked.
pub trait SheetSource {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Reads straight from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSource;

impl SheetSource for FsSource {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

// ---------------------------------------------------------------------------
// Load policy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadMode {
    /// Each file is read once and kept for the rest of the process.
    #[default]
    Cached,
    /// Every page entry reads its files again.
    Fresh,
}

impl LoadMode {
    pub fn label(self) -> &'static str {
        match self {
            LoadMode::Cached => "cached",
            LoadMode::Fresh => "fresh reads",
        }
    }
}

// ---------------------------------------------------------------------------
// DataStore
// ---------------------------------------------------------------------------

/// Loads the dashboard's datasets from `data_dir`, memoised by full path.
///
/// Cached tables are never evicted; only [`DataStore::clear`] and
/// [`DataStore::set_data_dir`] drop them.
pub struct DataStore<S: SheetSource = FsSource> {
    source: S,
    data_dir: PathBuf,
    mode: LoadMode,
    cache: HashMap<PathBuf, Arc<Table>>,
}

impl DataStore<FsSource> {
    pub fn new(data_dir: impl Into<PathBuf>, mode: LoadMode) -> Self {
        Self::with_source(FsSource, data_dir, mode)
    }
}

impl<S: SheetSource> DataStore<S> {
    pub fn with_source(source: S, data_dir: impl Into<PathBuf>, mode: LoadMode) -> Self {
        Self {
            source,
            data_dir: data_dir.into(),
            mode,
            cache: HashMap::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn mode(&self) -> LoadMode {
        self.mode
    }

    #[cfg(test)]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Number of tables currently memoised.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Point the store at another directory and forget everything loaded.
    pub fn set_data_dir(&mut self, dir: impl Into<PathBuf>) {
        self.data_dir = dir.into();
        self.clear();
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Load one of the dashboard's datasets and check its declared columns.
    pub fn load(&mut self, kind: DatasetKind) -> Result<Arc<Table>> {
        let path = kind.path_in(&self.data_dir);
        let table = self.load_path(&path)?;
        table.require_columns(kind.required_columns())?;
        Ok(table)
    }

    /// Load an arbitrary tabular file, honouring the load mode.
    pub fn load_path(&mut self, path: &Path) -> Result<Arc<Table>> {
        if self.mode == LoadMode::Cached {
            if let Some(table) = self.cache.get(path) {
                log::info!("Cache hit for {}", path.display());
                return Ok(Arc::clone(table));
            }
        }

        let bytes = self.source.read(path).map_err(|source| DataError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Arc::new(parse_table(path, bytes)?);
        log::info!(
            "Loaded {} ({} rows, columns {:?})",
            path.display(),
            table.len(),
            table.columns
        );
        if table.is_empty() {
            log::warn!("{} has a header but no data rows", path.display());
        }

        if self.mode == LoadMode::Cached {
            self.cache.insert(path.to_path_buf(), Arc::clone(&table));
        }
        Ok(table)
    }
}
