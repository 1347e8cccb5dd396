//! Generic compressed key-value store with explicit load state
//!
//! A store is loaded exactly once, mutated in memory and written back by an
//! explicit [`PersistentStore::save`]. The on-disk form is JSON wrapped in raw
//! DEFLATE: field names travel with the data, unknown fields are ignored on
//! read and missing fields fall back to their defaults.
//!
//! JSON is used instead of a binary tagged format: the stored mappings hold
//! a handful of ids and tokens, so after compression the size difference
//! is negligible. Forward compatibility comes from field names rather than
//! numeric tags.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::{StoreError, StoreResult};

/// A mapping that can be persisted by [`PersistentStore`]
pub trait StoreKind: Serialize + DeserializeOwned + Default {
    /// Name used in errors and logs
    const KIND: &'static str;
}

#[derive(Debug)]
enum StoreState<T> {
    NotLoaded,
    Loaded { path: PathBuf, data: T },
}

/// Load-once, save-after-load persistent store
#[derive(Debug)]
pub struct PersistentStore<T> {
    state: StoreState<T>,
}

impl<T: StoreKind> PersistentStore<T> {
    /// Create an unloaded store
    pub fn new() -> Self {
        Self {
            state: StoreState::NotLoaded,
        }
    }

    /// Load the store from `path`, or start empty if the file does not exist
    ///
    /// The path is remembered for [`save`](Self::save). Fails if the store is
    /// already loaded.
    pub fn load(&mut self, path: impl AsRef<Path>) -> StoreResult<()> {
        if self.is_loaded() {
            return Err(StoreError::AlreadyLoaded { kind: T::KIND });
        }

        let path = path.as_ref().to_path_buf();
        let data = if path.exists() {
            let data = read_compressed::<T>(&path)?;
            info!("Loaded {} store from {}", T::KIND, path.display());
            data
        } else {
            debug!(
                "No {} store at {}, starting empty",
                T::KIND,
                path.display()
            );
            T::default()
        };

        self.state = StoreState::Loaded { path, data };
        Ok(())
    }

    /// Write the whole mapping back to the path it was loaded from
    ///
    /// The previous file content is truncated and replaced in place.
    pub fn save(&self) -> StoreResult<()> {
        let StoreState::Loaded { path, data } = &self.state else {
            return Err(StoreError::NotLoaded { kind: T::KIND });
        };

        write_compressed(path, data)?;
        debug!("Saved {} store to {}", T::KIND, path.display());
        Ok(())
    }

    pub fn get(&self) -> StoreResult<&T> {
        match &self.state {
            StoreState::Loaded { data, .. } => Ok(data),
            StoreState::NotLoaded => Err(StoreError::NotLoaded { kind: T::KIND }),
        }
    }

    pub fn get_mut(&mut self) -> StoreResult<&mut T> {
        match &mut self.state {
            StoreState::Loaded { data, .. } => Ok(data),
            StoreState::NotLoaded => Err(StoreError::NotLoaded { kind: T::KIND }),
        }
    }

    /// Path the store was loaded from
    pub fn path(&self) -> Option<&Path> {
        match &self.state {
            StoreState::Loaded { path, .. } => Some(path),
            StoreState::NotLoaded => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, StoreState::Loaded { .. })
    }

    /// Drop the in-memory mapping without saving, allowing a fresh load
    pub fn reset(&mut self) {
        self.state = StoreState::NotLoaded;
    }
}

impl<T: StoreKind> Default for PersistentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn read_compressed<T: StoreKind>(path: &Path) -> StoreResult<T> {
    let file = File::open(path).map_err(|source| io_error::<T>(path, source))?;
    let decoder = DeflateDecoder::new(BufReader::new(file));

    serde_json::from_reader(decoder).map_err(|source| StoreError::Encoding {
        kind: T::KIND,
        path: path.to_path_buf(),
        source,
    })
}

fn write_compressed<T: StoreKind>(path: &Path, data: &T) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| io_error::<T>(path, source))?;
    }

    let file = File::create(path).map_err(|source| io_error::<T>(path, source))?;
    let mut encoder = DeflateEncoder::new(BufWriter::new(file), Compression::default());

    serde_json::to_writer(&mut encoder, data).map_err(|source| StoreError::Encoding {
        kind: T::KIND,
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = encoder
        .finish()
        .map_err(|source| io_error::<T>(path, source))?;
    writer
        .flush()
        .map_err(|source| io_error::<T>(path, source))
}

fn io_error<T: StoreKind>(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        kind: T::KIND,
        path: path.to_path_buf(),
        source,
    }
}
