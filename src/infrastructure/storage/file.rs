use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{KeyValueStore, StorageError, StorageResult};

/// Keeps every key as `<directory>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_owned(),
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let write_error = |source| StorageError::Write {
            key: key.to_owned(),
            source,
        };

        fs::create_dir_all(&self.directory).map_err(write_error)?;

        // Readers only ever see the previous or the new document.
        let staging = self.directory.join(format!(".{key}.json.tmp"));
        fs::write(&staging, value).map_err(write_error)?;
        fs::rename(&staging, self.path(key)).map_err(write_error)?;

        debug!(key, bytes = value.len(), "stored value");

        Ok(())
    }
}
