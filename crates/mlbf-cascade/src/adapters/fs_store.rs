//! Filesystem artifact store
//!
//! Layout: `<root>/<generation id>/<artifact name>`. Writes go to a temp
//! file that is synced and renamed into place; a failed write removes the
//! temp file.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::domain::{GenerationId, MlbfConfig};
use crate::error::StoreError;
use crate::ports::ArtifactStore;

/// Directory-backed artifact store
pub struct FsArtifactStore {
    root: PathBuf,
}

impl FsArtifactStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Store rooted at the configured `storage_root`
    pub fn from_config(config: &MlbfConfig) -> Self {
        Self::new(&config.storage_root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, id: &GenerationId, name: &str) -> PathBuf {
        self.root.join(id.as_str()).join(name)
    }

    fn io_error(path: &Path, err: std::io::Error) -> StoreError {
        if err.kind() == ErrorKind::NotFound {
            StoreError::NotFound {
                path: path.display().to_string(),
            }
        } else {
            StoreError::Io {
                path: path.display().to_string(),
                message: err.to_string(),
            }
        }
    }

    fn write_temp(temp_path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        let mut file = fs::File::create(temp_path).map_err(|e| Self::io_error(temp_path, e))?;
        file.write_all(bytes).map_err(|e| Self::io_error(temp_path, e))?;
        file.sync_all().map_err(|e| Self::io_error(temp_path, e))
    }

    /// Persist the rename itself
    #[cfg(unix)]
    fn sync_dir(dir: &Path) -> Result<(), StoreError> {
        fs::File::open(dir)
            .and_then(|d| d.sync_all())
            .map_err(|e| Self::io_error(dir, e))
    }

    #[cfg(not(unix))]
    fn sync_dir(_dir: &Path) -> Result<(), StoreError> {
        Ok(())
    }
}

impl ArtifactStore for FsArtifactStore {
    fn write(&self, id: &GenerationId, name: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.path(id, name);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Self::io_error(parent, e))?;
        }

        let temp_path = path.with_file_name(format!("{name}.tmp"));
        let result = Self::write_temp(&temp_path, bytes)
            .and_then(|()| fs::rename(&temp_path, &path).map_err(|e| Self::io_error(&path, e)));
        if let Err(e) = result {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                if cleanup.kind() != ErrorKind::NotFound {
                    warn!(
                        path = %temp_path.display(),
                        error = %cleanup,
                        "Failed to remove temp file"
                    );
                }
            }
            return Err(e);
        }

        if let Some(parent) = path.parent() {
            Self::sync_dir(parent)?;
        }

        debug!(path = %path.display(), bytes = bytes.len(), "Renamed artifact into place");
        Ok(())
    }

    fn remove(&self, id: &GenerationId, name: &str) -> Result<(), StoreError> {
        let path = self.path(id, name);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(&path, e)),
        }
    }

    fn read(&self, id: &GenerationId, name: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.path(id, name);
        fs::read(&path).map_err(|e| Self::io_error(&path, e))
    }

    fn exists(&self, id: &GenerationId, name: &str) -> Result<bool, StoreError> {
        let path = self.path(id, name);
        path.try_exists().map_err(|e| Self::io_error(&path, e))
    }

    fn location(&self, id: &GenerationId, name: &str) -> String {
        self.path(id, name).display().to_string()
    }
}
