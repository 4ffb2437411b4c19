//! In-memory filesystem adapter for testing.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use scaffold_core::{
    application::{ApplicationError, ports::Filesystem},
    error::ScaffoldResult,
};

/// In-memory filesystem for testing. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    files: Arc<RwLock<BTreeMap<PathBuf, String>>>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file (testing helper).
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        if let Ok(mut files) = self.files.write() {
            files.insert(path.into(), content.into());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        self.files.read().ok()?.get(path).cloned()
    }

    /// Every stored path.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files
            .read()
            .map(|files| files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn not_found(path: &Path) -> ApplicationError {
        ApplicationError::FilesystemError {
            path: path.to_path_buf(),
            reason: "No such file".into(),
        }
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.files
            .read()
            .map(|files| {
                files.contains_key(path) || files.keys().any(|p| p.starts_with(path))
            })
            .unwrap_or(false)
    }

    fn read_to_string(&self, path: &Path) -> ScaffoldResult<String> {
        let files = self
            .files
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        files
            .get(path)
            .cloned()
            .ok_or_else(|| Self::not_found(path).into())
    }

    fn write_file(&self, path: &Path, content: &str) -> ScaffoldResult<()> {
        let mut files = self
            .files
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        files.insert(path.to_path_buf(), content.to_owned());
        Ok(())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> ScaffoldResult<()> {
        let mut files = self
            .files
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        let content = files.get(from).cloned().ok_or_else(|| Self::not_found(from))?;
        files.insert(to.to_path_buf(), content);
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> ScaffoldResult<()> {
        let mut files = self
            .files
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(path).into())
    }

    fn list_files(&self, dir: &Path) -> ScaffoldResult<Vec<String>> {
        let files = self
            .files
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(files
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .filter_map(|p| p.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect())
    }
}
