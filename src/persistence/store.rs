//! Durable storage for the single save slot.

use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::core::error::Result;

/// One overwritable slot of bytes.
///
/// `read` distinguishes an empty slot (`Ok(None)`) from a failure.
pub trait SaveStore {
    /// Current slot contents, or `None` if nothing was saved.
    fn read(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the slot contents.
    fn write(&mut self, bytes: &[u8]) -> Result<()>;

    /// Empty the slot. Clearing an empty slot succeeds.
    fn clear(&mut self) -> Result<()>;
}

impl<T: SaveStore + ?Sized> SaveStore for Box<T> {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        (**self).read()
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write(bytes)
    }

    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }
}

/// A save slot backed by a file.
///
/// Writes go to a sibling `.tmp` file that is then renamed over the slot,
/// so a crash mid-write never leaves a truncated save.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$HOME/.config/<app>/<file>`, or `None` without a home directory.
    #[must_use]
    pub fn in_config_dir(app: &str, file: &str) -> Option<Self> {
        let home = std::env::var_os("HOME")?;
        Some(Self::new(PathBuf::from(home).join(".config").join(app).join(file)))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SaveStore for FileStore {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// An in-memory save slot.
///
/// Clones share the same slot, so a host or test can keep a handle to
/// inspect what the game wrote.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<Vec<u8>>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current slot contents.
    #[must_use]
    pub fn contents(&self) -> Option<Vec<u8>> {
        self.slot.borrow().clone()
    }
}

impl SaveStore for MemoryStore {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.slot.borrow().clone())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        *self.slot.borrow_mut() = Some(bytes.to_vec());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        *self.slot.borrow_mut() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("quantum-tiles-store-{}-{}", std::process::id(), name))
            .join("slot.json")
    }

    #[test]
    fn test_file_store_roundtrip() {
        let path = temp_path("roundtrip");
        let mut store = FileStore::new(&path);

        assert_eq!(store.read().unwrap(), None);
        store.write(b"first").unwrap();
        store.write(b"second").unwrap();
        assert_eq!(store.read().unwrap(), Some(b"second".to_vec()));
        assert!(!path.with_extension("tmp").exists());

        store.clear().unwrap();
        assert_eq!(store.read().unwrap(), None);
        store.clear().unwrap();

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_store_read_error_is_reported() {
        // A directory where the file should be.
        let path = temp_path("is-dir");
        fs::create_dir_all(&path).unwrap();
        let store = FileStore::new(&path);

        assert!(store.read().is_err());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_memory_store_clones_share_slot() {
        let mut store = MemoryStore::new();
        let observer = store.clone();

        store.write(b"abc").unwrap();
        assert_eq!(observer.contents(), Some(b"abc".to_vec()));

        store.clear().unwrap();
        assert_eq!(observer.read().unwrap(), None);
    }

    #[test]
    fn test_boxed_store() {
        let mut boxed: Box<dyn SaveStore> = Box::new(MemoryStore::new());
        boxed.write(b"x").unwrap();
        assert_eq!(boxed.read().unwrap(), Some(b"x".to_vec()));
    }
}
