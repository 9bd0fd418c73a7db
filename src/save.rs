//! File-backed save slot
//!
//! Each key is one JSON file under `<data dir>/gladiator/saves`.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use gladiator_game::{MemoryStorage, SaveError, SaveStorage};
use tracing::warn;

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage in the platform data directory
    pub fn new() -> Result<Self, SaveError> {
        let dir = dirs::data_local_dir()
            .ok_or_else(|| SaveError::Unavailable("no data directory".into()))?
            .join("gladiator")
            .join("saves");
        Ok(Self::in_dir(dir))
    }

    pub fn in_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_filename(key)))
    }
}

/// The file slot when it can be located; otherwise an in-memory slot so the
/// game still runs, without persistence
pub fn storage_or_memory(storage: Result<FileStorage, SaveError>) -> Box<dyn SaveStorage> {
    match storage {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            warn!(error = %e, "Save storage unavailable; progress will not persist");
            Box::new(MemoryStorage::new())
        }
    }
}

/// Sanitize a key into a valid filename
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect::<String>()
        .to_lowercase()
}

impl SaveStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, SaveError> {
        match fs::read_to_string(self.path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, key: &str, data: &str) -> Result<(), SaveError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(key), data)?;
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), SaveError> {
        match fs::remove_file(self.path(key)) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gladiator_game::SAVE_KEY;

    fn temp_storage(name: &str) -> FileStorage {
        let dir = std::env::temp_dir()
            .join(format!("gladiator-save-test-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        FileStorage::in_dir(dir)
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("galactic-gladiator-save"), "galactic-gladiator-save");
        assert_eq!(sanitize_filename("My Save/1"), "my_save_1");
    }

    #[test]
    fn test_unavailable_storage_falls_back_to_memory() {
        let mut storage = storage_or_memory(Err(SaveError::Unavailable("no data directory".into())));
        assert!(storage.read(SAVE_KEY).unwrap().is_none());

        storage.write(SAVE_KEY, "{}").unwrap();
        assert_eq!(storage.read(SAVE_KEY).unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_file_round_trip() {
        let mut storage = temp_storage("round-trip");
        assert!(storage.read(SAVE_KEY).unwrap().is_none());

        storage.write(SAVE_KEY, "{\"version\":1}").unwrap();
        assert_eq!(storage.read(SAVE_KEY).unwrap().as_deref(), Some("{\"version\":1}"));

        storage.delete(SAVE_KEY).unwrap();
        assert!(storage.read(SAVE_KEY).unwrap().is_none());
        storage.delete(SAVE_KEY).unwrap();
    }
}
