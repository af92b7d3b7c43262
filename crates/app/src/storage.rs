//! File-backed cart storage.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use dink::{
    cart::CartLine,
    storage::{CartStorage, StorageError},
};
use serde_json::Value;
use tracing::debug;

/// Cart storage backed by a single JSON file.
///
/// The file carries the storefront's array-of-line-objects layout; a
/// document exported from the web client's browser storage reads back
/// cleanly (its numeric prices and our decimal strings both parse). A
/// corrupt or foreign file must degrade to an empty cart rather than fail
/// the session, and elements that fail the shape check (numeric
/// `productId` and `quantity`, string `name`, decimal `price`) are
/// dropped individually.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStorage for JsonFileStorage {
    fn load(&self) -> Result<Vec<CartLine>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(StorageError::Io(error)),
        };

        let Ok(Value::Array(entries)) = serde_json::from_str::<Value>(&raw) else {
            debug!(path = %self.path.display(), "cart file is not a JSON sequence, starting empty");
            return Ok(Vec::new());
        };

        let lines = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect();

        Ok(lines)
    }

    fn save(&mut self, lines: &[CartLine]) -> Result<(), StorageError> {
        let payload = serde_json::to_string(lines)
            .map_err(|error| StorageError::Serialize(error.to_string()))?;

        // Write-then-rename so a crash mid-save cannot truncate the cart.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &self.path)?;

        Ok(())
    }
}
