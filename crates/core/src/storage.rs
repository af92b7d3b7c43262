//! Cart persistence port.
//!
//! The cart store talks to durable storage only through [`CartStorage`], so
//! tests can run against [`MemoryStorage`] and alternate backends can be
//! substituted without touching mutation logic.

use thiserror::Error;

use crate::cart::CartLine;

/// Errors surfaced by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the underlying store failed.
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The cart could not be serialized for storage.
    #[error("serialization error: {0}")]
    Serialize(String),
}

/// Durable storage for the cart line list.
pub trait CartStorage {
    /// Load the persisted line list.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backend cannot be read. A corrupt
    /// or foreign stored value is not an error; backends degrade it to an
    /// empty list instead.
    fn load(&self) -> Result<Vec<CartLine>, StorageError>;

    /// Replace the persisted line list.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backend cannot be written.
    fn save(&mut self, lines: &[CartLine]) -> Result<(), StorageError>;
}

/// In-memory cart storage for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    lines: Vec<CartLine>,
}

impl MemoryStorage {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend seeded with previously persisted lines.
    #[must_use]
    pub fn with_lines(lines: impl Into<Vec<CartLine>>) -> Self {
        Self {
            lines: lines.into(),
        }
    }

    /// The lines as last persisted.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Result<Vec<CartLine>, StorageError> {
        Ok(self.lines.clone())
    }

    fn save(&mut self, lines: &[CartLine]) -> Result<(), StorageError> {
        self.lines = lines.to_vec();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    fn line(product_id: u64) -> CartLine {
        CartLine {
            product_id,
            name: "Away Jersey".to_owned(),
            price: Decimal::from(250),
            quantity: 3,
            stock: 0,
            image: None,
        }
    }

    #[test]
    fn memory_storage_round_trips() -> TestResult {
        let mut storage = MemoryStorage::new();

        storage.save(&[line(1), line(2)])?;

        assert_eq!(storage.load()?, vec![line(1), line(2)]);

        Ok(())
    }

    #[test]
    fn memory_storage_save_replaces_previous_lines() -> TestResult {
        let mut storage = MemoryStorage::with_lines([line(1)]);

        storage.save(&[line(2)])?;

        assert_eq!(storage.lines(), [line(2)]);

        Ok(())
    }

    #[test]
    fn memory_storage_starts_empty() -> TestResult {
        let storage = MemoryStorage::new();

        assert!(storage.load()?.is_empty());

        Ok(())
    }
}
