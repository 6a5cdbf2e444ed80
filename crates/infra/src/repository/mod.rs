//! Document storage for planning results.
//!
//! Each planning document is stored whole under its identifier. Two backends
//! exist: an in-memory map for tests/dev and a directory of JSON files.

use std::sync::Arc;

use thiserror::Error;

pub mod in_memory;
pub mod json_file;

pub use in_memory::InMemoryRepository;
pub use json_file::JsonFileRepository;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("document already exists: {0}")]
    AlreadyExists(String),

    #[error("storage io failure: {0}")]
    Io(String),

    #[error("document serialization failed: {0}")]
    Serialization(String),

    #[error("storage lock poisoned")]
    LockPoisoned,
}

/// Keyed document store.
///
/// `list` returns documents ordered by key.
pub trait Repository<K, V>: Send + Sync {
    fn get(&self, key: &K) -> Result<Option<V>, RepositoryError>;

    /// Insert or replace.
    fn put(&self, key: K, value: V) -> Result<(), RepositoryError>;

    /// Insert only if `key` is absent; fails with [`RepositoryError::AlreadyExists`] otherwise.
    fn insert(&self, key: K, value: V) -> Result<(), RepositoryError>;

    fn list(&self, filter: &dyn Fn(&V) -> bool) -> Result<Vec<V>, RepositoryError>;
}

impl<K, V, S> Repository<K, V> for Arc<S>
where
    S: Repository<K, V> + ?Sized,
{
    fn get(&self, key: &K) -> Result<Option<V>, RepositoryError> {
        (**self).get(key)
    }

    fn put(&self, key: K, value: V) -> Result<(), RepositoryError> {
        (**self).put(key, value)
    }

    fn insert(&self, key: K, value: V) -> Result<(), RepositoryError> {
        (**self).insert(key, value)
    }

    fn list(&self, filter: &dyn Fn(&V) -> bool) -> Result<Vec<V>, RepositoryError> {
        (**self).list(filter)
    }
}
