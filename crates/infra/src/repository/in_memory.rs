use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt::Display;
use std::sync::RwLock;

use super::{Repository, RepositoryError};

/// In-memory document store for tests/dev.
#[derive(Debug)]
pub struct InMemoryRepository<K, V> {
    inner: RwLock<BTreeMap<K, V>>,
}

impl<K, V> InMemoryRepository<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<K, V> Default for InMemoryRepository<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Repository<K, V> for InMemoryRepository<K, V>
where
    K: Ord + Display + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, key: &K) -> Result<Option<V>, RepositoryError> {
        let map = self.inner.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(map.get(key).cloned())
    }

    fn put(&self, key: K, value: V) -> Result<(), RepositoryError> {
        let mut map = self.inner.write().map_err(|_| RepositoryError::LockPoisoned)?;
        map.insert(key, value);
        Ok(())
    }

    fn insert(&self, key: K, value: V) -> Result<(), RepositoryError> {
        let mut map = self.inner.write().map_err(|_| RepositoryError::LockPoisoned)?;
        match map.entry(key) {
            Entry::Occupied(e) => Err(RepositoryError::AlreadyExists(e.key().to_string())),
            Entry::Vacant(e) => {
                e.insert(value);
                Ok(())
            }
        }
    }

    fn list(&self, filter: &dyn Fn(&V) -> bool) -> Result<Vec<V>, RepositoryError> {
        let map = self.inner.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(map.values().filter(|v| filter(v)).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_replaces_and_list_is_key_ordered() {
        let repo: InMemoryRepository<String, u32> = InMemoryRepository::new();
        repo.put("b".to_string(), 2).unwrap();
        repo.put("a".to_string(), 1).unwrap();
        repo.put("b".to_string(), 3).unwrap();

        assert_eq!(repo.get(&"b".to_string()).unwrap(), Some(3));
        assert_eq!(repo.get(&"zz".to_string()).unwrap(), None);
        assert_eq!(repo.list(&|_| true).unwrap(), vec![1, 3]);
        assert_eq!(repo.list(&|v| *v > 1).unwrap(), vec![3]);
    }

    #[test]
    fn insert_refuses_existing_key() {
        let repo: InMemoryRepository<String, u32> = InMemoryRepository::new();
        repo.insert("MR-1".to_string(), 1).unwrap();
        let err = repo.insert("MR-1".to_string(), 2).unwrap_err();
        assert_eq!(err, RepositoryError::AlreadyExists("MR-1".to_string()));
        assert_eq!(repo.get(&"MR-1".to_string()).unwrap(), Some(1));
    }

    #[test]
    fn usable_through_arc_trait_object() {
        let repo: std::sync::Arc<dyn Repository<String, u32>> =
            std::sync::Arc::new(InMemoryRepository::new());
        repo.put("k".to_string(), 7).unwrap();
        assert_eq!(repo.get(&"k".to_string()).unwrap(), Some(7));
    }
}
