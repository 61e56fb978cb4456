//! Storage boundary for collections.

use crate::types::Collection;
use std::collections::BTreeMap;
use std::convert::Infallible;

/// Keyed store of collections.
///
/// `set` inserts when the collection has no id and replaces otherwise;
/// the returned id is the key it was stored under. Errors are passed to the
/// caller unchanged.
pub trait CollectionStore {
    type Error: std::error::Error + Send + Sync + 'static;

    fn get(&self, id: i64) -> Result<Option<Collection>, Self::Error>;
    fn set(&mut self, collection: &Collection) -> Result<i64, Self::Error>;
    fn delete(&mut self, id: i64) -> Result<(), Self::Error>;
    fn get_all(&self) -> Result<Vec<Collection>, Self::Error>;
    fn clear(&mut self) -> Result<(), Self::Error>;
}

/// In-memory store with auto-incrementing ids starting at 1.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    collections: BTreeMap<i64, Collection>,
    next_id: i64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            collections: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next generated id. Once the generator is pinned at `i64::MAX`,
    /// the lowest unused positive id is handed out instead.
    fn fresh_id(&self) -> i64 {
        if !self.collections.contains_key(&self.next_id) {
            return self.next_id;
        }
        (1..i64::MAX)
            .find(|id| !self.collections.contains_key(id))
            .unwrap_or(self.next_id)
    }
}

impl CollectionStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, id: i64) -> Result<Option<Collection>, Self::Error> {
        Ok(self.collections.get(&id).cloned())
    }

    fn set(&mut self, collection: &Collection) -> Result<i64, Self::Error> {
        let id = match collection.id {
            Some(id) => id,
            None => self.fresh_id(),
        };
        // Explicit ids push the generator forward.
        self.next_id = self.next_id.max(id.saturating_add(1));

        let mut stored = collection.clone();
        stored.id = Some(id);
        self.collections.insert(id, stored);
        Ok(id)
    }

    fn delete(&mut self, id: i64) -> Result<(), Self::Error> {
        self.collections.remove(&id);
        Ok(())
    }

    fn get_all(&self) -> Result<Vec<Collection>, Self::Error> {
        Ok(self.collections.values().cloned().collect())
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.collections.clear();
        Ok(())
    }
}
