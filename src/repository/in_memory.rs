use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::warn;

use crate::entity::{Committable, Entity, EventRecord};

use super::{Commit, Find, Get, RepositoryError};

/// In-memory event store: one append-only event list per entity id.
///
/// Commits are optimistic: an entity may only append if the stored log still
/// has the length it had when the entity was loaded.
#[derive(Clone, Default)]
pub struct HashMapRepository {
    storage: Arc<RwLock<HashMap<String, Vec<EventRecord>>>>,
}

impl HashMapRepository {
    pub fn new() -> Self {
        HashMapRepository {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn load(id: &str, events: &[EventRecord]) -> Entity {
        let mut entity = Entity::with_id(id);
        entity.load_from_history(events.to_vec());
        entity
    }
}

impl Get for HashMapRepository {
    fn get(&self, id: &str) -> Result<Option<Entity>, RepositoryError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| RepositoryError::LockPoisoned("read"))?;

        Ok(storage.get(id).map(|events| Self::load(id, events)))
    }
}

impl Find for HashMapRepository {
    fn find<F>(&self, predicate: F) -> Result<Vec<Entity>, RepositoryError>
    where
        F: Fn(&Entity) -> bool,
    {
        let storage = self
            .storage
            .read()
            .map_err(|_| RepositoryError::LockPoisoned("read"))?;

        Ok(storage
            .iter()
            .map(|(id, events)| Self::load(id, events))
            .filter(|entity| predicate(entity))
            .collect())
    }
}

impl Commit for HashMapRepository {
    fn commit<C: Committable + ?Sized>(&self, committable: &mut C) -> Result<(), RepositoryError> {
        let mut entities = committable.entities_mut();
        let mut storage = self
            .storage
            .write()
            .map_err(|_| RepositoryError::LockPoisoned("write"))?;

        for entity in entities.iter() {
            let stored = storage.get(entity.id()).map(|e| e.len() as u64).unwrap_or(0);
            if stored != entity.committed_version() {
                warn!(
                    entity_id = entity.id(),
                    expected = entity.committed_version(),
                    actual = stored,
                    "rejecting stale commit"
                );
                return Err(RepositoryError::ConcurrentWrite {
                    id: entity.id().to_string(),
                    expected: entity.committed_version(),
                    actual: stored,
                });
            }
        }

        for entity in entities.iter_mut() {
            storage
                .entry(entity.id().to_string())
                .or_default()
                .extend(entity.new_events().iter().cloned());
            entity.mark_committed();
        }

        Ok(())
    }
}
