use std::fmt;
use std::marker::PhantomData;

use tracing::debug;

use crate::entity::{Entity, EventRecord};
use crate::queued::{QueuedRepository, ReadOpts, Unlock};
use crate::lock::LockManager;
use crate::repository::{Commit, Find, Get, RepositoryError};

/// Trait for domain aggregates that can be event-sourced.
pub trait Aggregate: Sized + Default {
    type ReplayError: fmt::Display;

    fn new_empty() -> Self {
        Self::default()
    }
    fn entity(&self) -> &Entity;
    fn entity_mut(&mut self) -> &mut Entity;
    fn replay_event(&mut self, event: &EventRecord) -> Result<(), Self::ReplayError>;
}

#[macro_export]
macro_rules! impl_aggregate {
    ($ty:ty, $entity:ident, $replay:ident) => {
        $crate::impl_aggregate!($ty, $entity, $replay, String);
    };
    ($ty:ty, $entity:ident, $replay:ident, $err:ty) => {
        impl $crate::Aggregate for $ty {
            type ReplayError = $err;

            fn entity(&self) -> &$crate::Entity {
                &self.$entity
            }

            fn entity_mut(&mut self) -> &mut $crate::Entity {
                &mut self.$entity
            }

            fn replay_event(
                &mut self,
                event: &$crate::EventRecord,
            ) -> Result<(), Self::ReplayError> {
                Self::$replay(self, event)
            }
        }
    };
}

/// Hydrate an aggregate from an entity by replaying its events.
pub fn hydrate<A: Aggregate>(entity: Entity) -> Result<A, RepositoryError> {
    let mut agg = A::new_empty();
    *agg.entity_mut() = entity;

    let events = agg.entity().events().to_vec();
    debug!(entity_id = agg.entity().id(), events = events.len(), "replaying aggregate");

    agg.entity_mut().set_replaying(true);
    for event in &events {
        if let Err(err) = agg.replay_event(event) {
            agg.entity_mut().set_replaying(false);
            return Err(RepositoryError::Replay(format!(
                "{} #{}: {}",
                event.event_name, event.sequence, err
            )));
        }
    }
    agg.entity_mut().set_replaying(false);

    Ok(agg)
}

/// Builder trait for creating typed aggregate repositories.
pub trait AggregateBuilder: Sized {
    fn aggregate<A: Aggregate>(self) -> AggregateRepository<Self, A> {
        AggregateRepository::new(self)
    }
}

impl<T> AggregateBuilder for T {}

/// A repository wrapper that provides typed access to a specific aggregate type.
pub struct AggregateRepository<R, A> {
    repo: R,
    _marker: PhantomData<A>,
}

impl<R, A> AggregateRepository<R, A> {
    pub fn new(repo: R) -> Self {
        AggregateRepository {
            repo,
            _marker: PhantomData,
        }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }
}

impl<R, A> AggregateRepository<R, A>
where
    R: Get,
    A: Aggregate,
{
    pub fn get(&self, id: &str) -> Result<Option<A>, RepositoryError> {
        let Some(entity) = self.repo.get(id)? else {
            return Ok(None);
        };
        Ok(Some(hydrate::<A>(entity)?))
    }
}

impl<R, A> AggregateRepository<R, A>
where
    R: Commit,
    A: Aggregate,
{
    pub fn commit(&self, aggregate: &mut A) -> Result<(), RepositoryError> {
        self.repo.commit(aggregate.entity_mut())
    }
}

impl<R, A> AggregateRepository<R, A>
where
    R: Find,
    A: Aggregate,
{
    /// Find all aggregates matching a predicate.
    pub fn find<F>(&self, predicate: F) -> Result<Vec<A>, RepositoryError>
    where
        F: Fn(&A) -> bool,
    {
        let entities = self.repo.find(|_| true)?;
        let mut results = Vec::new();
        for entity in entities {
            let agg = hydrate::<A>(entity)?;
            if predicate(&agg) {
                results.push(agg);
            }
        }
        Ok(results)
    }
}

impl<R, A> AggregateRepository<R, A>
where
    R: Unlock,
    A: Aggregate,
{
    /// Release the lock taken by `get` without committing.
    pub fn abort(&self, aggregate: &A) -> Result<(), RepositoryError> {
        self.repo.unlock(aggregate.entity().id())
    }

    /// Release the lock on `id`, for reads that found nothing to hydrate.
    pub fn abort_id(&self, id: &str) -> Result<(), RepositoryError> {
        self.repo.unlock(id)
    }
}

impl<R, L, A> AggregateRepository<QueuedRepository<R, L>, A>
where
    R: Get,
    L: LockManager,
    A: Aggregate,
{
    /// Non-locking read.
    pub fn peek(&self, id: &str) -> Result<Option<A>, RepositoryError> {
        let Some(entity) = self.repo.get_with(id, ReadOpts::no_lock())? else {
            return Ok(None);
        };
        Ok(Some(hydrate::<A>(entity)?))
    }
}
