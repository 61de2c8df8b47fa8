use crate::entity::{Committable, Entity};

use super::error::RepositoryError;

/// Load a single entity by id.
pub trait Get {
    fn get(&self, id: &str) -> Result<Option<Entity>, RepositoryError>;
}

/// Find all entities matching a predicate.
pub trait Find {
    fn find<F>(&self, predicate: F) -> Result<Vec<Entity>, RepositoryError>
    where
        F: Fn(&Entity) -> bool;
}

/// Commit one or more entities.
pub trait Commit {
    fn commit<C: Committable + ?Sized>(&self, committable: &mut C) -> Result<(), RepositoryError>;
}

/// Full repository trait combining all capabilities.
pub trait Repository: Get + Find + Commit {}

impl<T> Repository for T where T: Get + Find + Commit {}
