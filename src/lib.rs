mod aggregate;
pub mod config;
pub mod emitter;
mod entity;
pub mod handlers;
mod lock;
pub mod microsvc;
mod queued;
mod repository;
pub mod rules;
pub mod scoring;
pub mod store;

pub use aggregate::{hydrate, Aggregate, AggregateBuilder, AggregateRepository};
pub use config::{ConfigError, ServiceConfig};
pub use entity::{Committable, Entity, EventRecord, PayloadError};
pub use lock::{InMemoryLock, InMemoryLockManager, Lock, LockError, LockManager};
pub use queued::{Queueable, QueuedRepository, ReadOpts, Unlock};
pub use repository::{Commit, Find, Get, HashMapRepository, Repository, RepositoryError};
pub use scoring::{
    Match, MatchEvent, MatchStatus, MatchView, NewMatch, PendingUndo, PointOutcome,
    ScoringError, SetEditOutcome, SetScore, Team, UndoOutcome,
};
pub use store::{MatchStore, StoreError};

#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
