use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use crate::aggregate::{Aggregate, AggregateBuilder, AggregateRepository};
use crate::config::ServiceConfig;
use crate::queued::{Queueable, QueuedRepository};
use crate::repository::HashMapRepository;
use crate::scoring::{Match, MatchStatus, MatchView, NewMatch, ScoringError};

#[cfg(feature = "emitter")]
use crate::emitter::{MatchNotice, MatchNotifier};

use super::StoreError;

type MatchRepository = AggregateRepository<QueuedRepository<HashMapRepository>, Match>;

/// Owns the match event store and runs every mutation as one locked
/// load, apply, commit span.
pub struct MatchStore {
    repo: MatchRepository,
    ids: AtomicU64,
    config: ServiceConfig,
    #[cfg(feature = "emitter")]
    notifier: MatchNotifier,
}

impl Default for MatchStore {
    fn default() -> Self {
        Self::new(ServiceConfig::default())
    }
}

impl MatchStore {
    pub fn new(config: ServiceConfig) -> Self {
        MatchStore {
            repo: HashMapRepository::new().queued().aggregate::<Match>(),
            ids: AtomicU64::new(0),
            config,
            #[cfg(feature = "emitter")]
            notifier: MatchNotifier::new(),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Listeners for post-commit notices.
    #[cfg(feature = "emitter")]
    pub fn notifier(&self) -> &MatchNotifier {
        &self.notifier
    }

    pub fn create(&self, new: NewMatch) -> Result<MatchView, StoreError> {
        let id = self.ids.fetch_add(1, Ordering::SeqCst) + 1;
        let mut m = Match::create(id, new, self.config.max_team_name_len)?;
        self.repo.commit(&mut m)?;
        Ok(m.view())
    }

    /// Read a match without taking its lock.
    pub fn load(&self, id: u64, owner: Option<&str>) -> Result<MatchView, StoreError> {
        match self.repo.peek(&id.to_string())? {
            Some(m) if self.is_visible(&m, owner) => Ok(m.view()),
            _ => Err(StoreError::not_found(id)),
        }
    }

    /// Matches visible to `owner`, oldest first.
    pub fn list(
        &self,
        owner: Option<&str>,
        status: Option<MatchStatus>,
    ) -> Result<Vec<MatchView>, StoreError> {
        let mut found = self.repo.find(|m: &Match| {
            self.is_visible(m, owner) && status.map_or(true, |s| m.status() == s)
        })?;
        found.sort_by_key(|m| m.id());
        Ok(found.iter().map(Match::view).collect())
    }

    /// Apply `op` to match `id` while holding its lock.
    ///
    /// The change is committed only if `op` succeeds; any failure releases
    /// the lock without writing.
    pub fn update<T, F>(
        &self,
        id: u64,
        owner: Option<&str>,
        op: F,
    ) -> Result<(T, MatchView), StoreError>
    where
        F: FnOnce(&mut Match) -> Result<T, ScoringError>,
    {
        let key = id.to_string();
        // Matches are never removed, so an id with no history stays unknown
        // and must not get a lock entry of its own.
        if self.repo.peek(&key)?.is_none() {
            return Err(StoreError::not_found(id));
        }

        let loaded = match self.repo.get(&key) {
            Ok(loaded) => loaded,
            Err(err) => {
                warn!(match_id = id, error = %err, "failed to load match");
                self.repo.abort_id(&key)?;
                return Err(err.into());
            }
        };

        let mut m = match loaded {
            Some(m) if self.is_visible(&m, owner) => m,
            _ => {
                self.repo.abort_id(&key)?;
                return Err(StoreError::not_found(id));
            }
        };

        #[cfg(feature = "emitter")]
        let before = m.view();

        let value = match op(&mut m) {
            Ok(value) => value,
            Err(err) => {
                warn!(match_id = id, kind = err.kind(), error = %err, "operation rejected");
                self.repo.abort(&m)?;
                return Err(err.into());
            }
        };

        if let Err(err) = self.repo.commit(&mut m) {
            warn!(match_id = id, error = %err, "commit failed");
            self.repo.abort(&m)?;
            return Err(err.into());
        }
        debug!(match_id = id, version = m.entity().version(), "match committed");

        let after = m.view();
        #[cfg(feature = "emitter")]
        self.notifier.publish(&MatchNotice::between(&before, &after));

        Ok((value, after))
    }

    fn is_visible(&self, m: &Match, owner: Option<&str>) -> bool {
        !m.is_deleted() && (!self.config.owner_scoped || m.is_visible_to(owner))
    }
}
