use std::fmt;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use super::EventRecord;

/// The event log behind an aggregate: an id, the ordered events recorded
/// against it, and the bookkeeping needed to commit only what is new.
#[derive(Clone, Serialize, Deserialize)]
pub struct Entity {
    id: String,
    version: u64,
    events: Vec<EventRecord>,
    #[serde(skip, default)]
    replaying: bool,
    #[serde(skip, default)]
    committed_version: u64,
    timestamp: SystemTime,
}

impl Default for Entity {
    fn default() -> Self {
        Entity {
            id: String::new(),
            version: 0,
            events: Vec::new(),
            replaying: false,
            committed_version: 0,
            timestamp: SystemTime::now(),
        }
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("version", &self.version)
            .field("events", &self.events.len())
            .field("replaying", &self.replaying)
            .field("committed_version", &self.committed_version)
            .field("timestamp", &self.timestamp)
            .finish()
    }
}

impl Entity {
    pub fn new() -> Self {
        Entity::default()
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        let mut entity = Entity::default();
        entity.id = id.into();
        entity
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn committed_version(&self) -> u64 {
        self.committed_version
    }

    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    /// Returns events added since the entity was loaded (not yet persisted).
    pub fn new_events(&self) -> &[EventRecord] {
        &self.events[self.committed_version as usize..]
    }

    /// Mark all current events as committed. Called by repository after successful commit.
    pub fn mark_committed(&mut self) {
        self.committed_version = self.version;
    }

    /// Record an event with a serializable payload.
    /// The payload is serialized using bitcode for compact, fast storage.
    pub fn digest<T: Serialize>(&mut self, name: impl Into<String>, payload: &T) {
        if self.replaying {
            return;
        }

        let bytes = bitcode::serialize(payload).expect("failed to serialize payload");
        let sequence = self.events.len() as u64 + 1;
        self.events.push(EventRecord::new(name, bytes, sequence));
        self.version = self.events.len() as u64;
        self.timestamp = SystemTime::now();
    }

    /// Record an event with no payload.
    pub fn digest_empty(&mut self, name: impl Into<String>) {
        self.digest(name, &());
    }

    pub fn load_from_history(&mut self, history: Vec<EventRecord>) {
        self.events = history;
        self.version = self.events.len() as u64;
        self.committed_version = self.version;
        if let Some(last) = self.events.last() {
            self.timestamp = last.timestamp;
        }
    }

    pub fn is_replaying(&self) -> bool {
        self.replaying
    }

    pub fn set_replaying(&mut self, replaying: bool) {
        self.replaying = replaying;
    }
}
