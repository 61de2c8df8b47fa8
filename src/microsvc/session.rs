//! Session variables forwarded with each command.

use std::collections::HashMap;

pub const USER_ID: &str = "x-user-id";
pub const GUEST_SESSION_ID: &str = "x-guest-session-id";

/// Parsed session variables from the incoming request.
///
/// A signed-in caller carries `x-user-id`; an anonymous one carries
/// `x-guest-session-id`:
///
/// ```json
/// { "x-user-id": "42" }
/// { "x-guest-session-id": "5f0c9a" }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    variables: HashMap<String, String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(variables: HashMap<String, String>) -> Self {
        Self { variables }
    }

    pub fn user(id: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.set(USER_ID, id);
        session
    }

    pub fn guest(session_id: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.set(GUEST_SESSION_ID, session_id);
        session
    }

    pub fn user_id(&self) -> Option<&str> {
        self.non_empty(USER_ID)
    }

    pub fn guest_session_id(&self) -> Option<&str> {
        self.non_empty(GUEST_SESSION_ID)
    }

    /// Key that owns the matches this session creates: `user:<id>` when
    /// signed in, otherwise `guest:<session id>`.
    pub fn owner_key(&self) -> Option<String> {
        if let Some(id) = self.user_id() {
            return Some(format!("user:{}", id));
        }
        self.guest_session_id().map(|id| format!("guest:{}", id))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|v| v.as_str())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    pub fn has(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    pub fn variables(&self) -> &HashMap<String, String> {
        &self.variables
    }

    fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim).filter(|v| !v.is_empty())
    }
}
