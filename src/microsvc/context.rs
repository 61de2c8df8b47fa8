//! Context passed to command handlers.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::HandlerError;
use super::session::Session;

/// Everything a handler needs: the decoded input, the caller's session and
/// the store the service was built with.
pub struct Context<'a, R> {
    command_name: String,
    input: Value,
    session: Session,
    repo: &'a R,
}

impl<'a, R> Context<'a, R> {
    pub(crate) fn new(command_name: String, input: Value, session: Session, repo: &'a R) -> Self {
        Self {
            command_name,
            input,
            session,
            repo,
        }
    }

    /// Deserialize the input payload into a typed struct.
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        serde_json::from_value(self.input.clone())
            .map_err(|e| HandlerError::DecodeFailed(e.to_string()))
    }

    pub fn raw_input(&self) -> &Value {
        &self.input
    }

    pub fn command_name(&self) -> &str {
        &self.command_name
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Owner key of the caller, if the session identifies one.
    pub fn owner(&self) -> Option<String> {
        self.session.owner_key()
    }

    pub fn repo(&self) -> &R {
        self.repo
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.input.get(field).is_some()
    }

    pub fn has_fields(&self, fields: &[&str]) -> bool {
        fields.iter().all(|f| self.has_field(f))
    }
}
