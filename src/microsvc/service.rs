//! Command handler registry and dispatch.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::context::Context;
use super::error::HandlerError;
use super::session::Session;

type Guard<R> = Box<dyn Fn(&Context<R>) -> bool + Send + Sync>;
type Handle<R> = Box<dyn Fn(&Context<R>) -> Result<Value, HandlerError> + Send + Sync>;

/// A registered command handler with optional guard.
struct CommandHandler<R> {
    guard: Option<Guard<R>>,
    handle: Handle<R>,
}

/// Routes named commands to handler functions.
///
/// Generic over `R`, the store handlers reach through `ctx.repo()`.
pub struct Service<R> {
    repo: R,
    handlers: HashMap<String, CommandHandler<R>>,
}

impl<R: Send + Sync + 'static> Service<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            handlers: HashMap::new(),
        }
    }

    /// Register an unguarded command handler.
    pub fn command<F>(self, name: &str, handler: F) -> Self
    where
        F: Fn(&Context<R>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.register(name, None, Box::new(handler))
    }

    /// Register a command handler behind a guard.
    ///
    /// When the guard returns `false` the handler never runs and the caller
    /// gets `HandlerError::GuardRejected`.
    pub fn command_guarded<G, F>(self, name: &str, guard: G, handler: F) -> Self
    where
        G: Fn(&Context<R>) -> bool + Send + Sync + 'static,
        F: Fn(&Context<R>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.register(name, Some(Box::new(guard)), Box::new(handler))
    }

    fn register(mut self, name: &str, guard: Option<Guard<R>>, handle: Handle<R>) -> Self {
        if self
            .handlers
            .insert(name.to_string(), CommandHandler { guard, handle })
            .is_some()
        {
            warn!(command = name, "handler replaced");
        }
        self
    }

    pub fn dispatch(
        &self,
        command: &str,
        input: Value,
        session: Session,
    ) -> Result<Value, HandlerError> {
        let handler = self
            .handlers
            .get(command)
            .ok_or_else(|| HandlerError::UnknownCommand(command.to_string()))?;

        debug!(command, "dispatching command");
        let ctx = Context::new(command.to_string(), input, session, &self.repo);

        if let Some(guard) = &handler.guard {
            if !guard(&ctx) {
                return Err(HandlerError::GuardRejected(command.to_string()));
            }
        }

        let result = (handler.handle)(&ctx);
        if let Err(err) = &result {
            warn!(command, kind = err.kind(), error = %err, "command failed");
        }
        result
    }

    /// Dispatch a `CommandRequest`, returning a `CommandResponse`.
    ///
    /// Failures become `{ "error": <message>, "kind": <kind> }` with the
    /// error's status code.
    pub fn dispatch_request(&self, request: &CommandRequest) -> CommandResponse {
        let session = Session::from_map(request.session_variables.clone());
        match self.dispatch(&request.command, request.input.clone(), session) {
            Ok(value) => CommandResponse {
                status: 200,
                body: value,
            },
            Err(e) => CommandResponse {
                status: e.status_code(),
                body: serde_json::json!({ "error": e.to_string(), "kind": e.kind() }),
            },
        }
    }

    /// Registered command names, sorted.
    pub fn commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }
}

/// An inbound command request.
///
/// ```json
/// {
///   "command": "match.score",
///   "input": { "id": 1, "team": "team1" },
///   "session_variables": { "x-guest-session-id": "5f0c9a" }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRequest {
    pub command: String,
    pub input: Value,
    #[serde(default)]
    pub session_variables: HashMap<String, String>,
}

/// Response from dispatching a command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    /// HTTP-style status code.
    pub status: u16,
    pub body: Value,
}
