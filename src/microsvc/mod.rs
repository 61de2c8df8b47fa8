//! microsvc: convention-based command handlers.
//!
//! Handlers are registered on a `Service` by name. Each receives a
//! `Context<R>` carrying the JSON input, the caller's `Session` and the
//! store.
//!
//! ```ignore
//! let service = register_handlers!(
//!     microsvc::Service::new(MatchStore::default()),
//!     handlers::match_create,
//!     handlers::match_score,
//! );
//! let view = service.dispatch("match.create", json!({ .. }), Session::guest("g1"))?;
//! ```
//!
//! Each handler module exports `COMMAND`, `guard(ctx) -> bool` and
//! `handle(ctx) -> Result<Value, HandlerError>`.

mod context;
mod error;
mod service;
mod session;

pub use context::Context;
pub use error::HandlerError;
pub use service::{CommandRequest, CommandResponse, Service};
pub use session::{Session, GUEST_SESSION_ID, USER_ID};

/// Register handler modules with a service using the convention pattern.
#[macro_export]
macro_rules! register_handlers {
    ($service:expr, $( $($seg:ident)::+ ),+ $(,)?) => {
        $service
        $(
            .command_guarded(
                $($seg)::+::COMMAND,
                $($seg)::+::guard,
                $($seg)::+::handle,
            )
        )+
    };
}
