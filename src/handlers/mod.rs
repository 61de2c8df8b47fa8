//! One module per `match.*` command.

use serde::Deserialize;
use serde_json::{Number, Value};

use crate::microsvc::{Context, HandlerError, Service};
use crate::scoring::{Match, MatchView, ScoringError};
use crate::store::MatchStore;

pub mod match_create;
pub mod match_delete;
pub mod match_edit_score;
pub mod match_edit_set;
pub mod match_get;
pub mod match_list;
pub mod match_pause;
pub mod match_reset_set;
pub mod match_resume;
pub mod match_score;
pub mod match_undo;

/// A service with every match command registered.
pub fn service(store: MatchStore) -> Service<MatchStore> {
    crate::register_handlers!(
        Service::new(store),
        match_create,
        match_get,
        match_list,
        match_score,
        match_undo,
        match_edit_score,
        match_edit_set,
        match_reset_set,
        match_pause,
        match_resume,
        match_delete,
    )
}

#[derive(Debug, Deserialize)]
struct MatchRef {
    id: u64,
}

fn has_id(ctx: &Context<MatchStore>) -> bool {
    ctx.raw_input().get("id").map_or(false, Value::is_u64)
}

/// Run `op` on the match named by `input.id` and return the updated match.
fn mutate<F, T>(ctx: &Context<MatchStore>, op: F) -> Result<Value, HandlerError>
where
    F: FnOnce(&mut Match) -> Result<T, ScoringError>,
{
    let input = ctx.input::<MatchRef>()?;
    let owner = ctx.owner();
    let (_, view) = ctx.repo().update(input.id, owner.as_deref(), op)?;
    to_json(&view)
}

/// A score field as sent. Fractions and values beyond `i64` are invalid
/// scores, not malformed payloads.
fn score_arg(value: &Number) -> Result<i64, ScoringError> {
    value.as_i64().ok_or_else(|| ScoringError::InvalidScore {
        value: value.to_string(),
    })
}

fn to_json(view: &MatchView) -> Result<Value, HandlerError> {
    Ok(serde_json::to_value(view)?)
}
