use serde_json::Value;

use crate::microsvc::{Context, HandlerError};
use crate::store::MatchStore;

pub const COMMAND: &str = "match.resume";

pub fn guard(ctx: &Context<MatchStore>) -> bool {
    super::has_id(ctx)
}

pub fn handle(ctx: &Context<MatchStore>) -> Result<Value, HandlerError> {
    super::mutate(ctx, |m| m.resume())
}
