use serde_json::Value;

use crate::microsvc::{Context, HandlerError};
use crate::store::MatchStore;

pub const COMMAND: &str = "match.get";

pub fn guard(ctx: &Context<MatchStore>) -> bool {
    super::has_id(ctx)
}

pub fn handle(ctx: &Context<MatchStore>) -> Result<Value, HandlerError> {
    let input = ctx.input::<super::MatchRef>()?;
    let owner = ctx.owner();
    let view = ctx.repo().load(input.id, owner.as_deref())?;
    super::to_json(&view)
}
