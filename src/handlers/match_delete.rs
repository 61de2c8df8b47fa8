use serde_json::{json, Value};

use crate::microsvc::{Context, HandlerError};
use crate::store::MatchStore;

pub const COMMAND: &str = "match.delete";

pub fn guard(ctx: &Context<MatchStore>) -> bool {
    super::has_id(ctx)
}

pub fn handle(ctx: &Context<MatchStore>) -> Result<Value, HandlerError> {
    let input = ctx.input::<super::MatchRef>()?;
    let owner = ctx.owner();
    ctx.repo().update(input.id, owner.as_deref(), |m| m.delete())?;
    Ok(json!({ "id": input.id, "deleted": true }))
}
