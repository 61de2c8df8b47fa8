use serde::Deserialize;
use serde_json::Value;

use crate::microsvc::{Context, HandlerError};
use crate::scoring::Team;
use crate::store::MatchStore;

pub const COMMAND: &str = "match.score";

#[derive(Debug, Deserialize)]
struct Input {
    team: Team,
}

pub fn guard(ctx: &Context<MatchStore>) -> bool {
    super::has_id(ctx) && ctx.has_field("team")
}

pub fn handle(ctx: &Context<MatchStore>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    super::mutate(ctx, |m| m.score_point(input.team))
}
