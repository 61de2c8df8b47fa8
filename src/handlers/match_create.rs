use serde::Deserialize;
use serde_json::Value;

use crate::microsvc::{Context, HandlerError};
use crate::scoring::NewMatch;
use crate::store::MatchStore;

pub const COMMAND: &str = "match.create";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Input {
    team1_name: String,
    team2_name: String,
}

pub fn guard(ctx: &Context<MatchStore>) -> bool {
    ctx.has_fields(&["team1Name", "team2Name"])
}

pub fn handle(ctx: &Context<MatchStore>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let view = ctx.repo().create(NewMatch {
        team1_name: input.team1_name,
        team2_name: input.team2_name,
        owner: ctx.owner(),
    })?;
    super::to_json(&view)
}
