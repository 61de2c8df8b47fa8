use serde::Deserialize;
use serde_json::{Number, Value};

use crate::microsvc::{Context, HandlerError};
use crate::store::MatchStore;

pub const COMMAND: &str = "match.edit_score";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Input {
    team1_points: Number,
    team2_points: Number,
}

pub fn guard(ctx: &Context<MatchStore>) -> bool {
    super::has_id(ctx) && ctx.has_fields(&["team1Points", "team2Points"])
}

pub fn handle(ctx: &Context<MatchStore>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let team1_points = super::score_arg(&input.team1_points)?;
    let team2_points = super::score_arg(&input.team2_points)?;
    super::mutate(ctx, |m| m.edit_current_set_score(team1_points, team2_points))
}
