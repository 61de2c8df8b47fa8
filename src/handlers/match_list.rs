use serde::Deserialize;
use serde_json::Value;

use crate::microsvc::{Context, HandlerError};
use crate::scoring::MatchStatus;
use crate::store::MatchStore;

pub const COMMAND: &str = "match.list";

#[derive(Debug, Default, Deserialize)]
struct Input {
    #[serde(default)]
    status: Option<String>,
}

fn parse_status(raw: &str) -> Result<MatchStatus, HandlerError> {
    match raw.to_ascii_uppercase().as_str() {
        "ACTIVE" | "IN_PROGRESS" => Ok(MatchStatus::InProgress),
        "PAUSED" => Ok(MatchStatus::Paused),
        "COMPLETED" => Ok(MatchStatus::Completed),
        _ => Err(HandlerError::DecodeFailed(format!("unknown status filter: {}", raw))),
    }
}

pub fn guard(_ctx: &Context<MatchStore>) -> bool {
    true
}

pub fn handle(ctx: &Context<MatchStore>) -> Result<Value, HandlerError> {
    let input = if ctx.raw_input().is_null() {
        Input::default()
    } else {
        ctx.input::<Input>()?
    };
    let status = input.status.as_deref().map(parse_status).transpose()?;

    let owner = ctx.owner();
    let matches = ctx.repo().list(owner.as_deref(), status)?;
    Ok(serde_json::to_value(matches)?)
}
