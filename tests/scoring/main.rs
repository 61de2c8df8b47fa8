//! Scoring rules exercised through the public `Match` API.

mod scenarios;
mod replay;
