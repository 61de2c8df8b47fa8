use crate::entity::{Entity, EventRecord};

use super::Team;

/// Typed view of the events recorded on a match.
///
/// Payloads are stored as bitcode-encoded tuples of the variant's fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEvent {
    Created {
        id: u64,
        team1_name: String,
        team2_name: String,
        owner: Option<String>,
        created_at_ms: i64,
    },
    PointScored {
        team: Team,
        at_ms: i64,
    },
    PointUndone,
    CurrentScoreEdited {
        team1_points: u32,
        team2_points: u32,
    },
    SetEdited {
        set_number: u32,
        team1_points: u32,
        team2_points: u32,
    },
    SetReset,
    Paused,
    Resumed,
    Deleted,
}

impl MatchEvent {
    pub fn event_name(&self) -> &'static str {
        match self {
            MatchEvent::Created { .. } => "Created",
            MatchEvent::PointScored { .. } => "PointScored",
            MatchEvent::PointUndone => "PointUndone",
            MatchEvent::CurrentScoreEdited { .. } => "CurrentScoreEdited",
            MatchEvent::SetEdited { .. } => "SetEdited",
            MatchEvent::SetReset => "SetReset",
            MatchEvent::Paused => "Paused",
            MatchEvent::Resumed => "Resumed",
            MatchEvent::Deleted => "Deleted",
        }
    }

    /// Append this event to the entity's log (no-op while replaying).
    pub fn record_on(&self, entity: &mut Entity) {
        let name = self.event_name();
        match self {
            MatchEvent::Created {
                id,
                team1_name,
                team2_name,
                owner,
                created_at_ms,
            } => entity.digest(name, &(id, team1_name, team2_name, owner, created_at_ms)),
            MatchEvent::PointScored { team, at_ms } => entity.digest(name, &(team, at_ms)),
            MatchEvent::CurrentScoreEdited {
                team1_points,
                team2_points,
            } => entity.digest(name, &(team1_points, team2_points)),
            MatchEvent::SetEdited {
                set_number,
                team1_points,
                team2_points,
            } => entity.digest(name, &(set_number, team1_points, team2_points)),
            MatchEvent::PointUndone
            | MatchEvent::SetReset
            | MatchEvent::Paused
            | MatchEvent::Resumed
            | MatchEvent::Deleted => entity.digest_empty(name),
        }
    }
}

impl TryFrom<&EventRecord> for MatchEvent {
    type Error = String;

    fn try_from(record: &EventRecord) -> Result<Self, Self::Error> {
        let decode_err = |e: crate::entity::PayloadError| format!("{}: {}", record.event_name, e);

        match record.event_name.as_str() {
            "Created" => {
                let (id, team1_name, team2_name, owner, created_at_ms): (
                    u64,
                    String,
                    String,
                    Option<String>,
                    i64,
                ) = record.decode().map_err(decode_err)?;
                Ok(MatchEvent::Created {
                    id,
                    team1_name,
                    team2_name,
                    owner,
                    created_at_ms,
                })
            }
            "PointScored" => {
                let (team, at_ms): (Team, i64) = record.decode().map_err(decode_err)?;
                Ok(MatchEvent::PointScored { team, at_ms })
            }
            "PointUndone" => Ok(MatchEvent::PointUndone),
            "CurrentScoreEdited" => {
                let (team1_points, team2_points): (u32, u32) =
                    record.decode().map_err(decode_err)?;
                Ok(MatchEvent::CurrentScoreEdited {
                    team1_points,
                    team2_points,
                })
            }
            "SetEdited" => {
                let (set_number, team1_points, team2_points): (u32, u32, u32) =
                    record.decode().map_err(decode_err)?;
                Ok(MatchEvent::SetEdited {
                    set_number,
                    team1_points,
                    team2_points,
                })
            }
            "SetReset" => Ok(MatchEvent::SetReset),
            "Paused" => Ok(MatchEvent::Paused),
            "Resumed" => Ok(MatchEvent::Resumed),
            "Deleted" => Ok(MatchEvent::Deleted),
            other => Err(format!("Unknown event: {}", other)),
        }
    }
}
