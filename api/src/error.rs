use crate::StatId;
use std::fmt;

pub type StatsResult<T> = Result<T, StatsError>;

/// Failures of the comparison core. None of them are retried here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    InvalidStatsType(String),
    EntityNotFound(String),
    StatUnavailable { entity: String, stat_id: StatId },
    MalformedValue { entity: String, stat_id: StatId, value: String },
    MisalignedVectors { position: usize, expected: Option<StatId>, found: Option<StatId> },
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsError::InvalidStatsType(msg) => write!(f, "Invalid stats type: {msg}"),
            StatsError::EntityNotFound(name) => write!(f, "{name:?} not found"),
            StatsError::StatUnavailable { entity, stat_id } => {
                write!(f, "Stats unavailable for {entity:?} (stat {stat_id})")
            }
            StatsError::MalformedValue { entity, stat_id, value } => {
                write!(f, "Malformed value {value:?} for {entity:?} (stat {stat_id})")
            }
            StatsError::MisalignedVectors { position, expected, found } => {
                write!(
                    f,
                    "Misaligned stat vectors at position {position}: expected {}, found {}",
                    describe_slot(*expected),
                    describe_slot(*found)
                )
            }
        }
    }
}

impl std::error::Error for StatsError {}

fn describe_slot(slot: Option<StatId>) -> String {
    slot.map_or_else(|| "nothing".to_owned(), |id| format!("stat {id}"))
}
