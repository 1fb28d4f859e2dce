pub mod catalog;
pub mod client;
pub mod diff;
pub mod error;
pub mod matchup;
pub mod stats_type;
pub mod wire;

pub use catalog::StatCatalog;
pub use diff::{Alignment, DiffEngine};
pub use error::{StatsError, StatsResult};
pub use matchup::{MalformedPolicy, MatchupEngine};
pub use stats_type::{QueryWindow, SortSelector, StatsType, WindowSelector};

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Integer key naming a statistical category.
pub type StatId = u32;

/// Caller-chosen subset of stat IDs taking part in a comparison.
/// Ordered, so category lists in results come out in ascending ID order.
pub type StatIdSet = BTreeSet<StatId>;

/// Raw value the feed sends when a stat is not available for the period.
pub const UNAVAILABLE_SENTINEL: &str = "-";

// ---------------------------------------------------------------------------
// Domain types, independent of the feed's wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StatValue {
    /// Not available for the requested period (sent as "-").
    Unavailable,
    /// Numeric string as sent by the feed. Not validated until compared.
    Raw(String),
}

impl StatValue {
    pub fn from_raw(raw: &str) -> Self {
        if raw.trim() == UNAVAILABLE_SENTINEL {
            StatValue::Unavailable
        } else {
            StatValue::Raw(raw.to_owned())
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, StatValue::Unavailable)
    }

    /// Parse the raw value. `None` for the sentinel, `Some(Err(raw))` when the
    /// string is not a finite number.
    pub fn parse(&self) -> Option<Result<f64, &str>> {
        match self {
            StatValue::Unavailable => None,
            StatValue::Raw(raw) => Some(
                raw.trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or(raw.as_str()),
            ),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            StatValue::Unavailable => UNAVAILABLE_SENTINEL,
            StatValue::Raw(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatEntry {
    pub stat_id: StatId,
    pub value: StatValue,
}

impl StatEntry {
    pub fn new(stat_id: StatId, raw: &str) -> Self {
        Self { stat_id, value: StatValue::from_raw(raw) }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum EntityKind {
    #[default]
    Team,
    Player,
}

/// A player or team: a display name plus the stat vector the feed returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Entity {
    pub key: String,
    pub name: String,
    pub kind: EntityKind,
    pub stats: Vec<StatEntry>,
}

impl Entity {
    pub fn new(kind: EntityKind, key: impl Into<String>, name: impl Into<String>) -> Self {
        Self { key: key.into(), name: name.into(), kind, stats: Vec::new() }
    }

    pub fn with_stat(mut self, stat_id: StatId, raw: &str) -> Self {
        self.stats.push(StatEntry::new(stat_id, raw));
        self
    }

    /// Order-independent lookup. First occurrence wins if the feed repeats an ID.
    pub fn value_of(&self, stat_id: StatId) -> Option<&StatValue> {
        self.stats
            .iter()
            .find(|entry| entry.stat_id == stat_id)
            .map(|entry| &entry.value)
    }

    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }
}

/// Linear, case-insensitive search by display name.
pub fn find_entity<'a>(entities: &'a [Entity], name: &str) -> StatsResult<(usize, &'a Entity)> {
    entities
        .iter()
        .enumerate()
        .find(|(_, entity)| entity.matches_name(name))
        .ok_or_else(|| StatsError::EntityNotFound(name.to_owned()))
}

/// Signed per-category difference (`entity_a` minus `entity_b`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatsDiff {
    pub entity_a: String,
    pub entity_b: String,
    pub diffs: BTreeMap<StatId, f64>,
}

impl StatsDiff {
    /// Diffs keyed by display name; IDs outside the catalog keep their number.
    pub fn named_diffs(&self, catalog: &StatCatalog) -> BTreeMap<String, f64> {
        self.diffs
            .iter()
            .map(|(&id, &diff)| (catalog.label(id), diff))
            .collect()
    }
}

/// Category results of one matchup, from the home entity's perspective.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryMatchupResult {
    pub home: String,
    pub away: String,
    pub won: Vec<StatId>,
    pub lost: Vec<StatId>,
    pub tied: Vec<StatId>,
}

impl CategoryMatchupResult {
    pub fn new(home: impl Into<String>, away: impl Into<String>) -> Self {
        Self { home: home.into(), away: away.into(), ..Default::default() }
    }

    /// (won, lost, tied) category counts.
    pub fn score(&self) -> (usize, usize, usize) {
        (self.won.len(), self.lost.len(), self.tied.len())
    }

    pub fn outcome(&self) -> Outcome {
        let (won, lost, _) = self.score();
        match won.cmp(&lost) {
            std::cmp::Ordering::Greater => Outcome::Won,
            std::cmp::Ordering::Less => Outcome::Lost,
            std::cmp::Ordering::Equal => Outcome::Tied,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Won,
    Lost,
    Tied,
}

/// League-wide summary of a set of category matchups for one home entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchupRecord {
    pub home: String,
    pub wins: usize,
    pub losses: usize,
    pub ties: usize,
    pub categories_won: usize,
    pub categories_lost: usize,
    pub categories_tied: usize,
}

impl MatchupRecord {
    pub fn from_results(home: &str, results: &[CategoryMatchupResult]) -> Self {
        results.iter().fold(
            Self { home: home.to_owned(), ..Default::default() },
            |mut record, result| {
                let (won, lost, tied) = result.score();
                record.categories_won += won;
                record.categories_lost += lost;
                record.categories_tied += tied;
                match result.outcome() {
                    Outcome::Won => record.wins += 1,
                    Outcome::Lost => record.losses += 1,
                    Outcome::Tied => record.ties += 1,
                }
                record
            },
        )
    }
}

/// One row of the league table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub team_key: String,
    pub team: String,
    pub rank: Option<u32>,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LeagueSummary {
    pub key: String,
    pub name: String,
    pub standings: Vec<Standing>,
}

/// A scheduled head-to-head pairing. `teams` carry the week's stats when the
/// feed sends them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Matchup {
    pub week: Option<u32>,
    pub status: String,
    pub winner_key: Option<String>,
    pub teams: Vec<Entity>,
}

impl Matchup {
    pub fn winner(&self) -> Option<&Entity> {
        let key = self.winner_key.as_deref()?;
        self.teams.iter().find(|team| team.key == key)
    }

    pub fn opponent_of(&self, team_key: &str) -> Option<&Entity> {
        if !self.teams.iter().any(|team| team.key == team_key) {
            return None;
        }
        self.teams.iter().find(|team| team.key != team_key)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scoreboard {
    pub week: Option<u32>,
    pub matchups: Vec<Matchup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Roster {
    pub team: Entity,
    pub players: Vec<Entity>,
}

/// Every matchup on one team's schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamMatchups {
    pub team: Entity,
    pub matchups: Vec<Matchup>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum Ownership {
    FreeAgent,
    Waivers,
    Team { key: String, name: String },
    #[default]
    Unknown,
}

impl Ownership {
    pub fn is_rostered(&self) -> bool {
        matches!(self, Ownership::Team { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerOwnership {
    pub player: Entity,
    pub ownership: Ownership,
}
