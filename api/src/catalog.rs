use crate::{StatId, StatIdSet};

/// Static mapping between stat IDs and display names, plus the categories
/// where a lower value wins. Lookups on unknown keys return `None`; callers
/// pass unknown IDs through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatCatalog {
    names: &'static [(StatId, &'static str)],
    inverse: &'static [StatId],
}

pub const FG_PCT: StatId = 5;
pub const FT_PCT: StatId = 8;
pub const THREES: StatId = 10;
pub const POINTS: StatId = 12;
pub const REBOUNDS: StatId = 15;
pub const ASSISTS: StatId = 16;
pub const STEALS: StatId = 17;
pub const BLOCKS: StatId = 18;
pub const TURNOVERS: StatId = 19;
/// Field goals as makes/attempts.
pub const FG_MADE_ATTEMPTED: StatId = 9004003;
/// Free throws as makes/attempts.
pub const FT_MADE_ATTEMPTED: StatId = 9007006;

const NBA_NAMES: &[(StatId, &str)] = &[
    (FG_PCT, "FG%"),
    (FT_PCT, "FT%"),
    (THREES, "3PM"),
    (POINTS, "PTS"),
    (REBOUNDS, "REB"),
    (ASSISTS, "AST"),
    (STEALS, "STL"),
    (BLOCKS, "BLK"),
    (TURNOVERS, "TOV"),
    (FG_MADE_ATTEMPTED, "FG"),
    (FT_MADE_ATTEMPTED, "FT"),
];

const NBA_INVERSE: &[StatId] = &[TURNOVERS];

const NBA_NINE_CAT: [StatId; 9] = [
    FG_PCT, FT_PCT, THREES, POINTS, REBOUNDS, ASSISTS, STEALS, BLOCKS, TURNOVERS,
];

impl StatCatalog {
    pub const NBA: StatCatalog = StatCatalog { names: NBA_NAMES, inverse: NBA_INVERSE };

    pub const fn new(names: &'static [(StatId, &'static str)], inverse: &'static [StatId]) -> Self {
        Self { names, inverse }
    }

    pub fn name(&self, stat_id: StatId) -> Option<&'static str> {
        self.names
            .iter()
            .find(|(id, _)| *id == stat_id)
            .map(|(_, name)| *name)
    }

    pub fn id(&self, name: &str) -> Option<StatId> {
        self.names
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(id, _)| *id)
    }

    /// True when a lower value wins the category.
    pub fn is_inverse(&self, stat_id: StatId) -> bool {
        self.inverse.contains(&stat_id)
    }

    /// Display name, or the numeric ID for stats outside the catalog.
    pub fn label(&self, stat_id: StatId) -> String {
        self.name(stat_id)
            .map(str::to_owned)
            .unwrap_or_else(|| stat_id.to_string())
    }

    /// Resolve a user-supplied token: exact name, then case-insensitive name,
    /// then a bare numeric ID (which need not be in the catalog).
    pub fn resolve(&self, token: &str) -> Option<StatId> {
        let token = token.trim();
        self.id(token)
            .or_else(|| {
                self.names
                    .iter()
                    .find(|(_, n)| n.eq_ignore_ascii_case(token))
                    .map(|(id, _)| *id)
            })
            .or_else(|| token.parse::<StatId>().ok())
    }

    /// Parse a comma-separated list of names or IDs. Returns the first token
    /// that could not be resolved as the error.
    pub fn resolve_list(&self, list: &str) -> Result<StatIdSet, String> {
        list.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| self.resolve(t).ok_or_else(|| t.to_owned()))
            .collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = (StatId, &'static str)> + '_ {
        self.names.iter().copied()
    }

    /// Standard nine-category head-to-head set.
    pub fn nba_nine_cat() -> StatIdSet {
        NBA_NINE_CAT.into_iter().collect()
    }
}

impl Default for StatCatalog {
    fn default() -> Self {
        Self::NBA
    }
}
