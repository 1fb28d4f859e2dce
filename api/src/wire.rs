//! Raw wire types for the league feed: serde shapes for deserializing
//! responses. These map to the clean domain types via the From impls below.

use crate::{
    Entity, EntityKind, LeagueSummary, Matchup, Ownership, PlayerOwnership, Roster, Scoreboard,
    Standing, StatEntry, TeamMatchups,
};
use serde::Deserialize;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct LeagueResponse {
    pub league: Option<WireLeague>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireLeague {
    pub league_key: Option<String>,
    pub name: Option<String>,
    pub teams: Option<Vec<WireTeam>>,
    pub players: Option<Vec<WirePlayer>>,
    pub scoreboard: Option<WireScoreboard>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireTeam {
    pub team_key: Option<String>,
    pub name: Option<String>,
    /// Absent unless the request asked for stats.
    #[serde(default)]
    pub stats: Vec<WireStat>,
    pub team_standings: Option<WireStanding>,
    pub roster: Option<Vec<WirePlayer>>,
    pub matchups: Option<Vec<WireMatchup>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireStanding {
    pub rank: Option<u32>,
    pub wins: Option<u32>,
    pub losses: Option<u32>,
    pub ties: Option<u32>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireScoreboard {
    pub week: Option<u32>,
    #[serde(default)]
    pub matchups: Vec<WireMatchup>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireMatchup {
    pub week: Option<u32>,
    pub status: Option<String>,
    pub winner_team_key: Option<String>,
    #[serde(default)]
    pub teams: Vec<WireTeam>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WirePlayer {
    pub player_key: Option<String>,
    pub name: Option<WireName>,
    #[serde(default)]
    pub stats: Vec<WireStat>,
    pub ownership: Option<WireOwnership>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireOwnership {
    /// "freeagents", "waivers" or "team".
    pub ownership_type: Option<String>,
    pub owner_team_key: Option<String>,
    pub owner_team_name: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireName {
    pub full: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WireStat {
    pub stat_id: u32,
    /// Numeric string, or "-" when not available for the period.
    pub value: String,
}

impl From<&WireStat> for StatEntry {
    fn from(stat: &WireStat) -> Self {
        StatEntry::new(stat.stat_id, &stat.value)
    }
}

impl From<&WireTeam> for Entity {
    fn from(team: &WireTeam) -> Self {
        Entity {
            key: team.team_key.clone().unwrap_or_default(),
            name: team.name.clone().unwrap_or_default(),
            kind: EntityKind::Team,
            stats: team.stats.iter().map(StatEntry::from).collect(),
        }
    }
}

impl From<WireTeam> for Entity {
    fn from(team: WireTeam) -> Self {
        Entity::from(&team)
    }
}

impl From<&WireTeam> for Standing {
    fn from(team: &WireTeam) -> Self {
        let standing = team.team_standings.clone().unwrap_or_default();
        Standing {
            team_key: team.team_key.clone().unwrap_or_default(),
            team: team.name.clone().unwrap_or_default(),
            rank: standing.rank,
            wins: standing.wins.unwrap_or(0),
            losses: standing.losses.unwrap_or(0),
            ties: standing.ties.unwrap_or(0),
        }
    }
}

impl From<WireMatchup> for Matchup {
    fn from(matchup: WireMatchup) -> Self {
        Matchup {
            week: matchup.week,
            status: matchup.status.unwrap_or_default(),
            winner_key: matchup.winner_team_key.filter(|k| !k.is_empty()),
            teams: matchup.teams.into_iter().map(Entity::from).collect(),
        }
    }
}

impl From<WireOwnership> for Ownership {
    fn from(ownership: WireOwnership) -> Self {
        match ownership.ownership_type.as_deref() {
            Some("freeagents") => Ownership::FreeAgent,
            Some("waivers") => Ownership::Waivers,
            Some("team") => Ownership::Team {
                key: ownership.owner_team_key.unwrap_or_default(),
                name: ownership.owner_team_name.unwrap_or_default(),
            },
            _ => Ownership::Unknown,
        }
    }
}

impl From<WirePlayer> for Entity {
    fn from(player: WirePlayer) -> Self {
        Entity {
            key: player.player_key.unwrap_or_default(),
            name: player.name.and_then(|n| n.full).unwrap_or_default(),
            kind: EntityKind::Player,
            stats: player.stats.iter().map(StatEntry::from).collect(),
        }
    }
}

impl From<WirePlayer> for PlayerOwnership {
    fn from(mut player: WirePlayer) -> Self {
        let ownership = player.ownership.take().map(Ownership::from).unwrap_or_default();
        PlayerOwnership { player: Entity::from(player), ownership }
    }
}

impl LeagueResponse {
    pub fn into_teams(self) -> Vec<Entity> {
        self.league
            .and_then(|l| l.teams)
            .unwrap_or_default()
            .into_iter()
            .map(Entity::from)
            .collect()
    }

    pub fn into_players(self) -> Vec<Entity> {
        self.league
            .and_then(|l| l.players)
            .unwrap_or_default()
            .into_iter()
            .map(Entity::from)
            .collect()
    }

    pub fn into_player_ownership(self) -> Vec<PlayerOwnership> {
        self.league
            .and_then(|l| l.players)
            .unwrap_or_default()
            .into_iter()
            .map(PlayerOwnership::from)
            .collect()
    }

    pub fn into_summary(self) -> LeagueSummary {
        let league = self.league.unwrap_or_default();
        LeagueSummary {
            key: league.league_key.unwrap_or_default(),
            name: league.name.unwrap_or_default(),
            standings: league
                .teams
                .unwrap_or_default()
                .iter()
                .map(Standing::from)
                .collect(),
        }
    }

    pub fn into_scoreboard(self) -> Scoreboard {
        let scoreboard = self.league.and_then(|l| l.scoreboard).unwrap_or_default();
        Scoreboard {
            week: scoreboard.week,
            matchups: scoreboard.matchups.into_iter().map(Matchup::from).collect(),
        }
    }

    /// Teams with their rosters. A team without a roster block gets an empty one.
    pub fn into_rosters(self) -> Vec<Roster> {
        self.league
            .and_then(|l| l.teams)
            .unwrap_or_default()
            .into_iter()
            .map(|mut team| {
                let players = team.roster.take().unwrap_or_default();
                Roster {
                    team: Entity::from(team),
                    players: players.into_iter().map(Entity::from).collect(),
                }
            })
            .collect()
    }

    pub fn into_team_matchups(self) -> Vec<TeamMatchups> {
        self.league
            .and_then(|l| l.teams)
            .unwrap_or_default()
            .into_iter()
            .map(|mut team| {
                let matchups = team.matchups.take().unwrap_or_default();
                TeamMatchups {
                    team: Entity::from(team),
                    matchups: matchups.into_iter().map(Matchup::from).collect(),
                }
            })
            .collect()
    }
}
