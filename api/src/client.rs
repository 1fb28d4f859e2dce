use crate::error::StatsError;
use crate::wire::LeagueResponse;
use crate::{
    CategoryMatchupResult, DiffEngine, Entity, LeagueSummary, Matchup, MatchupEngine,
    PlayerOwnership, QueryWindow, Roster, Scoreboard, Standing, StatId, StatIdSet, StatsDiff,
    StatsType, WindowSelector, find_entity,
};
use chrono::Local;
use log::debug;
use reqwest::Client;
use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const FANTASY_V2: &str = "https://fantasysports.yahooapis.com/fantasy/v2";

/// Player name searches shorter than this are rejected before any request.
pub const MIN_SEARCH_LEN: usize = 3;

/// Fantasy league client. Issues one request per call and never retries.
#[derive(Debug, Clone)]
pub struct FantasyApi {
    client: Client,
    base_url: String,
    token: Option<String>,
    snapshot: Option<PathBuf>,
    timeout: Duration,
}

impl Default for FantasyApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("yfcompare/0.1 (fantasy stat comparison)")
                .build()
                .unwrap_or_default(),
            base_url: FANTASY_V2.to_owned(),
            token: None,
            snapshot: None,
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    Snapshot(String),
    InvalidRequest(String),
    Stats(StatsError),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Snapshot(msg) => write!(f, "Snapshot error: {msg}"),
            ApiError::InvalidRequest(msg) => write!(f, "Invalid request: {msg}"),
            ApiError::Stats(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<StatsError> for ApiError {
    fn from(e: StatsError) -> Self {
        ApiError::Stats(e)
    }
}

/// League key from a game key and league ID, e.g. `428.l.1234`.
pub fn make_league_key(game_key: &str, league_id: u32) -> String {
    format!("{game_key}.l.{league_id}")
}

impl FantasyApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Read every league document from this file instead of the network.
    pub fn with_snapshot(mut self, snapshot: Option<PathBuf>) -> Self {
        self.snapshot = snapshot;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    // -----------------------------------------------------------------------
    // League
    // -----------------------------------------------------------------------

    /// League key, name and standings.
    pub async fn fetch_league_summary(&self, league_key: &str) -> ApiResult<LeagueSummary> {
        let url = format!("{}/league/{league_key}/standings", self.base_url);
        Ok(self.fetch_document(&url).await?.into_summary())
    }

    pub async fn fetch_standings(&self, league_key: &str) -> ApiResult<Vec<Standing>> {
        Ok(self.fetch_league_summary(league_key).await?.standings)
    }

    pub async fn fetch_current_scoreboard(&self, league_key: &str) -> ApiResult<Scoreboard> {
        let url = format!("{}/league/{league_key}/scoreboard", self.base_url);
        Ok(self.fetch_document(&url).await?.into_scoreboard())
    }

    pub async fn fetch_scoreboard(&self, league_key: &str, week: u32) -> ApiResult<Scoreboard> {
        if week == 0 {
            return Err(ApiError::InvalidRequest("week must be at least 1".into()));
        }
        let url = format!("{}/league/{league_key}/scoreboard;week={week}", self.base_url);
        Ok(self.fetch_document(&url).await?.into_scoreboard())
    }

    pub async fn fetch_league_rosters(&self, league_key: &str) -> ApiResult<Vec<Roster>> {
        let url = format!("{}/league/{league_key}/teams/roster", self.base_url);
        Ok(self.fetch_document(&url).await?.into_rosters())
    }

    // -----------------------------------------------------------------------
    // Teams
    // -----------------------------------------------------------------------

    pub async fn fetch_teams(&self, league_key: &str) -> ApiResult<Vec<Entity>> {
        let url = format!("{}/league/{league_key}/teams", self.base_url);
        Ok(self.fetch_document(&url).await?.into_teams())
    }

    pub async fn team_key(&self, league_key: &str, team_name: &str) -> ApiResult<String> {
        let teams = self.fetch_teams(league_key).await?;
        let (_, team) = find_entity(&teams, team_name)?;
        Ok(team.key.clone())
    }

    pub async fn fetch_team_roster(&self, league_key: &str, team_name: &str) -> ApiResult<Roster> {
        let rosters = self.fetch_league_rosters(league_key).await?;
        take_team(rosters, team_name, |roster| &roster.team)
    }

    /// Every matchup on the team's schedule so far.
    pub async fn fetch_team_matchups(
        &self,
        league_key: &str,
        team_name: &str,
    ) -> ApiResult<Vec<Matchup>> {
        let url = format!("{}/league/{league_key}/teams/matchups", self.base_url);
        let teams = self.fetch_document(&url).await?.into_team_matchups();
        Ok(take_team(teams, team_name, |t| &t.team)?.matchups)
    }

    /// Every team in the league with stats for the given window.
    pub async fn fetch_league_team_stats(
        &self,
        league_key: &str,
        window: &QueryWindow,
    ) -> ApiResult<Vec<Entity>> {
        let url = format!(
            "{}/league/{league_key}/teams/stats;{}",
            self.base_url,
            window_fragment(&window.window)
        );
        Ok(self.fetch_document(&url).await?.into_teams())
    }

    pub async fn fetch_team_stats(
        &self,
        league_key: &str,
        team_name: &str,
        window: &QueryWindow,
    ) -> ApiResult<Entity> {
        let teams = self.fetch_league_team_stats(league_key, window).await?;
        let (_, team) = find_entity(&teams, team_name)?;
        Ok(team.clone())
    }

    // -----------------------------------------------------------------------
    // Players
    // -----------------------------------------------------------------------

    pub async fn search_players(&self, league_key: &str, name: &str) -> ApiResult<Vec<Entity>> {
        validate_search(name)?;
        let url = format!("{}/league/{league_key}/players;search={}", self.base_url, name.trim());
        let players = self.fetch_document(&url).await?.into_players();
        Ok(self.narrow_to_search(players, name))
    }

    pub async fn player_key(&self, league_key: &str, name: &str) -> ApiResult<String> {
        let players = self.search_players(league_key, name).await?;
        let (_, player) = find_entity(&players, name)?;
        Ok(player.key.clone())
    }

    /// Results of one search per name, concatenated in the order given.
    pub async fn search_multi_players(
        &self,
        league_key: &str,
        names: &[&str],
    ) -> ApiResult<Vec<Entity>> {
        let mut players = Vec::new();
        for name in names {
            players.extend(self.search_players(league_key, name).await?);
        }
        Ok(players)
    }

    /// Whether the player is a free agent, on waivers or on a team's roster.
    pub async fn fetch_player_ownership(
        &self,
        league_key: &str,
        name: &str,
    ) -> ApiResult<PlayerOwnership> {
        validate_search(name)?;
        let url = format!(
            "{}/league/{league_key}/players;search={}/ownership",
            self.base_url,
            name.trim()
        );
        let players = self.fetch_document(&url).await?.into_player_ownership();
        let found = players
            .into_iter()
            .find(|p| p.player.matches_name(name))
            .ok_or_else(|| StatsError::EntityNotFound(name.to_owned()))?;
        Ok(found)
    }

    /// Player stats in the feed's default (advanced) view, with no window.
    pub async fn fetch_player_advanced_stats(
        &self,
        league_key: &str,
        name: &str,
    ) -> ApiResult<Entity> {
        validate_search(name)?;
        let url = format!("{}/league/{league_key}/players;search={}/stats", self.base_url, name.trim());
        let players = self.fetch_document(&url).await?.into_players();
        let (_, player) = find_entity(&players, name)?;
        Ok(player.clone())
    }

    pub async fn fetch_player_stats(
        &self,
        league_key: &str,
        name: &str,
        window: &QueryWindow,
    ) -> ApiResult<Entity> {
        validate_search(name)?;
        let url = format!(
            "{}/league/{league_key}/players;search={}/stats;{}",
            self.base_url,
            name.trim(),
            window_fragment(&window.window)
        );
        let players = self.fetch_document(&url).await?.into_players();
        let (_, player) = find_entity(&players, name)?;
        Ok(player.clone())
    }

    /// Stats for several players, one request each, in the order given.
    pub async fn fetch_players_stats(
        &self,
        league_key: &str,
        names: &[&str],
        window: &QueryWindow,
    ) -> ApiResult<Vec<Entity>> {
        let mut players = Vec::with_capacity(names.len());
        for name in names {
            players.push(self.fetch_player_stats(league_key, name, window).await?);
        }
        Ok(players)
    }

    /// Top free agents ranked by one stat over the window's sort family.
    /// The remote feed ranks and filters; a snapshot is ranked here, highest
    /// first, with rostered players dropped.
    pub async fn sort_free_agents_by_stat(
        &self,
        league_key: &str,
        stat_id: StatId,
        count: u32,
        window: &QueryWindow,
    ) -> ApiResult<Vec<Entity>> {
        let today = Local::now().date_naive();
        let url = format!(
            "{}/league/{league_key}/players;status=FA;sort={stat_id};{};count={count}/stats;{}",
            self.base_url,
            window.sort.fragment(today),
            window.window.fragment(today)
        );
        let document = self.fetch_document(&url).await?;
        let mut players = if self.snapshot.is_some() {
            let mut pool: Vec<Entity> = document
                .into_player_ownership()
                .into_iter()
                .filter(|p| !p.ownership.is_rostered())
                .map(|p| p.player)
                .collect();
            rank_by_stat(&mut pool, stat_id);
            pool
        } else {
            document.into_players()
        };
        players.truncate(count as usize);
        Ok(players)
    }

    // -----------------------------------------------------------------------
    // Comparisons
    // -----------------------------------------------------------------------

    pub async fn compare_players(
        &self,
        league_key: &str,
        player_a: &str,
        player_b: &str,
        stats_type: StatsType,
        week: Option<u32>,
        eligible: &StatIdSet,
        engine: &DiffEngine,
    ) -> ApiResult<StatsDiff> {
        let window = stats_type.resolve(week)?;
        let players = self
            .fetch_players_stats(league_key, &[player_a, player_b], &window)
            .await?;
        let [a, b] = players.as_slice() else {
            return Err(ApiError::InvalidRequest(format!(
                "encountered problem fetching stats for {player_a:?} and {player_b:?}"
            )));
        };
        Ok(engine.compute(a, b, eligible)?)
    }

    /// Category results of `team_name` against every other team for one week.
    pub async fn category_matchups_vs_league(
        &self,
        league_key: &str,
        team_name: &str,
        eligible: &StatIdSet,
        week: u32,
        engine: &MatchupEngine,
    ) -> ApiResult<Vec<CategoryMatchupResult>> {
        let window = StatsType::Week.resolve(Some(week))?;
        let teams = self.fetch_league_team_stats(league_key, &window).await?;
        Ok(engine.compute(team_name, &teams, eligible)?)
    }

    fn narrow_to_search(&self, mut players: Vec<Entity>, name: &str) -> Vec<Entity> {
        // The remote search already filters; a snapshot holds the whole pool.
        if self.snapshot.is_some() {
            let needle = name.trim().to_lowercase();
            players.retain(|p| p.name.to_lowercase().contains(&needle));
        }
        players
    }

    async fn fetch_document(&self, url: &str) -> ApiResult<LeagueResponse> {
        if let Some(path) = &self.snapshot {
            debug!("reading league snapshot {} in place of {url}", path.display());
            let content = std::fs::read_to_string(path)
                .map_err(|e| ApiError::Snapshot(format!("could not read {}: {e}", path.display())))?;
            return serde_json::from_str(&content)
                .map_err(|e| ApiError::Snapshot(format!("invalid league json at {}: {e}", path.display())));
        }
        self.get(&format!("{url}?format=json")).await
    }

    async fn get<T: Default + serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        debug!("GET {url}");
        let mut request = self.client.get(url).timeout(self.timeout);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => {
                if e.status().map(|s| s == reqwest::StatusCode::NOT_FOUND).unwrap_or(false) {
                    Ok(T::default())
                } else {
                    Err(ApiError::Api(e, url.to_owned()))
                }
            }
        }
    }
}

fn window_fragment(window: &WindowSelector) -> String {
    window.fragment(Local::now().date_naive())
}

fn take_team<T>(items: Vec<T>, name: &str, team: impl Fn(&T) -> &Entity) -> ApiResult<T> {
    items
        .into_iter()
        .find(|item| team(item).matches_name(name))
        .ok_or_else(|| StatsError::EntityNotFound(name.to_owned()).into())
}

/// Stable sort, highest value first. Unavailable or malformed values go last.
fn rank_by_stat(players: &mut [Entity], stat_id: StatId) {
    let value = |p: &Entity| p.value_of(stat_id).and_then(|v| v.parse()).and_then(|r| r.ok());
    players.sort_by(|a, b| match (value(a), value(b)) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

fn validate_search(name: &str) -> ApiResult<()> {
    if name.trim().chars().count() < MIN_SEARCH_LEN {
        return Err(ApiError::InvalidRequest(format!(
            "name ({name:?}) must contain at least {MIN_SEARCH_LEN} letters"
        )));
    }
    Ok(())
}
