use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use yf_stats::StatsType;

#[derive(Debug, Parser)]
#[command(
    name = "yfcompare",
    version,
    about = "Compare fantasy basketball players and teams category by category"
)]
pub struct Cli {
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Log filter, e.g. "debug" or "yf_stats=debug" (RUST_LOG wins when set)
    #[arg(long, global = true, env = "YFC_LOG", default_value = "warn")]
    pub log_level: String,

    /// Fantasy API base URL
    #[arg(long, global = true, env = "YFC_API_BASE")]
    pub api_base: Option<String>,

    /// OAuth bearer token for the fantasy API
    #[arg(long, global = true, env = "YFC_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Read league data from this JSON file instead of the network
    #[arg(long, global = true, env = "YFC_LEAGUE_JSON")]
    pub snapshot: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "YFC_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Stat differences between two players (first minus second)
    Compare(CompareArgs),
    /// One team's category results against every other team for a week
    Matchups(MatchupsArgs),
    /// Top free agents ranked by a stat
    FreeAgents(FreeAgentsArgs),
    /// League table
    Standings(LeagueArgs),
    /// Head-to-head pairings for a week (current week by default)
    Scoreboard(ScoreboardArgs),
    /// A team's roster
    Roster(RosterArgs),
    /// List known stats and which ones are lower-is-better
    Catalog,
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    #[arg(long, env = "YFC_LEAGUE_KEY")]
    pub league: String,
    pub player_a: String,
    pub player_b: String,
    /// season, season-average, today, last-week, last-week-average,
    /// last-month, last-month-average or week
    #[arg(long, default_value = "season-average")]
    pub stats_type: StatsType,
    /// Week number, required with --stats-type week
    #[arg(long)]
    pub week: Option<u32>,
    /// Comma-separated stat names or IDs (default: NBA 9-cat)
    #[arg(long)]
    pub stats: Option<String>,
    /// Compare stat vectors position by position and fail on misalignment
    #[arg(long)]
    pub positional: bool,
}

#[derive(Debug, Args)]
pub struct MatchupsArgs {
    #[arg(long, env = "YFC_LEAGUE_KEY")]
    pub league: String,
    #[arg(long)]
    pub team: String,
    #[arg(long)]
    pub week: u32,
    /// Comma-separated stat names or IDs (default: NBA 9-cat)
    #[arg(long)]
    pub stats: Option<String>,
    /// Fail on unparseable or unavailable values instead of counting them as 0
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct FreeAgentsArgs {
    #[arg(long, env = "YFC_LEAGUE_KEY")]
    pub league: String,
    /// Stat name or ID to rank by
    #[arg(long)]
    pub stat: String,
    #[arg(long, default_value_t = 10)]
    pub count: u32,
    #[arg(long, default_value = "season")]
    pub stats_type: StatsType,
    #[arg(long)]
    pub week: Option<u32>,
}

#[derive(Debug, Args)]
pub struct LeagueArgs {
    #[arg(long, env = "YFC_LEAGUE_KEY")]
    pub league: String,
}

#[derive(Debug, Args)]
pub struct ScoreboardArgs {
    #[arg(long, env = "YFC_LEAGUE_KEY")]
    pub league: String,
    #[arg(long)]
    pub week: Option<u32>,
}

#[derive(Debug, Args)]
pub struct RosterArgs {
    #[arg(long, env = "YFC_LEAGUE_KEY")]
    pub league: String,
    #[arg(long)]
    pub team: String,
}
