mod cli;
mod output;
mod settings;

use crate::cli::{
    Cli, Command, CompareArgs, FreeAgentsArgs, LeagueArgs, MatchupsArgs, RosterArgs, ScoreboardArgs,
};
use crate::output::{DiffReport, MatchupReport};
use crate::settings::Settings;
use anyhow::{Context, bail};
use clap::Parser;
use log::debug;
use yf_stats::client::FantasyApi;
use yf_stats::{
    Alignment, DiffEngine, MalformedPolicy, MatchupEngine, MatchupRecord, StatCatalog, StatIdSet,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    better_panic::install();

    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let settings = Settings::from_cli(&cli);
    debug!(
        "api base: {:?}, snapshot: {:?}, timeout: {:?}",
        settings.api_base, settings.snapshot, settings.timeout
    );
    let api = settings.api();
    let catalog = StatCatalog::NBA;

    let out = match &cli.command {
        Command::Compare(args) => compare(&api, &catalog, args, cli.json).await?,
        Command::Matchups(args) => matchups(&api, &catalog, args, cli.json).await?,
        Command::FreeAgents(args) => free_agents(&api, &catalog, args, cli.json).await?,
        Command::Standings(args) => standings(&api, args, cli.json).await?,
        Command::Scoreboard(args) => scoreboard(&api, args, cli.json).await?,
        Command::Roster(args) => roster(&api, args, cli.json).await?,
        Command::Catalog => output::render_catalog(&catalog),
    };
    print!("{out}");
    if cli.json {
        println!();
    }
    Ok(())
}

fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

async fn compare(
    api: &FantasyApi,
    catalog: &StatCatalog,
    args: &CompareArgs,
    json: bool,
) -> anyhow::Result<String> {
    let eligible = eligible_stats(catalog, args.stats.as_deref())?;
    let alignment = if args.positional { Alignment::Positional } else { Alignment::ByStatId };
    let diff = api
        .compare_players(
            &args.league,
            &args.player_a,
            &args.player_b,
            args.stats_type,
            args.week,
            &eligible,
            &DiffEngine::new(alignment),
        )
        .await
        .with_context(|| format!("comparing {:?} and {:?}", args.player_a, args.player_b))?;

    if json {
        return Ok(serde_json::to_string_pretty(&DiffReport::new(&diff, catalog))?);
    }
    Ok(output::render_diff(&diff, catalog))
}

async fn matchups(
    api: &FantasyApi,
    catalog: &StatCatalog,
    args: &MatchupsArgs,
    json: bool,
) -> anyhow::Result<String> {
    let eligible = eligible_stats(catalog, args.stats.as_deref())?;
    let policy = if args.strict { MalformedPolicy::Reject } else { MalformedPolicy::ZeroFill };
    let engine = MatchupEngine::new(*catalog, policy);
    let results = api
        .category_matchups_vs_league(&args.league, &args.team, &eligible, args.week, &engine)
        .await
        .with_context(|| format!("computing week {} matchups for {:?}", args.week, args.team))?;

    let home = results.first().map(|r| r.home.as_str()).unwrap_or(&args.team);
    let record = MatchupRecord::from_results(home, &results);
    if json {
        let report = MatchupReport { record, results: &results };
        return Ok(serde_json::to_string_pretty(&report)?);
    }
    Ok(output::render_matchups(&results, &record, catalog))
}

async fn free_agents(
    api: &FantasyApi,
    catalog: &StatCatalog,
    args: &FreeAgentsArgs,
    json: bool,
) -> anyhow::Result<String> {
    let Some(stat_id) = catalog.resolve(&args.stat) else {
        bail!("unknown stat {:?}", args.stat);
    };
    let window = args.stats_type.resolve(args.week)?;
    let players = api
        .sort_free_agents_by_stat(&args.league, stat_id, args.count, &window)
        .await
        .context("fetching free agents")?;

    if json {
        return Ok(serde_json::to_string_pretty(&players)?);
    }
    Ok(output::render_players(&players, stat_id, catalog))
}

async fn standings(api: &FantasyApi, args: &LeagueArgs, json: bool) -> anyhow::Result<String> {
    let summary = api
        .fetch_league_summary(&args.league)
        .await
        .context("fetching standings")?;
    if json {
        return Ok(serde_json::to_string_pretty(&summary)?);
    }
    Ok(output::render_standings(&summary))
}

async fn scoreboard(api: &FantasyApi, args: &ScoreboardArgs, json: bool) -> anyhow::Result<String> {
    let board = match args.week {
        Some(week) => api.fetch_scoreboard(&args.league, week).await,
        None => api.fetch_current_scoreboard(&args.league).await,
    }
    .context("fetching scoreboard")?;
    if json {
        return Ok(serde_json::to_string_pretty(&board)?);
    }
    Ok(output::render_scoreboard(&board))
}

async fn roster(api: &FantasyApi, args: &RosterArgs, json: bool) -> anyhow::Result<String> {
    let roster = api
        .fetch_team_roster(&args.league, &args.team)
        .await
        .with_context(|| format!("fetching roster for {:?}", args.team))?;
    if json {
        return Ok(serde_json::to_string_pretty(&roster)?);
    }
    Ok(output::render_roster(&roster))
}

fn eligible_stats(catalog: &StatCatalog, stats: Option<&str>) -> anyhow::Result<StatIdSet> {
    let Some(list) = stats else {
        return Ok(StatCatalog::nba_nine_cat());
    };
    let set = catalog
        .resolve_list(list)
        .map_err(|token| anyhow::anyhow!("unknown stat {token:?}"))?;
    if set.is_empty() {
        bail!("--stats must name at least one stat");
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eligible_defaults_to_nine_cat() {
        let set = eligible_stats(&StatCatalog::NBA, None).unwrap();
        assert_eq!(set, StatCatalog::nba_nine_cat());
    }

    #[test]
    fn eligible_rejects_unknown_and_empty_lists() {
        assert!(eligible_stats(&StatCatalog::NBA, Some("PTS,dunks")).is_err());
        assert!(eligible_stats(&StatCatalog::NBA, Some(" , ")).is_err());
        let set = eligible_stats(&StatCatalog::NBA, Some("fg%,19")).unwrap();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![5, 19]);
    }
}
