use serde::Serialize;
use std::collections::BTreeMap;
use yf_stats::{
    CategoryMatchupResult, Entity, LeagueSummary, MatchupRecord, Roster, Scoreboard, StatCatalog,
    StatId, StatsDiff,
};

#[derive(Debug, Serialize)]
pub struct DiffReport {
    pub entity_a: String,
    pub entity_b: String,
    pub diffs: BTreeMap<String, f64>,
}

impl DiffReport {
    pub fn new(diff: &StatsDiff, catalog: &StatCatalog) -> Self {
        Self {
            entity_a: diff.entity_a.clone(),
            entity_b: diff.entity_b.clone(),
            diffs: diff.named_diffs(catalog),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MatchupReport<'a> {
    pub record: MatchupRecord,
    pub results: &'a [CategoryMatchupResult],
}

pub fn render_diff(diff: &StatsDiff, catalog: &StatCatalog) -> String {
    let mut out = format!("{} vs {}\n", diff.entity_a, diff.entity_b);
    if diff.diffs.is_empty() {
        out.push_str("  (no comparable stats)\n");
    }
    for (&stat_id, value) in &diff.diffs {
        let marker = match value.partial_cmp(&0.0) {
            Some(std::cmp::Ordering::Equal) | None => ' ',
            Some(std::cmp::Ordering::Greater) if !catalog.is_inverse(stat_id) => '+',
            Some(std::cmp::Ordering::Less) if catalog.is_inverse(stat_id) => '+',
            Some(_) => '-',
        };
        out.push_str(&format!("  {marker} {:<6} {value:>+10.3}\n", catalog.label(stat_id)));
    }
    out
}

pub fn render_matchups(
    results: &[CategoryMatchupResult],
    record: &MatchupRecord,
    catalog: &StatCatalog,
) -> String {
    let mut out = format!(
        "{}: {}-{}-{} vs league ({} / {} / {} categories)\n",
        record.home,
        record.wins,
        record.losses,
        record.ties,
        record.categories_won,
        record.categories_lost,
        record.categories_tied
    );
    for result in results {
        let (won, lost, tied) = result.score();
        out.push_str(&format!(
            "  vs {:<24} {won}-{lost}-{tied}\n     won:  {}\n     lost: {}\n     tied: {}\n",
            result.away,
            labels(&result.won, catalog),
            labels(&result.lost, catalog),
            labels(&result.tied, catalog)
        ));
    }
    out
}

pub fn render_players(players: &[Entity], stat_id: StatId, catalog: &StatCatalog) -> String {
    players
        .iter()
        .enumerate()
        .map(|(rank, player)| {
            let value = player.value_of(stat_id).map(|v| v.as_str()).unwrap_or("-");
            format!("{:>3}. {:<28} {} {value}\n", rank + 1, player.name, catalog.label(stat_id))
        })
        .collect()
}

pub fn render_catalog(catalog: &StatCatalog) -> String {
    let nine_cat = StatCatalog::nba_nine_cat();
    catalog
        .entries()
        .map(|(id, name)| {
            let orientation = if catalog.is_inverse(id) { "lower wins" } else { "higher wins" };
            let default = if nine_cat.contains(&id) { "default" } else { "" };
            format!("{id:>8}  {name:<5} {orientation:<12} {default}\n")
        })
        .collect()
}

pub fn render_standings(summary: &LeagueSummary) -> String {
    let header = format!("{} ({})\n", summary.name, summary.key);
    let rows = summary.standings.iter().map(|s| {
        let rank = s.rank.map_or_else(|| "-".to_owned(), |r| r.to_string());
        format!("{rank:>3}. {:<28} {}-{}-{}\n", s.team, s.wins, s.losses, s.ties)
    });
    std::iter::once(header).chain(rows).collect()
}

pub fn render_scoreboard(board: &Scoreboard) -> String {
    let week = board.week.map_or_else(|| "current week".to_owned(), |w| format!("week {w}"));
    let mut out = format!("Scoreboard, {week}\n");
    if board.matchups.is_empty() {
        out.push_str("  (no matchups)\n");
    }
    for matchup in &board.matchups {
        let names: Vec<_> = matchup.teams.iter().map(|t| t.name.as_str()).collect();
        let winner = matchup.winner().map(|t| format!(" (winner: {})", t.name)).unwrap_or_default();
        out.push_str(&format!("  {}{winner}\n", names.join(" vs ")));
    }
    out
}

pub fn render_roster(roster: &Roster) -> String {
    let header = format!("{} ({} players)\n", roster.team.name, roster.players.len());
    let rows = roster.players.iter().map(|p| format!("  {:<28} {}\n", p.name, p.key));
    std::iter::once(header).chain(rows).collect()
}

fn labels(ids: &[StatId], catalog: &StatCatalog) -> String {
    if ids.is_empty() {
        return "-".into();
    }
    ids.iter()
        .map(|&id| catalog.label(id))
        .collect::<Vec<_>>()
        .join(", ")
}
