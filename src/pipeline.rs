use std::collections::HashMap;

use anyhow::{Context, Result};

use crate::form::{form_score, match_points};
use crate::history::{HistoryIndex, PartitionKey};
use crate::match_table::{
    DerivedFeatures, GameSummary, MatchRecord, RawMatchRow, extract_home_away,
};
use crate::standings::{self, StandingsRegistry};

/// Rolling window length for all derived stats.
pub const WINDOW: usize = 5;

#[derive(Debug, Clone)]
pub struct FeaturedRecord {
    pub record: MatchRecord,
    pub features: DerivedFeatures,
}

/// Per-(league, season) memo of resolved rankings, keyed by the raw team
/// string. Doubles as the "names seen so far" set: the form scorer looks
/// opponents up by exact string against it, so an opponent that never appears
/// as a `team` value in the partition stays unranked.
type RankCache = HashMap<(String, String), HashMap<String, Option<u32>>>;

/// Featurize one match table. Dates must all parse or the whole table is
/// rejected, since the causal sort cannot be trusted otherwise. Output is in
/// (league, season, date, match_id) order.
pub fn process_table(
    registry: &StandingsRegistry,
    rows: Vec<RawMatchRow>,
) -> Result<Vec<FeaturedRecord>> {
    let mut records = Vec::with_capacity(rows.len());
    for (idx, row) in rows.into_iter().enumerate() {
        let record = row
            .into_record()
            .with_context(|| format!("table row {} unusable", idx + 1))?;
        records.push(record);
    }
    sort_for_causality(&mut records);

    let mut history = HistoryIndex::new();
    let mut rank_cache: RankCache = HashMap::new();
    let mut out = Vec::with_capacity(records.len());

    for record in records {
        let features = featurize(registry, &history, &mut rank_cache, &record);
        // Append only after the row's own window was queried and scored.
        let key = PartitionKey::new(&record.team, &record.league, &record.season);
        history.push(key, record.date, GameSummary::of(&record));
        out.push(FeaturedRecord { record, features });
    }
    Ok(out)
}

fn featurize(
    registry: &StandingsRegistry,
    history: &HistoryIndex,
    rank_cache: &mut RankCache,
    record: &MatchRecord,
) -> DerivedFeatures {
    let is_home = extract_home_away(&record.fixture)
        .is_some_and(|(home, _away)| home == record.team);

    let ranks = rank_cache
        .entry((record.league.clone(), record.season.clone()))
        .or_default();
    let club_ranking = resolve_rank_cached(registry, ranks, record);

    let key = PartitionKey::new(&record.team, &record.league, &record.season);
    let window = history.last_n_before(&key, record.date, WINDOW);

    // Season opener fallback: with no prior matches the window is the current
    // match itself, so the averages degenerate to the match's own values
    // instead of going null. Downstream consumers rely on that.
    let last_five_games: Vec<GameSummary> = if window.is_empty() {
        vec![GameSummary::of(record)]
    } else {
        window.iter().map(|(_, game)| game.clone()).collect()
    };

    let n = last_five_games.len() as f64;
    let avg_goals_for_last5 = last_five_games
        .iter()
        .map(|g| f64::from(g.goals_for))
        .sum::<f64>()
        / n;
    let avg_goals_against_last5 = last_five_games
        .iter()
        .map(|g| f64::from(g.goals_against))
        .sum::<f64>()
        / n;
    let avg_points_last5 = last_five_games
        .iter()
        .map(|g| f64::from(match_points(g.goals_for, g.goals_against)))
        .sum::<f64>()
        / n;

    let recent_form_score_last5 = form_score(&last_five_games, club_ranking, |name| {
        ranks.get(name).copied().flatten()
    });

    DerivedFeatures {
        is_home,
        club_ranking,
        last_five_games,
        avg_goals_for_last5,
        avg_goals_against_last5,
        avg_points_last5,
        recent_form_score_last5,
    }
}

fn resolve_rank_cached(
    registry: &StandingsRegistry,
    ranks: &mut HashMap<String, Option<u32>>,
    record: &MatchRecord,
) -> Option<u32> {
    if let Some(rank) = ranks.get(&record.team) {
        return *rank;
    }
    let rank = standings::team_ranking(&record.team, &record.league, &record.season, registry);
    ranks.insert(record.team.clone(), rank);
    rank
}

fn sort_for_causality(records: &mut [MatchRecord]) {
    records.sort_by(|a, b| {
        (a.league.as_str(), a.season.as_str(), a.date, a.match_id).cmp(&(
            b.league.as_str(),
            b.season.as_str(),
            b.date,
            b.match_id,
        ))
    });
}
