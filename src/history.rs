use std::collections::HashMap;

use chrono::NaiveDate;

use crate::match_table::GameSummary;

/// One team's matches within one league and one season.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PartitionKey {
    pub team: String,
    pub league: String,
    pub season: String,
}

impl PartitionKey {
    pub fn new(team: &str, league: &str, season: &str) -> Self {
        Self {
            team: team.to_string(),
            league: league.to_string(),
            season: season.to_string(),
        }
    }
}

/// Append-only per-partition match history. Rows must be pushed in
/// non-decreasing date order within a partition; the causal-window query is
/// then a tail slice. The current record is queried for before it is pushed,
/// so it can never appear in its own window.
#[derive(Debug, Default)]
pub struct HistoryIndex {
    partitions: HashMap<PartitionKey, Vec<(NaiveDate, GameSummary)>>,
}

impl HistoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent `n` matches strictly before `before`, oldest first.
    pub fn last_n_before(
        &self,
        key: &PartitionKey,
        before: NaiveDate,
        n: usize,
    ) -> &[(NaiveDate, GameSummary)] {
        let Some(rows) = self.partitions.get(key) else {
            return &[];
        };
        let end = rows.partition_point(|(date, _)| *date < before);
        let start = end.saturating_sub(n);
        &rows[start..end]
    }

    pub fn push(&mut self, key: PartitionKey, date: NaiveDate, game: GameSummary) {
        let rows = self.partitions.entry(key).or_default();
        debug_assert!(rows.last().is_none_or(|(last, _)| *last <= date));
        rows.push((date, game));
    }
}

#[cfg(test)]
mod tests {
    use super::{HistoryIndex, PartitionKey};
    use crate::match_table::GameSummary;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn game(opponent: &str) -> GameSummary {
        GameSummary {
            team: "Us".to_string(),
            goals_for: 1,
            goals_against: 0,
            opponent: opponent.to_string(),
        }
    }

    #[test]
    fn window_is_strictly_causal_and_capped() {
        let key = PartitionKey::new("Us", "ENG-Premier League", "2024-2025");
        let mut index = HistoryIndex::new();
        for d in 1..=7 {
            index.push(key.clone(), day(d), game(&format!("Opp{d}")));
        }

        let window = index.last_n_before(&key, day(7), 5);
        assert_eq!(window.len(), 5);
        assert_eq!(window[0].1.opponent, "Opp2");
        assert_eq!(window[4].1.opponent, "Opp6");
        assert!(window.iter().all(|(date, _)| *date < day(7)));
    }

    #[test]
    fn same_day_match_is_excluded() {
        let key = PartitionKey::new("Us", "ENG-Premier League", "2024-2025");
        let mut index = HistoryIndex::new();
        index.push(key.clone(), day(3), game("Opp"));
        assert!(index.last_n_before(&key, day(3), 5).is_empty());
        assert_eq!(index.last_n_before(&key, day(4), 5).len(), 1);
    }

    #[test]
    fn partitions_do_not_leak() {
        let this_season = PartitionKey::new("Us", "ENG-Premier League", "2024-2025");
        let last_season = PartitionKey::new("Us", "ENG-Premier League", "2023-2024");
        let other_team = PartitionKey::new("Them", "ENG-Premier League", "2024-2025");
        let mut index = HistoryIndex::new();
        index.push(last_season.clone(), day(1), game("A"));
        index.push(other_team.clone(), day(1), game("B"));

        assert!(index.last_n_before(&this_season, day(9), 5).is_empty());
        assert_eq!(index.last_n_before(&last_season, day(9), 5).len(), 1);
        assert_eq!(index.last_n_before(&other_team, day(9), 5).len(), 1);
    }
}
