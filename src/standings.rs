use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::name_match;

/// Standings file naming convention: `<prefix><season>.txt`, one team per
/// line, best team first.
const LEAGUE_FILE_PREFIXES: &[(&str, &str)] = &[
    ("ESP-La Liga", "ll_"),
    ("GER-Bundesliga", "bl_"),
    ("ITA-Serie A", "sa_"),
    ("ENG-Premier League", "pl_"),
    ("FRA-Ligue 1", "l1_"),
];

/// Final league tables keyed by (league, season). Built once per run and
/// never mutated, so it is safe to share across rayon workers by reference.
#[derive(Debug, Default)]
pub struct StandingsRegistry {
    tables: HashMap<(String, String), Vec<String>>,
}

impl StandingsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, league: &str, season: &str, teams: Vec<String>) {
        self.tables
            .insert((league.to_string(), season.to_string()), teams);
    }

    /// Absent league-seasons are a valid state: every ranking for that
    /// partition is simply unknown.
    pub fn lookup(&self, league: &str, season: &str) -> Option<&[String]> {
        self.tables
            .get(&(league.to_string(), season.to_string()))
            .map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Scan a directory for standings `.txt` files. Files whose names do not
    /// start with a known league prefix are ignored.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut registry = Self::new();
        let entries = fs::read_dir(dir)
            .with_context(|| format!("read standings dir {}", dir.display()))?;
        let mut paths: Vec<_> = entries
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "txt"))
            .collect();
        paths.sort();

        for path in paths {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let Some((league, season)) = league_season_from_stem(stem) else {
                continue;
            };
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("read standings file {}", path.display()))?;
            let teams: Vec<String> = raw
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect();
            registry.insert(league, &season, teams);
        }
        Ok(registry)
    }
}

fn league_season_from_stem(stem: &str) -> Option<(&'static str, String)> {
    LEAGUE_FILE_PREFIXES
        .iter()
        .find_map(|(league, prefix)| {
            stem.strip_prefix(prefix)
                .map(|season| (*league, season.to_string()))
        })
}

/// A team's final rank for a season (1 = champion), or `None` when either the
/// standings are missing or the name does not resolve.
pub fn team_ranking(
    team: &str,
    league: &str,
    season: &str,
    registry: &StandingsRegistry,
) -> Option<u32> {
    let table = registry.lookup(league, season)?;
    let matched = name_match::resolve_team_name(team, table, name_match::DEFAULT_THRESHOLD)?;
    table
        .iter()
        .position(|t| t == matched)
        .map(|idx| idx as u32 + 1)
}
