use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::match_table::RawMatchRow;
use crate::pipeline::FeaturedRecord;

/// Read one match table. Column order does not matter and unknown columns are
/// ignored; a row that fails to decode poisons the whole table.
pub fn read_match_table(path: &Path) -> Result<Vec<RawMatchRow>> {
    let file =
        File::open(path).with_context(|| format!("open match table {}", path.display()))?;
    let mut reader = csv::Reader::from_reader(file);
    let mut rows = Vec::new();
    for (idx, row) in reader.deserialize::<RawMatchRow>().enumerate() {
        rows.push(row.with_context(|| format!("decode row {} of {}", idx + 1, path.display()))?);
    }
    Ok(rows)
}

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    match_id: u64,
    team: &'a str,
    opponent: &'a str,
    league: &'a str,
    season: &'a str,
    date: String,
    goals_for: u32,
    goals_against: u32,
    fixture: &'a str,
    is_home: u8,
    club_ranking: Option<u32>,
    last_five_games: String,
    avg_goals_for_last5: f64,
    avg_goals_against_last5: f64,
    avg_points_last5: f64,
    recent_form_score_last5: f64,
}

impl<'a> OutputRow<'a> {
    fn from_featured(row: &'a FeaturedRecord) -> Self {
        let record = &row.record;
        let features = &row.features;
        let last_five_games = features
            .last_five_games
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            match_id: record.match_id,
            team: &record.team,
            opponent: &record.opponent,
            league: &record.league,
            season: &record.season,
            date: record.date.to_string(),
            goals_for: record.goals_for,
            goals_against: record.goals_against,
            fixture: &record.fixture,
            is_home: u8::from(features.is_home),
            club_ranking: features.club_ranking,
            last_five_games,
            avg_goals_for_last5: features.avg_goals_for_last5,
            avg_goals_against_last5: features.avg_goals_against_last5,
            avg_points_last5: features.avg_points_last5,
            recent_form_score_last5: features.recent_form_score_last5,
        }
    }
}

/// Write the augmented table. An absent ranking serializes as an empty cell.
pub fn write_featured_csv(path: &Path, rows: &[FeaturedRecord]) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("create output {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);
    for row in rows {
        writer
            .serialize(OutputRow::from_featured(row))
            .with_context(|| format!("write match {}", row.record.match_id))?;
    }
    writer.flush().context("flush output csv")?;
    Ok(())
}
