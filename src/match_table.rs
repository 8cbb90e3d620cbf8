use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

/// One team's perspective on one fixture. A fixture normally yields two of
/// these (one per side) sharing a date and swapped team/opponent.
#[derive(Debug, Clone)]
pub struct MatchRecord {
    pub match_id: u64,
    pub team: String,
    pub opponent: String,
    pub league: String,
    pub season: String,
    pub date: NaiveDate,
    pub goals_for: u32,
    pub goals_against: u32,
    pub fixture: String,
}

/// What the form scorer and the export string need from a window entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub team: String,
    pub goals_for: u32,
    pub goals_against: u32,
    pub opponent: String,
}

impl GameSummary {
    pub fn of(record: &MatchRecord) -> Self {
        Self {
            team: record.team.clone(),
            goals_for: record.goals_for,
            goals_against: record.goals_against,
            opponent: record.opponent.clone(),
        }
    }
}

impl std::fmt::Display for GameSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.team, self.goals_for, self.goals_against, self.opponent
        )
    }
}

/// Derived, history-dependent fields for one record.
#[derive(Debug, Clone)]
pub struct DerivedFeatures {
    pub is_home: bool,
    pub club_ranking: Option<u32>,
    pub last_five_games: Vec<GameSummary>,
    pub avg_goals_for_last5: f64,
    pub avg_goals_against_last5: f64,
    pub avg_points_last5: f64,
    pub recent_form_score_last5: f64,
}

/// Raw CSV row before date parsing. Extra columns in the input are ignored.
/// `outfield_players` is accepted as a legacy header for the fixture column.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMatchRow {
    pub match_id: u64,
    pub team: String,
    pub opponent: String,
    pub league: String,
    pub season: String,
    pub date: String,
    pub goals_for: u32,
    pub goals_against: u32,
    #[serde(default, alias = "outfield_players")]
    pub fixture: String,
}

impl RawMatchRow {
    pub fn into_record(self) -> Result<MatchRecord> {
        let date = parse_match_date(&self.date)
            .with_context(|| format!("match {} has a bad date", self.match_id))?;
        Ok(MatchRecord {
            match_id: self.match_id,
            team: self.team,
            opponent: self.opponent,
            league: self.league,
            season: self.season,
            date,
            goals_for: self.goals_for,
            goals_against: self.goals_against,
            fixture: self.fixture,
        })
    }
}

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d/%m/%y", "%m/%d/%Y"];

/// Mixed-format date parsing. Sort order correctness depends on every date in
/// a table parsing, so callers treat a failure here as fatal for the table.
pub fn parse_match_date(raw: &str) -> Result<NaiveDate> {
    let s = raw.trim();
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    Err(anyhow!("unrecognized date format: {raw:?}"))
}

/// Pull (home, away) out of a fixture descriptor like
/// "2025-08-15 Liverpool-Bournemouth". The teams are whatever follows the
/// first ISO date, split on the last hyphen so hyphenated home names survive.
pub fn extract_home_away(descriptor: &str) -> Option<(String, String)> {
    let date_start = find_iso_date(descriptor)?;
    let rest = &descriptor[date_start + 10..];
    if !rest.starts_with(|c: char| c.is_whitespace()) {
        return None;
    }
    let (home, away) = rest.trim().rsplit_once('-')?;
    let home = home.trim();
    let away = away.trim();
    if home.is_empty() || away.is_empty() {
        return None;
    }
    Some((home.to_string(), away.to_string()))
}

fn find_iso_date(s: &str) -> Option<usize> {
    let b = s.as_bytes();
    if b.len() < 10 {
        return None;
    }
    (0..=b.len() - 10).find(|&i| {
        b[i..i + 4].iter().all(u8::is_ascii_digit)
            && b[i + 4] == b'-'
            && b[i + 5..i + 7].iter().all(u8::is_ascii_digit)
            && b[i + 7] == b'-'
            && b[i + 8..i + 10].iter().all(u8::is_ascii_digit)
    })
}

#[cfg(test)]
mod tests {
    use super::{extract_home_away, parse_match_date};
    use chrono::NaiveDate;

    #[test]
    fn parses_mixed_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 8, 15).unwrap();
        assert_eq!(parse_match_date("2025-08-15").unwrap(), expected);
        assert_eq!(parse_match_date(" 2025-08-15 17:30:00 ").unwrap(), expected);
        assert_eq!(parse_match_date("15/08/2025").unwrap(), expected);
        assert!(parse_match_date("August 15th").is_err());
        assert!(parse_match_date("").is_err());
    }

    #[test]
    fn extracts_home_and_away_from_descriptor() {
        assert_eq!(
            extract_home_away("2025-08-15 Liverpool-Bournemouth"),
            Some(("Liverpool".to_string(), "Bournemouth".to_string()))
        );
        // Date found by scan, not anchored at the start.
        assert_eq!(
            extract_home_away("round 1: 2025-08-16 Wolves-Man City"),
            Some(("Wolves".to_string(), "Man City".to_string()))
        );
        // Last hyphen splits, so a hyphenated home name stays intact.
        assert_eq!(
            extract_home_away("2024-11-02 Saint-Etienne-Monaco"),
            Some(("Saint-Etienne".to_string(), "Monaco".to_string()))
        );
    }

    #[test]
    fn malformed_descriptor_is_none() {
        assert_eq!(extract_home_away(""), None);
        assert_eq!(extract_home_away("Liverpool-Bournemouth"), None);
        assert_eq!(extract_home_away("2025-08-15"), None);
        assert_eq!(extract_home_away("2025-08-15 no separator here"), None);
        assert_eq!(extract_home_away("2025-08-15 -Bournemouth"), None);
    }
}
