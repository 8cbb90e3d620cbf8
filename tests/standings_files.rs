use std::fs;
use std::path::PathBuf;

use footform::pipeline::FeaturedRecord;
use footform::{StandingsRegistry, persist, process_table};

fn fixtures_dir() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path
}

fn run_fixture_table() -> Vec<FeaturedRecord> {
    let dir = fixtures_dir();
    let registry = StandingsRegistry::load_dir(&dir).expect("fixtures dir should load");
    let rows = persist::read_match_table(&dir.join("matches_2024_2025.csv"))
        .expect("fixture table should read");
    process_table(&registry, rows).expect("fixture table should process")
}

fn find<'a>(rows: &'a [FeaturedRecord], team: &str, date: &str) -> &'a FeaturedRecord {
    rows.iter()
        .find(|r| r.record.team == team && r.record.date.to_string() == date)
        .expect("row should exist")
}

#[test]
fn standings_load_from_prefixed_txt_files() {
    let registry = StandingsRegistry::load_dir(&fixtures_dir()).unwrap();
    assert_eq!(registry.len(), 1);
    let table = registry.lookup("ENG-Premier League", "2024-2025").unwrap();
    assert_eq!(table.len(), 10);
    assert_eq!(table[0], "Liverpool");
    assert_eq!(table[9], "Tottenham Hotspur");
}

#[test]
fn legacy_fixture_column_header_is_accepted() {
    let rows =
        persist::read_match_table(&fixtures_dir().join("matches_2024_2025.csv")).unwrap();
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0].fixture, "2024-08-17 Liverpool-Spurs");
}

#[test]
fn rankings_resolve_through_the_alias_table() {
    let rows = run_fixture_table();
    assert_eq!(
        find(&rows, "Spurs", "2024-08-17").features.club_ranking,
        Some(10)
    );
    assert_eq!(
        find(&rows, "Liverpool", "2024-08-17").features.club_ranking,
        Some(1)
    );
    assert_eq!(
        find(&rows, "Chelsea", "2024-08-24").features.club_ranking,
        Some(4)
    );
}

#[test]
fn fixture_table_features_end_to_end() {
    let rows = run_fixture_table();

    // Spurs' second match: window is the opening 1-3 loss to Liverpool
    // (rank 1, higher than Spurs' 10): -1.
    let spurs = find(&rows, "Spurs", "2024-08-24");
    assert!(spurs.features.is_home);
    assert_eq!(spurs.features.avg_goals_for_last5, 1.0);
    assert_eq!(spurs.features.avg_goals_against_last5, 3.0);
    assert_eq!(spurs.features.avg_points_last5, 0.0);
    assert_eq!(spurs.features.recent_form_score_last5, -1.0);

    // Chelsea's opener: self-window draw against lower-ranked Spurs: -1.
    let chelsea_opener = find(&rows, "Chelsea", "2024-08-24");
    assert!(!chelsea_opener.features.is_home);
    assert_eq!(chelsea_opener.features.avg_points_last5, 1.0);
    assert_eq!(chelsea_opener.features.recent_form_score_last5, -1.0);

    // Liverpool's second match: window is the win over lower-ranked Spurs: +1.
    let liverpool = find(&rows, "Liverpool", "2024-08-31");
    assert!(!liverpool.features.is_home);
    assert_eq!(liverpool.features.avg_points_last5, 3.0);
    assert_eq!(liverpool.features.recent_form_score_last5, 1.0);

    // Chelsea's second match: window is the draw with Spurs: -1.
    let chelsea = find(&rows, "Chelsea", "2024-08-31");
    assert!(chelsea.features.is_home);
    assert_eq!(chelsea.features.recent_form_score_last5, -1.0);
}

#[test]
fn augmented_table_round_trips_to_csv() {
    let rows = run_fixture_table();
    let out_path = std::env::temp_dir().join("footform_roundtrip_test.csv");
    persist::write_featured_csv(&out_path, &rows).unwrap();

    let raw = fs::read_to_string(&out_path).unwrap();
    fs::remove_file(&out_path).ok();

    let mut lines = raw.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("match_id,team,opponent,league,season,date"));
    assert!(header.ends_with(
        "avg_goals_for_last5,avg_goals_against_last5,avg_points_last5,recent_form_score_last5"
    ));
    assert_eq!(lines.count(), 6);
    assert!(raw.contains("Spurs 1 3 Liverpool"));
}
