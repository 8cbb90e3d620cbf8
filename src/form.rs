use std::cmp::Ordering;

use crate::match_table::GameSummary;

/// League points for a single result.
pub fn match_points(goals_for: u32, goals_against: u32) -> u32 {
    match goals_for.cmp(&goals_against) {
        Ordering::Greater => 3,
        Ordering::Equal => 1,
        Ordering::Less => 0,
    }
}

/// Ranking-adjusted form over a window of results.
///
/// Per game, against a higher-ranked opponent (lower rank number):
/// win +2, draw +1, loss -1. Against a lower-or-equal-ranked opponent:
/// win +1, draw -1, loss -2. The score is the mean over the games whose
/// opponent rank resolves; games with an unresolved opponent are excluded
/// from both numerator and denominator. Returns 0.0 when the window is
/// empty, the team's own rank is unresolved, or nothing resolves.
pub fn form_score<F>(window: &[GameSummary], team_rank: Option<u32>, rank_of: F) -> f64
where
    F: Fn(&str) -> Option<u32>,
{
    let Some(team_rank) = team_rank else {
        return 0.0;
    };

    let mut total = 0_i64;
    let mut scored = 0_u32;
    for game in window {
        let Some(opponent_rank) = rank_of(&game.opponent) else {
            continue;
        };
        scored += 1;
        let opponent_higher = opponent_rank < team_rank;
        total += match (game.goals_for.cmp(&game.goals_against), opponent_higher) {
            (Ordering::Greater, true) => 2,
            (Ordering::Greater, false) => 1,
            (Ordering::Equal, true) => 1,
            (Ordering::Equal, false) => -1,
            (Ordering::Less, true) => -1,
            (Ordering::Less, false) => -2,
        };
    }

    if scored == 0 {
        0.0
    } else {
        total as f64 / f64::from(scored)
    }
}
