//! Ranking-aware feature engineering for football match tables.
//!
//! Given per-team match records and final league standings, this crate
//! derives strictly-causal rolling features per record: home/away side,
//! club ranking, last-five-game averages, and a ranking-adjusted form score.

pub mod form;
pub mod history;
pub mod match_table;
pub mod name_match;
pub mod persist;
pub mod pipeline;
pub mod standings;

pub use match_table::{DerivedFeatures, GameSummary, MatchRecord, RawMatchRow};
pub use pipeline::{FeaturedRecord, process_table};
pub use standings::StandingsRegistry;
