//! Tournament engine: scoring helpers, standings, elimination bracket, seeding.

mod bracket;
mod scoring;
mod seeding;
mod standings;

pub use bracket::{
    build_bracket, champion, initial_slots, round_count, BracketMatch, BracketOptions, Round, Slot,
};
pub use scoring::{
    hit_index, hits_given, hits_taken, matches_played, win_percentage, wins, Record, ALL_ROUNDS,
};
pub use seeding::{assign_seeds, bracket_positions, ranking_from_standings, read_ranked_list, RankedEntry};
pub use standings::{
    standings, SortColumn, SortDirection, StandingsOptions, StandingsRow, UnderqualifiedPolicy,
    MIN_QUALIFYING_MATCHES,
};
