//! Fencing tournament engine: pool standings and single-elimination brackets
//! computed from players and their match records.

pub mod logic;
pub mod models;

pub use logic::{
    assign_seeds, bracket_positions, build_bracket, champion, hit_index, hits_given, hits_taken,
    initial_slots, matches_played, ranking_from_standings, read_ranked_list, round_count, standings,
    win_percentage, wins, BracketMatch, BracketOptions, RankedEntry, Record, Round, Slot,
    SortColumn, SortDirection, StandingsOptions, StandingsRow, UnderqualifiedPolicy, ALL_ROUNDS,
    MIN_QUALIFYING_MATCHES,
};
pub use models::{
    Match, MatchId, Player, PlayerDetails, PoolId, Tournament, TournamentError, TournamentFormat,
    TournamentId,
};
