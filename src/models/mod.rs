//! Data structures for the fencing tournament: players, match records, tournament snapshot.

mod game;
mod player;
mod tournament;

pub use game::{Match, MatchId};
pub use player::{Player, PlayerDetails, PoolId};
pub use tournament::{Tournament, TournamentError, TournamentFormat, TournamentId};
