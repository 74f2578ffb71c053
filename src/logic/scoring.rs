//! Shared scoring helpers: win counts, hit totals, hit index, win percentage.
//!
//! A round filter of `0` means "all rounds".

use crate::models::{Match, Player};
use serde::Serialize;

/// Round filter value meaning every round.
pub const ALL_ROUNDS: u32 = 0;

fn in_scope(m: &Match, round: u32) -> bool {
    round == ALL_ROUNDS || m.round == round
}

/// Aggregate statistics of one player over a round scope.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Record {
    pub matches: u32,
    pub wins: u32,
    /// Hits scored.
    pub given: u32,
    /// Hits conceded.
    pub taken: u32,
}

impl Record {
    /// Tally `player`'s matches in `round` (or all rounds for `ALL_ROUNDS`).
    ///
    /// Undecided matches count as played and their hits count, but they add no win.
    pub fn for_player(player: &Player, round: u32) -> Self {
        let name = player.name();
        let mut record = Record::default();
        for m in player.matches.iter().filter(|m| in_scope(m, round)) {
            let Some((own, opp)) = m.hits_for(name) else {
                continue;
            };
            if m.has_unknown_winner() {
                log::warn!(
                    "match {} vs {} (round {}) names unknown winner {:?}; no win counted",
                    m.player1,
                    m.player2,
                    m.round,
                    m.winner
                );
            }
            record.matches += 1;
            record.given += own;
            record.taken += opp;
            if m.won_by(name) {
                record.wins += 1;
            }
        }
        record
    }

    pub fn hit_index(&self) -> i64 {
        i64::from(self.given) - i64::from(self.taken)
    }

    /// `wins / matches * 100`, exactly `0.0` when either is zero.
    pub fn win_percentage(&self) -> f64 {
        if self.wins == 0 || self.matches == 0 {
            return 0.0;
        }
        f64::from(self.wins) / f64::from(self.matches) * 100.0
    }
}

/// Number of matches `player` won, within `round` (or all rounds).
pub fn wins(player: &Player, round: u32) -> u32 {
    let name = player.name();
    player
        .matches
        .iter()
        .filter(|m| in_scope(m, round) && m.won_by(name))
        .count() as u32
}

/// Number of matches `player` fenced, within `round` (or all rounds).
pub fn matches_played(player: &Player, round: u32) -> u32 {
    let name = player.name();
    player
        .matches
        .iter()
        .filter(|m| in_scope(m, round) && m.involves(name))
        .count() as u32
}

/// Hits scored across every round.
pub fn hits_given(player: &Player) -> u32 {
    Record::for_player(player, ALL_ROUNDS).given
}

/// Hits conceded across every round.
pub fn hits_taken(player: &Player) -> u32 {
    Record::for_player(player, ALL_ROUNDS).taken
}

/// Hits scored minus hits conceded across every round.
pub fn hit_index(player: &Player) -> i64 {
    Record::for_player(player, ALL_ROUNDS).hit_index()
}

/// Win rate over all rounds, `0.0` for a player without wins or without matches.
pub fn win_percentage(player: &Player) -> f64 {
    Record::for_player(player, ALL_ROUNDS).win_percentage()
}
