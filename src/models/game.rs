//! Match records: one bout between two named fencers.

use serde::{Deserialize, Serialize};

/// Storage id of a match record (absent on records not yet persisted).
pub type MatchId = u64;

/// A bout between two players, as stored by the persistence layer.
///
/// The engine only reads these. `winner`, when set and valid, names `player1` or `player2`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MatchId>,
    /// Match number within the round.
    #[serde(rename = "match", default)]
    pub number: u32,
    pub player1: String,
    pub player2: String,
    #[serde(default)]
    pub player1_hits: u32,
    #[serde(default)]
    pub player2_hits: u32,
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub tournament_id: u64,
    pub round: u32,
}

impl Match {
    /// An undecided bout with no hits recorded.
    pub fn new(player1: impl Into<String>, player2: impl Into<String>, round: u32) -> Self {
        Self {
            id: None,
            number: 0,
            player1: player1.into(),
            player2: player2.into(),
            player1_hits: 0,
            player2_hits: 0,
            winner: None,
            tournament_id: 0,
            round,
        }
    }

    /// Set the hit counts (player1, player2).
    pub fn with_hits(mut self, player1_hits: u32, player2_hits: u32) -> Self {
        self.player1_hits = player1_hits;
        self.player2_hits = player2_hits;
        self
    }

    /// Declare the winner by name.
    pub fn with_winner(mut self, winner: impl Into<String>) -> Self {
        self.winner = Some(winner.into());
        self
    }

    /// The declared winner, if it names one of the two participants.
    ///
    /// A winner naming neither player counts as no winner.
    pub fn decided_winner(&self) -> Option<&str> {
        self.winner
            .as_deref()
            .filter(|w| *w == self.player1 || *w == self.player2)
    }

    /// A winner is set but names neither participant.
    pub fn has_unknown_winner(&self) -> bool {
        self.winner.is_some() && self.decided_winner().is_none()
    }

    pub fn is_decided(&self) -> bool {
        self.decided_winner().is_some()
    }

    /// Equal hits and no winner: a draw waiting for priority to be resolved.
    pub fn is_unresolved_draw(&self) -> bool {
        self.player1_hits == self.player2_hits && !self.is_decided()
    }

    pub fn involves(&self, name: &str) -> bool {
        self.player1 == name || self.player2 == name
    }

    /// True if this is a bout between `a` and `b`, in either order.
    pub fn is_between(&self, a: &str, b: &str) -> bool {
        (self.player1 == a && self.player2 == b) || (self.player1 == b && self.player2 == a)
    }

    /// `(own hits, opponent hits)` from `name`'s side, or `None` if they did not fence.
    pub fn hits_for(&self, name: &str) -> Option<(u32, u32)> {
        if self.player1 == name {
            Some((self.player1_hits, self.player2_hits))
        } else if self.player2 == name {
            Some((self.player2_hits, self.player1_hits))
        } else {
            None
        }
    }

    pub fn won_by(&self, name: &str) -> bool {
        self.decided_winner() == Some(name)
    }
}
