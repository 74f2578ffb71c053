//! Player view: registration details plus the denormalized match history.

use crate::models::game::Match;
use serde::{Deserialize, Serialize};

/// Pool (round-robin group) identifier. Display metadata only.
pub type PoolId = u64;

/// Registration details of a player in one tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerDetails {
    /// Unique per tournament; identifies the player everywhere in the engine.
    pub player_name: String,
    #[serde(default)]
    pub tournament_id: u64,
    #[serde(default)]
    pub pool_id: Option<PoolId>,
    /// 1-based seed from a prior ranking.
    #[serde(default)]
    pub bracket_seed: Option<u32>,
    /// 1-based first-round match slot the seed was placed into.
    #[serde(default)]
    pub bracket_match: Option<u32>,
}

impl PlayerDetails {
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            tournament_id: 0,
            pool_id: None,
            bracket_seed: None,
            bracket_match: None,
        }
    }
}

/// A player together with every match it took part in.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub player: PlayerDetails,
    #[serde(default)]
    pub matches: Vec<Match>,
}

impl Player {
    /// A player with no matches yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            player: PlayerDetails::new(name),
            matches: Vec::new(),
        }
    }

    pub fn from_details(player: PlayerDetails) -> Self {
        Self {
            player,
            matches: Vec::new(),
        }
    }

    pub fn with_matches(mut self, matches: Vec<Match>) -> Self {
        self.matches = matches;
        self
    }

    pub fn with_pool(mut self, pool_id: PoolId) -> Self {
        self.player.pool_id = Some(pool_id);
        self
    }

    pub fn name(&self) -> &str {
        &self.player.player_name
    }

    /// Both seed and match slot are assigned.
    pub fn is_seeded(&self) -> bool {
        self.player.bracket_seed.is_some() && self.player.bracket_match.is_some()
    }

    /// The match this player shares with `opponent` in `round`, if any.
    /// A decided record wins over an undecided one.
    pub fn match_against(&self, opponent: &str, round: u32) -> Option<&Match> {
        let mut shared = self
            .matches
            .iter()
            .filter(|m| m.round == round && m.is_between(self.name(), opponent));
        let first = shared.next()?;
        if first.is_decided() {
            return Some(first);
        }
        shared.find(|m| m.is_decided()).or(Some(first))
    }
}
