//! Tournament snapshot and TournamentError.

use crate::logic::{build_bracket, standings, BracketOptions, Round, StandingsOptions, StandingsRow};
use crate::models::game::Match;
use crate::models::player::{Player, PlayerDetails, PoolId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Errors that can occur while assembling tournament data.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName(String),
    /// Bracket capacity must be a power of two, at least 2.
    InvalidCapacity { capacity: u32 },
    /// A match record names a player that is not on the roster.
    MatchForUnknownPlayer { player: String },
    /// A ranked list could not be read.
    RankedListRead(String),
    /// The same name appears twice in one ranked list.
    DuplicateRankedName(String),
    /// Snapshot JSON could not be parsed.
    Json(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::DuplicatePlayerName(name) => {
                write!(f, "A player named {} already exists", name)
            }
            TournamentError::InvalidCapacity { capacity } => {
                write!(f, "Bracket capacity must be a power of two, at least 2 (got {})", capacity)
            }
            TournamentError::MatchForUnknownPlayer { player } => {
                write!(f, "Match references unknown player {}", player)
            }
            TournamentError::RankedListRead(msg) => write!(f, "Could not read ranked list: {}", msg),
            TournamentError::DuplicateRankedName(name) => {
                write!(f, "Player {} appears more than once in the ranked list", name)
            }
            TournamentError::Json(msg) => write!(f, "Invalid tournament JSON: {}", msg),
        }
    }
}

impl std::error::Error for TournamentError {}

impl From<csv::Error> for TournamentError {
    fn from(err: csv::Error) -> Self {
        TournamentError::RankedListRead(err.to_string())
    }
}

impl From<serde_json::Error> for TournamentError {
    fn from(err: serde_json::Error) -> Self {
        TournamentError::Json(err.to_string())
    }
}

/// Tournament identifier.
pub type TournamentId = u64;

/// The two formats a tournament can run in.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentFormat {
    /// Round-robin pools ranked by a shared standings table.
    #[default]
    Pools,
    /// Single-elimination bracket.
    Elimination,
}

/// A consistent snapshot of one tournament: its players with their match histories.
///
/// Rebuilt by the caller whenever the stored data changes; standings and brackets
/// computed from it are never stored.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    #[serde(default)]
    pub format: TournamentFormat,
    /// Fixed bracket size (elimination only).
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub players: Vec<Player>,
}

impl Tournament {
    /// Create an empty tournament.
    pub fn new(id: TournamentId, format: TournamentFormat) -> Self {
        Self {
            id,
            format,
            capacity: None,
            players: Vec::new(),
        }
    }

    /// Fix the bracket size.
    pub fn with_capacity(mut self, capacity: u32) -> Result<Self, TournamentError> {
        BracketOptions::with_capacity(self.id, capacity)?;
        self.capacity = Some(capacity);
        Ok(self)
    }

    /// Parse a snapshot in the external JSON shape. Player names must be unique.
    pub fn from_json(json: &str) -> Result<Self, TournamentError> {
        let Tournament {
            id,
            format,
            capacity,
            players,
        } = serde_json::from_str(json)?;
        if let Some(capacity) = capacity {
            BracketOptions::with_capacity(id, capacity)?;
        }
        let mut tournament = Self {
            id,
            format,
            capacity,
            players: Vec::with_capacity(players.len()),
        };
        for p in players {
            tournament.push_player(p)?;
        }
        Ok(tournament)
    }

    /// Build a snapshot from flat records: every match is attached to both of its players.
    pub fn from_records(
        id: TournamentId,
        format: TournamentFormat,
        details: Vec<PlayerDetails>,
        matches: Vec<Match>,
    ) -> Result<Self, TournamentError> {
        let mut tournament = Self::new(id, format);
        for d in details {
            tournament.add_player(d)?;
        }
        for m in matches {
            for name in [&m.player1, &m.player2] {
                if tournament.player(name).is_none() {
                    return Err(TournamentError::MatchForUnknownPlayer {
                        player: name.clone(),
                    });
                }
            }
            for p in tournament.players.iter_mut().filter(|p| m.involves(p.name())) {
                p.matches.push(m.clone());
            }
        }
        Ok(tournament)
    }

    /// Register a player. Names must be unique (case-insensitive).
    pub fn add_player(&mut self, details: PlayerDetails) -> Result<(), TournamentError> {
        let mut details = details;
        details.player_name = details.player_name.trim().to_string();
        details.tournament_id = self.id;
        self.push_player(Player::from_details(details))
    }

    fn push_player(&mut self, player: Player) -> Result<(), TournamentError> {
        let is_duplicate = self
            .players
            .iter()
            .any(|p| p.name().eq_ignore_ascii_case(player.name()));
        if is_duplicate {
            return Err(TournamentError::DuplicatePlayerName(player.name().to_string()));
        }
        self.players.push(player);
        Ok(())
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name() == name)
    }

    /// Ranked standings across the whole tournament (all pools share one table).
    pub fn standings(&self, options: &StandingsOptions) -> Vec<StandingsRow<'_>> {
        standings(&self.players, options)
    }

    /// The elimination bracket for the registered players, in registration order
    /// unless every player carries a seed assignment. Empty when under two slots.
    pub fn bracket(&self) -> Vec<Round> {
        let options = BracketOptions {
            tournament_id: self.id,
            capacity: self.capacity,
        };
        let slots: Vec<Option<Player>> = self.players.iter().cloned().map(Some).collect();
        build_bracket(&options, &slots)
    }

    /// Players grouped by pool for display. Players without a pool are keyed by `None`.
    pub fn pools(&self) -> BTreeMap<Option<PoolId>, Vec<&Player>> {
        let mut pools: BTreeMap<Option<PoolId>, Vec<&Player>> = BTreeMap::new();
        for p in &self.players {
            pools.entry(p.player.pool_id).or_default().push(p);
        }
        pools
    }
}
