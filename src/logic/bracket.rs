//! Single-elimination bracket: pairs slots round by round and carries winners forward.
//!
//! Each slot is a concrete player, a seat reserved for a winner not yet decided
//! (`Pending`), or a permanent empty seat (`Bye`). Only a bye lets the opponent
//! advance without a match.

use crate::models::{Match, MatchId, Player, TournamentError, TournamentId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One seat in a bracket pairing.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "player", rename_all = "snake_case")]
pub enum Slot {
    Occupied(Player),
    /// Filled later by the winner of an undecided earlier match.
    Pending,
    /// Never filled.
    Bye,
}

impl Slot {
    pub fn player(&self) -> Option<&Player> {
        match self {
            Slot::Occupied(p) => Some(p),
            Slot::Pending | Slot::Bye => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Slot::Pending)
    }

    pub fn is_bye(&self) -> bool {
        matches!(self, Slot::Bye)
    }
}

impl From<Option<Player>> for Slot {
    fn from(player: Option<Player>) -> Self {
        player.map_or(Slot::Bye, Slot::Occupied)
    }
}

/// A pairing in one round with its result, reused from the stored match when the
/// two players already have one for this round, otherwise a zero-hit placeholder.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketMatch {
    /// Storage id of the reused match record; `None` for placeholders.
    pub id: Option<MatchId>,
    pub tournament_id: TournamentId,
    pub round: u32,
    /// 1-based position within the round.
    pub number: u32,
    pub first: Slot,
    pub second: Slot,
    pub first_hits: u32,
    pub second_hits: u32,
    pub winner: Option<String>,
    /// The stored match exactly as read, so callers can map back to its row.
    pub record: Option<Match>,
}

impl BracketMatch {
    fn new(tournament_id: TournamentId, round: u32, number: u32, first: Slot, second: Slot) -> Self {
        let mut bracket_match = Self {
            id: None,
            tournament_id,
            round,
            number,
            first,
            second,
            first_hits: 0,
            second_hits: 0,
            winner: None,
            record: None,
        };
        if let Some(record) = bracket_match.shared_record() {
            if record.has_unknown_winner() {
                log::warn!(
                    "match {} vs {} (round {}) names unknown winner {:?}; treating as undecided",
                    record.player1,
                    record.player2,
                    record.round,
                    record.winner
                );
            }
            let first_name = bracket_match.first.player().map(Player::name).unwrap_or_default();
            let (first_hits, second_hits) = record.hits_for(first_name).unwrap_or_default();
            let id = record.id;
            let winner = record.decided_winner().map(str::to_string);
            bracket_match.id = id;
            bracket_match.first_hits = first_hits;
            bracket_match.second_hits = second_hits;
            bracket_match.winner = winner;
            bracket_match.record = Some(record);
        }
        bracket_match
    }

    /// The stored match between the two occupants for this round, if both are players.
    fn shared_record(&self) -> Option<Match> {
        let (Slot::Occupied(a), Slot::Occupied(b)) = (&self.first, &self.second) else {
            return None;
        };
        a.match_against(b.name(), self.round)
            .or_else(|| b.match_against(a.name(), self.round))
            .cloned()
    }

    /// Whoever takes this pairing's seat in the next round.
    pub fn advancer(&self) -> Slot {
        match (&self.first, &self.second) {
            (Slot::Occupied(p), Slot::Bye) | (Slot::Bye, Slot::Occupied(p)) => Slot::Occupied(p.clone()),
            (Slot::Bye, Slot::Bye) => Slot::Bye,
            (Slot::Occupied(a), Slot::Occupied(b)) => match self.winner.as_deref() {
                Some(w) if w == a.name() => Slot::Occupied(a.clone()),
                Some(w) if w == b.name() => Slot::Occupied(b.clone()),
                _ => Slot::Pending,
            },
            _ => Slot::Pending,
        }
    }

    /// The next-round seat is known (a player or a bye).
    pub fn is_resolved(&self) -> bool {
        !self.advancer().is_pending()
    }
}

/// One bracket round and its pairings, in bracket order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    /// 1-based round ordinal.
    pub id: u32,
    pub matches: Vec<BracketMatch>,
}

impl Round {
    pub fn is_complete(&self) -> bool {
        self.matches.iter().all(BracketMatch::is_resolved)
    }
}

/// Bracket build configuration.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketOptions {
    #[serde(default)]
    pub tournament_id: TournamentId,
    /// Pad the slot list with byes up to this size before pairing.
    #[serde(default)]
    pub capacity: Option<u32>,
}

impl BracketOptions {
    pub fn new(tournament_id: TournamentId) -> Self {
        Self {
            tournament_id,
            capacity: None,
        }
    }

    /// Fixed-size bracket. `capacity` must be a power of two, at least 2.
    pub fn with_capacity(tournament_id: TournamentId, capacity: u32) -> Result<Self, TournamentError> {
        if capacity < 2 || !capacity.is_power_of_two() {
            return Err(TournamentError::InvalidCapacity { capacity });
        }
        Ok(Self {
            tournament_id,
            capacity: Some(capacity),
        })
    }
}

/// ⌈log2(slots)⌉; zero when there is nothing to pair.
pub fn round_count(slots: usize) -> u32 {
    if slots < 2 {
        return 0;
    }
    slots.next_power_of_two().trailing_zeros()
}

/// The first-round slot list.
///
/// When every player carries a seed assignment, players are grouped by their
/// `bracket_match` (two per match, lowest seed first) and the groups that exist are
/// flattened in match-number order, with empty seats left as `None`. Otherwise the
/// input order is kept.
pub fn initial_slots(players: &[Option<Player>]) -> Vec<Option<Player>> {
    let present: Vec<&Player> = players.iter().flatten().collect();
    if present.is_empty() || !present.iter().all(|p| p.is_seeded()) {
        return players.to_vec();
    }

    let mut seeded = present;
    seeded.sort_by_key(|p| p.player.bracket_seed);
    let mut groups: BTreeMap<u32, Vec<Player>> = BTreeMap::new();
    for p in seeded {
        let slot = p.player.bracket_match.unwrap_or_default();
        let group = groups.entry(slot).or_default();
        if group.len() == 2 {
            log::warn!(
                "bracket match {} already has two players; dropping {}",
                slot,
                p.name()
            );
            continue;
        }
        group.push(p.clone());
    }
    log::debug!("grouped seeded players into {} first-round matches", groups.len());

    groups
        .into_values()
        .flat_map(|group| {
            let mut group = group.into_iter();
            [group.next(), group.next()]
        })
        .collect()
}

/// Build every round of the bracket.
///
/// Returns an empty list when fewer than two slots exist after seeding and padding,
/// which callers show as "not enough players".
pub fn build_bracket(options: &BracketOptions, players: &[Option<Player>]) -> Vec<Round> {
    let mut slots: Vec<Slot> = initial_slots(players).into_iter().map(Slot::from).collect();
    if let Some(capacity) = options.capacity {
        let capacity = capacity as usize;
        if slots.len() < capacity {
            slots.resize(capacity, Slot::Bye);
        } else if slots.len() > capacity {
            log::warn!(
                "{} slots exceed bracket capacity {}; ignoring capacity",
                slots.len(),
                capacity
            );
        }
    }
    if slots.len() < 2 {
        log::debug!("not enough slots for a bracket ({})", slots.len());
        return Vec::new();
    }

    let total = round_count(slots.len());
    log::debug!(
        "building bracket for tournament {}: {} slots, {} rounds",
        options.tournament_id,
        slots.len(),
        total
    );

    let mut rounds = Vec::with_capacity(total as usize);
    for round in 1..=total {
        let matches: Vec<BracketMatch> = slots
            .chunks(2)
            .zip(1..)
            .map(|(pair, number)| {
                let first = pair[0].clone();
                let second = pair.get(1).cloned().unwrap_or(Slot::Bye);
                BracketMatch::new(options.tournament_id, round, number, first, second)
            })
            .collect();
        slots = matches.iter().map(BracketMatch::advancer).collect();
        rounds.push(Round { id: round, matches });
    }
    rounds
}

/// The bracket winner, once the final is decided.
pub fn champion(rounds: &[Round]) -> Option<Player> {
    let last = rounds.last()?;
    match last.matches.as_slice() {
        [final_match] => match final_match.advancer() {
            Slot::Occupied(p) => Some(p),
            Slot::Pending | Slot::Bye => None,
        },
        _ => None,
    }
}
