//! Bracket seeding: turn a finished ranking into seed and first-round match assignments.

use crate::logic::standings::StandingsRow;
use crate::models::{Player, TournamentError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;

/// One row of an externally supplied ranked list.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub player_name: String,
    /// 1-based final position; rows without one keep their file order after ranked rows.
    #[serde(default)]
    pub rank: Option<u32>,
}

/// Read a CSV ranked list with a `player_name` column and an optional `rank` column.
pub fn read_ranked_list<R: Read>(reader: R) -> Result<Vec<String>, TournamentError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut entries = Vec::new();
    for row in rdr.deserialize() {
        let entry: RankedEntry = row?;
        entries.push(entry);
    }
    entries.sort_by_key(|e| e.rank.unwrap_or(u32::MAX));

    let mut seen = HashSet::new();
    let mut names = Vec::with_capacity(entries.len());
    for entry in entries {
        if !seen.insert(entry.player_name.clone()) {
            return Err(TournamentError::DuplicateRankedName(entry.player_name));
        }
        names.push(entry.player_name);
    }
    Ok(names)
}

/// Names in table order.
pub fn ranking_from_standings(rows: &[StandingsRow<'_>]) -> Vec<String> {
    rows.iter().map(|r| r.name().to_string()).collect()
}

/// Seed numbers in bracket order for a bracket of `size` seats (rounded up to a power of two).
///
/// Each seed meets `size + 1 - seed` in round one, and the top two seeds can only meet
/// in the final: for 8 seats `[1, 8, 4, 5, 2, 7, 3, 6]`.
pub fn bracket_positions(size: usize) -> Vec<u32> {
    if size == 0 {
        return Vec::new();
    }
    let size = size.next_power_of_two();
    let mut positions = vec![1u32];
    while positions.len() < size {
        let sum = positions.len() as u32 * 2 + 1;
        positions = positions.iter().flat_map(|&s| [s, sum - s]).collect();
    }
    positions
}

/// Seed `players` by `ranking` and place each seed into its first-round match.
///
/// Ranked players come first, in ranking order; players missing from the ranking
/// follow in input order. Returns fresh player values sorted by seed.
pub fn assign_seeds(players: &[Player], ranking: &[String]) -> Vec<Player> {
    let mut ordered: Vec<&Player> = Vec::with_capacity(players.len());
    let mut taken = HashSet::new();
    for name in ranking {
        match players.iter().find(|p| p.name() == name) {
            Some(p) if taken.insert(p.name()) => ordered.push(p),
            Some(_) => log::warn!("{} is ranked twice; keeping the higher rank", name),
            None => log::warn!("ranked player {} is not registered; skipping", name),
        }
    }
    for p in players {
        if taken.insert(p.name()) {
            log::info!("{} has no ranking; seeding after ranked players", p.name());
            ordered.push(p);
        }
    }

    let positions = bracket_positions(ordered.len().max(2));
    log::debug!(
        "seeding {} players into a bracket of {}",
        ordered.len(),
        positions.len()
    );
    ordered
        .into_iter()
        .zip(1u32..)
        .map(|(p, seed)| {
            let position = positions.iter().position(|&s| s == seed).unwrap_or(0);
            let mut seeded = p.clone();
            seeded.player.bracket_seed = Some(seed);
            seeded.player.bracket_match = Some(position as u32 / 2 + 1);
            seeded
        })
        .collect()
}
