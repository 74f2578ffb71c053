//! Standings: ranks players by a selected column with a fixed tie-break chain.
//!
//! Comparators here are written "best first": `Ordering::Less` means the left player
//! precedes the right one in the default descending table. Ascending order reverses them.

use crate::logic::scoring::{Record, ALL_ROUNDS};
use crate::models::Player;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Players with fewer matches than this (in the filtered scope) are under-qualified
/// for the `percentage` and `wins` columns.
pub const MIN_QUALIFYING_MATCHES: u32 = 2;

/// Column the table is sorted by.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    /// Win rate, then hit index.
    #[default]
    Percentage,
    /// Absolute win count, then hit index.
    Wins,
    Name,
    /// Hit index alone; non-negative beats negative, negatives closer to zero rank higher.
    Index,
    /// Hits scored over all rounds.
    Given,
    /// Hits conceded over all rounds.
    Taken,
}

impl SortColumn {
    /// Direction used when the caller does not pick one.
    pub fn natural_direction(self) -> SortDirection {
        match self {
            SortColumn::Name => SortDirection::Ascending,
            _ => SortDirection::Descending,
        }
    }

    fn has_tie_break_chain(self) -> bool {
        matches!(self, SortColumn::Percentage | SortColumn::Wins)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[serde(alias = "asc")]
    Ascending,
    /// Best first.
    #[default]
    #[serde(alias = "desc")]
    Descending,
}

/// How players below `MIN_QUALIFYING_MATCHES` are ordered for `percentage`/`wins`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnderqualifiedPolicy {
    /// After every qualified player in either direction, ordered by name among themselves.
    #[default]
    RankLast,
    /// The historical comparator: "less than" whenever either side is under-qualified.
    /// It is not antisymmetric, so the result depends on the sorting algorithm; a stable
    /// insertion sort is used to keep it deterministic.
    Legacy,
}

/// Standings configuration.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingsOptions {
    #[serde(default)]
    pub column: SortColumn,
    /// `None` uses the column's natural direction.
    #[serde(default)]
    pub direction: Option<SortDirection>,
    /// Round to count, `0` for all rounds.
    #[serde(default)]
    pub round: u32,
    #[serde(default)]
    pub underqualified: UnderqualifiedPolicy,
}

impl StandingsOptions {
    pub fn by(column: SortColumn) -> Self {
        Self {
            column,
            ..Self::default()
        }
    }

    pub fn direction(mut self, direction: SortDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn for_round(mut self, round: u32) -> Self {
        self.round = round;
        self
    }

    pub fn underqualified(mut self, policy: UnderqualifiedPolicy) -> Self {
        self.underqualified = policy;
        self
    }

    pub fn effective_direction(&self) -> SortDirection {
        self.direction
            .unwrap_or_else(|| self.column.natural_direction())
    }
}

/// One line of the standings table. Statistics are derived, never stored.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StandingsRow<'a> {
    pub player: &'a Player,
    /// Statistics within the requested round (or all rounds).
    pub record: Record,
    /// Statistics over every round.
    pub overall: Record,
    pub win_percentage: f64,
    pub hit_index: i64,
}

impl<'a> StandingsRow<'a> {
    pub fn new(player: &'a Player, round: u32) -> Self {
        let record = Record::for_player(player, round);
        Self {
            player,
            record,
            overall: Record::for_player(player, ALL_ROUNDS),
            win_percentage: record.win_percentage(),
            hit_index: record.hit_index(),
        }
    }

    pub fn name(&self) -> &'a str {
        self.player.name()
    }

    pub fn is_qualified(&self) -> bool {
        self.record.matches >= MIN_QUALIFYING_MATCHES
    }
}

/// Rank `players` by `options`. Always a permutation of the input; pool ids are ignored.
pub fn standings<'a>(players: &'a [Player], options: &StandingsOptions) -> Vec<StandingsRow<'a>> {
    let mut rows: Vec<StandingsRow<'a>> = players
        .iter()
        .map(|p| StandingsRow::new(p, options.round))
        .collect();
    let column = options.column;
    let direction = options.effective_direction();

    if !column.has_tie_break_chain() {
        rows.sort_by(|a, b| directed(compare_rows(column, a, b), direction));
        return rows;
    }

    match options.underqualified {
        UnderqualifiedPolicy::RankLast => {
            let (mut qualified, mut under): (Vec<_>, Vec<_>) =
                rows.into_iter().partition(|r| r.is_qualified());
            qualified.sort_by(|a, b| directed(compare_rows(column, a, b), direction));
            under.sort_by(|a, b| a.name().cmp(b.name()));
            qualified.extend(under);
            qualified
        }
        UnderqualifiedPolicy::Legacy => {
            insertion_sort_by(&mut rows, |a, b| {
                let raw = if !a.is_qualified() || !b.is_qualified() {
                    Ordering::Less
                } else {
                    compare_rows(column, a, b)
                };
                directed(raw, direction)
            });
            rows
        }
    }
}

fn directed(best_first: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Descending => best_first,
        SortDirection::Ascending => best_first.reverse(),
    }
}

/// Best-first comparison on one column, including the tie-break chain where it has one.
fn compare_rows(column: SortColumn, a: &StandingsRow<'_>, b: &StandingsRow<'_>) -> Ordering {
    match column {
        SortColumn::Percentage => b
            .win_percentage
            .total_cmp(&a.win_percentage)
            .then_with(|| b.hit_index.cmp(&a.hit_index)),
        SortColumn::Wins => b
            .record
            .wins
            .cmp(&a.record.wins)
            .then_with(|| b.hit_index.cmp(&a.hit_index)),
        SortColumn::Name => b.name().cmp(a.name()),
        SortColumn::Index => compare_index(a.overall.hit_index(), b.overall.hit_index()),
        SortColumn::Given => b.overall.given.cmp(&a.overall.given),
        SortColumn::Taken => b.overall.taken.cmp(&a.overall.taken),
    }
}

/// Non-negative beats negative; among negatives the one closer to zero is better.
fn compare_index(a: i64, b: i64) -> Ordering {
    match (a < 0, b < 0) {
        (false, false) => b.cmp(&a),
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (true, true) => a.unsigned_abs().cmp(&b.unsigned_abs()),
    }
}

/// Stable, and safe with comparators that are not a total order.
fn insertion_sort_by<T, F>(items: &mut [T], mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && cmp(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_ordering_prefers_non_negative_then_closest_to_zero() {
        assert_eq!(compare_index(0, -1), Ordering::Less);
        assert_eq!(compare_index(-1, -10), Ordering::Less);
        assert_eq!(compare_index(-10, -1), Ordering::Greater);
        assert_eq!(compare_index(5, 2), Ordering::Less);
        assert_eq!(compare_index(3, 3), Ordering::Equal);
    }

    #[test]
    fn insertion_sort_is_stable() {
        let mut v = vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')];
        insertion_sort_by(&mut v, |a, b| a.0.cmp(&b.0));
        assert_eq!(v, vec![(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c')]);
    }

    #[test]
    fn name_column_defaults_to_ascending() {
        assert_eq!(
            StandingsOptions::by(SortColumn::Name).effective_direction(),
            SortDirection::Ascending
        );
        assert_eq!(
            StandingsOptions::by(SortColumn::Wins).effective_direction(),
            SortDirection::Descending
        );
    }
}
