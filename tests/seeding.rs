//! Integration tests for bracket seeding from a finished ranking.

use fencing_tournament::{
    assign_seeds, bracket_positions, build_bracket, ranking_from_standings, read_ranked_list,
    BracketOptions, Match, Player, PlayerDetails, StandingsOptions, Tournament, TournamentError,
    TournamentFormat,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn roster(names: &[&str]) -> Vec<Player> {
    names.iter().map(|n| Player::new(*n)).collect()
}

fn ranking(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn seat(p: &Player) -> (u32, u32) {
    (
        p.player.bracket_seed.unwrap_or_default(),
        p.player.bracket_match.unwrap_or_default(),
    )
}

#[test]
fn positions_keep_top_seeds_apart() {
    assert_eq!(bracket_positions(2), vec![1, 2]);
    assert_eq!(bracket_positions(4), vec![1, 4, 2, 3]);
    assert_eq!(bracket_positions(8), vec![1, 8, 4, 5, 2, 7, 3, 6]);
    assert_eq!(bracket_positions(5), bracket_positions(8));
    assert!(bracket_positions(0).is_empty());
}

#[test]
fn seeds_follow_the_ranking_and_land_in_match_slots() {
    init_logging();
    let players = roster(&["E", "D", "C", "B", "A"]);
    let seeded = assign_seeds(&players, &ranking(&["A", "B", "C", "D", "E"]));

    let seats: Vec<(&str, (u32, u32))> = seeded.iter().map(|p| (p.name(), seat(p))).collect();
    assert_eq!(
        seats,
        vec![
            ("A", (1, 1)),
            ("B", (2, 3)),
            ("C", (3, 4)),
            ("D", (4, 2)),
            ("E", (5, 2)),
        ]
    );
}

#[test]
fn seeded_bracket_gives_top_seeds_the_byes() {
    init_logging();
    let players = roster(&["E", "D", "C", "B", "A"]);
    let seeded = assign_seeds(&players, &ranking(&["A", "B", "C", "D", "E"]));
    let slots: Vec<Option<Player>> = seeded.into_iter().rev().map(Some).collect();

    let rounds = build_bracket(&BracketOptions::new(3), &slots);
    assert_eq!(rounds.len(), 3);
    let pairs: Vec<(Option<&str>, Option<&str>)> = rounds[0]
        .matches
        .iter()
        .map(|m| (m.first.player().map(Player::name), m.second.player().map(Player::name)))
        .collect();
    assert_eq!(
        pairs,
        vec![
            (Some("A"), None),
            (Some("D"), Some("E")),
            (Some("B"), None),
            (Some("C"), None),
        ]
    );
    assert!(rounds[0].matches[0].second.is_bye());
    assert_eq!(
        rounds[1].matches[1].first.player().map(Player::name),
        Some("B")
    );
    assert_eq!(
        rounds[1].matches[1].second.player().map(Player::name),
        Some("C")
    );
}

#[test]
fn unranked_players_follow_and_unknown_names_are_skipped() {
    init_logging();
    let players = roster(&["X", "A", "Y"]);
    let seeded = assign_seeds(&players, &ranking(&["Ghost", "A", "A"]));
    let order: Vec<(&str, u32)> = seeded
        .iter()
        .map(|p| (p.name(), seat(p).0))
        .collect();
    assert_eq!(order, vec![("A", 1), ("X", 2), ("Y", 3)]);
    assert!(players.iter().all(|p| p.player.bracket_seed.is_none()));
}

#[test]
fn ranked_list_sorts_by_rank_column() {
    let csv = "player_name,rank\nCleo,3\n Ana ,1\nBea,2\n";
    assert_eq!(
        read_ranked_list(csv.as_bytes()).unwrap(),
        vec!["Ana", "Bea", "Cleo"]
    );
}

#[test]
fn ranked_list_without_ranks_keeps_file_order() {
    let csv = "player_name\nCleo\nAna\n";
    assert_eq!(read_ranked_list(csv.as_bytes()).unwrap(), vec!["Cleo", "Ana"]);

    let partial = "player_name,rank\nCleo,\nAna,1\n";
    assert_eq!(
        read_ranked_list(partial.as_bytes()).unwrap(),
        vec!["Ana", "Cleo"]
    );
}

#[test]
fn ranked_list_rejects_duplicates_and_bad_rows() {
    let dup = "player_name\nAna\nAna\n";
    assert_eq!(
        read_ranked_list(dup.as_bytes()),
        Err(TournamentError::DuplicateRankedName("Ana".to_string()))
    );

    let bad = "name\nAna\n";
    assert!(matches!(
        read_ranked_list(bad.as_bytes()),
        Err(TournamentError::RankedListRead(_))
    ));
}

#[test]
fn pool_standings_seed_the_elimination_bracket() {
    init_logging();
    let details = ["A", "B", "C", "D"].iter().map(|n| PlayerDetails::new(*n)).collect();
    let matches = vec![
        Match::new("A", "B", 1).with_hits(5, 1).with_winner("A"),
        Match::new("A", "C", 1).with_hits(5, 2).with_winner("A"),
        Match::new("A", "D", 1).with_hits(5, 3).with_winner("A"),
        Match::new("B", "C", 1).with_hits(5, 4).with_winner("B"),
        Match::new("B", "D", 1).with_hits(5, 0).with_winner("B"),
        Match::new("C", "D", 1).with_hits(5, 4).with_winner("C"),
    ];
    let pools = Tournament::from_records(1, TournamentFormat::Pools, details, matches).unwrap();
    let order = ranking_from_standings(&pools.standings(&StandingsOptions::default()));
    assert_eq!(order, vec!["A", "B", "C", "D"]);

    // The elimination tournament registers the same fencers without their pool history.
    let mut elimination = Tournament::new(2, TournamentFormat::Elimination);
    for name in ["D", "C", "B", "A"] {
        elimination.add_player(PlayerDetails::new(name)).unwrap();
    }
    elimination.players = assign_seeds(&elimination.players, &order);

    let rounds = elimination.bracket();
    let opener = &rounds[0].matches;
    assert_eq!(opener[0].first.player().map(Player::name), Some("A"));
    assert_eq!(opener[0].second.player().map(Player::name), Some("D"));
    assert_eq!(opener[1].first.player().map(Player::name), Some("B"));
    assert_eq!(opener[1].second.player().map(Player::name), Some("C"));
}
