//! Integration tests for gold/silver/bronze ranking of finished partitions.

use affinity_partition::ranking::{color_for_position, RANKED_GROUPS};
use affinity_partition::{
    color_rank, optimize, AffinityMatrix, ColorRank, DebugOptions, Partition,
};

// ─── helpers ─────────────────────────────────────────────────────────────────

fn owned(groups: &[&[&str]]) -> Partition {
    groups
        .iter()
        .map(|g| g.iter().map(|s| s.to_string()).collect())
        .collect()
}

/// Four pairs worth 8, 8, 2 and 5.
fn four_pairs() -> AffinityMatrix {
    let mut m = AffinityMatrix::new();
    m.set_pair("A", "B", 4.0, 4.0);
    m.set_pair("C", "D", 6.0, 2.0);
    m.set_pair("E", "F", 1.0, 1.0);
    m.set_pair("G", "H", 5.0, 0.0);
    m
}

// ─── ordering ────────────────────────────────────────────────────────────────

#[test]
fn test_ties_keep_input_order() {
    let p = owned(&[&["A", "B"], &["C", "D"], &["E", "F"], &["G", "H"]]);
    let ranked = color_rank(&p, &four_pairs());
    let order: Vec<usize> = ranked.iter().map(|r| r.group_index).collect();
    // A–B and C–D tie at 8; A–B came first
    assert_eq!(order, vec![0, 1, 3, 2]);
    assert_eq!(ranked[0].group_score, 8.0);
    assert_eq!(ranked[1].group_score, 8.0);
}

#[test]
fn test_tie_order_follows_input_not_names() {
    let p = owned(&[&["C", "D"], &["A", "B"]]);
    let ranked = color_rank(&p, &four_pairs());
    assert_eq!(ranked[0].members, vec!["C", "D"]);
    assert_eq!(ranked[0].rank, Some(ColorRank::Gold));
    assert_eq!(ranked[1].members, vec!["A", "B"]);
    assert_eq!(ranked[1].rank, Some(ColorRank::Silver));
}

#[test]
fn test_only_three_groups_are_ranked() {
    let p = owned(&[&["A", "B"], &["C", "D"], &["E", "F"], &["G", "H"]]);
    let ranked = color_rank(&p, &four_pairs());
    assert_eq!(ranked.len(), 4);
    assert_eq!(ranked.iter().filter(|r| r.is_ranked()).count(), RANKED_GROUPS);

    let last = &ranked[3];
    assert_eq!(last.members, vec!["E", "F"]);
    assert_eq!(last.rank, None);
    assert_eq!(last.hex_color, None);
}

#[test]
fn test_colours_match_ranks() {
    let p = owned(&[&["A", "B"], &["C", "D"], &["G", "H"]]);
    let ranked = color_rank(&p, &four_pairs());
    let colours: Vec<&str> = ranked
        .iter()
        .filter_map(|r| r.hex_color.as_deref())
        .collect();
    assert_eq!(colours, vec!["#2196f3", "#43a047", "#ff9800"]);
    for (position, r) in ranked.iter().enumerate() {
        assert_eq!(r.hex_color.as_deref(), Some(color_for_position(position)));
    }
}

#[test]
fn test_negative_groups_rank_below_singletons() {
    let mut m = AffinityMatrix::new();
    m.set_pair("A", "B", -3.0, -3.0);
    m.add_entity("C");
    let p = owned(&[&["A", "B"], &["C"]]);
    let ranked = color_rank(&p, &m);
    assert_eq!(ranked[0].members, vec!["C"]);
    assert_eq!(ranked[0].group_score, 0.0);
    assert_eq!(ranked[1].group_score, -6.0);
}

// ─── input handling ──────────────────────────────────────────────────────────

#[test]
fn test_input_partition_untouched() {
    let p = owned(&[&["E", "F"], &["B", "A"]]);
    let before = p.clone();
    let ranked = color_rank(&p, &four_pairs());
    assert_eq!(p, before);
    // members are reported as given, not re-sorted
    assert_eq!(ranked[0].members, vec!["B", "A"]);
}

#[test]
fn test_ranks_optimizer_output() {
    let m = four_pairs();
    let entities = ["A", "B", "C", "D", "E", "F", "G", "H"];
    let best = optimize(&entities, &m, 4, DebugOptions::default()).unwrap();
    let ranked = color_rank(&best, &m);
    let total: f64 = ranked.iter().map(|r| r.group_score).sum();
    assert_eq!(total, 23.0);
    assert!(ranked
        .windows(2)
        .all(|w| w[0].group_score >= w[1].group_score));
}
