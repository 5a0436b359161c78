//! Integration tests for the branch-and-bound optimizer and its cross-check.
//!
//! The five-entity scenario has a unique optimum `[[A, B, E], [C], [D]]`
//! worth 80: A, B and E like each other, C and D dislike everyone.

use affinity_partition::{
    enumerate, optimize, optimize_with_stats, partition_score, validate_optimality,
    AffinityMatrix, DebugOptions, Optimizer, OptimizerConfig, PartitionError,
};

// ─── helpers ─────────────────────────────────────────────────────────────────

const ENTITIES: [&str; 5] = ["A", "B", "C", "D", "E"];

/// Directed, sparse scenario matrix.
///
/// - A–B: 15 + 15, A–E: 10 + 15, B–E: 20 + 5  → group {A, B, E} = 80
/// - C: −5 both ways with A, B, E
/// - D: −6 one way towards A, B, E; D–C: −4 + −4
fn scenario() -> AffinityMatrix {
    let mut m = AffinityMatrix::new();
    m.set_pair("A", "B", 15.0, 15.0);
    m.set_pair("A", "E", 10.0, 15.0);
    m.set_pair("B", "E", 20.0, 5.0);
    for other in ["A", "B", "E"] {
        m.set_pair("C", other, -5.0, -5.0);
        m.set("D", other, -6.0);
    }
    m.set_pair("C", "D", -4.0, -4.0);
    m
}

fn names(groups: &[&[&str]]) -> Vec<Vec<String>> {
    groups
        .iter()
        .map(|g| g.iter().map(|s| s.to_string()).collect())
        .collect()
}

fn exhaustive_best(entities: &[&str], m: &AffinityMatrix, k: usize) -> f64 {
    enumerate(entities, k)
        .unwrap()
        .iter()
        .map(|p| partition_score(m, p))
        .fold(f64::NEG_INFINITY, f64::max)
}

// ─── concrete scenario ───────────────────────────────────────────────────────

#[test]
fn test_scenario_finds_unique_optimum() {
    let m = scenario();
    let best = optimize(&ENTITIES, &m, 3, DebugOptions::default()).unwrap();
    assert_eq!(best, names(&[&["A", "B", "E"], &["C"], &["D"]]));
    assert_eq!(partition_score(&m, &best), 80.0);
}

#[test]
fn test_scenario_is_verified_optimal() {
    let report = validate_optimality(&ENTITIES, &scenario(), &OptimizerConfig::default()).unwrap();
    assert!(report.is_optimal);
    assert_eq!(report.total_score, 80.0);
    assert_eq!(report.validation.algorithm_score, 80.0);
    assert_eq!(report.validation.exhaustive_best_score, 80.0);
    // S(5,1) + S(5,2) + S(5,3)
    assert_eq!(report.validation.total_partitions, 41);
    assert_eq!(report.color_rankings.len(), 3);
    assert_eq!(report.color_rankings[0].members, vec!["A", "B", "E"]);
}

#[test]
fn test_scenario_with_two_groups() {
    let m = scenario();
    let best = optimize(&ENTITIES, &m, 2, DebugOptions::default()).unwrap();
    assert_eq!(best, names(&[&["A", "B", "E"], &["C", "D"]]));
    assert_eq!(partition_score(&m, &best), 72.0);
    assert_eq!(exhaustive_best(&ENTITIES, &m, 2), 72.0);
}

#[test]
fn test_scenario_input_order_does_not_change_score() {
    let m = scenario();
    let reversed = ["E", "D", "C", "B", "A"];
    let a = optimize(&ENTITIES, &m, 3, DebugOptions::default()).unwrap();
    let b = optimize(&reversed, &m, 3, DebugOptions::default()).unwrap();
    // unique optimum, so canonical output is identical too
    assert_eq!(a, b);
}

#[test]
fn test_search_prunes_and_hits_cache() {
    let outcome = optimize_with_stats(&ENTITIES, &scenario(), &OptimizerConfig::default()).unwrap();
    assert!(outcome.stats.pruned_branches > 0, "{:?}", outcome.stats);
    assert!(outcome.stats.best_updates >= 1);
    assert_eq!(outcome.score, 80.0);
}

// ─── edge cases ──────────────────────────────────────────────────────────────

#[test]
fn test_empty_input_returns_empty_partition() {
    let none: [&str; 0] = [];
    for k in 1..=4 {
        assert!(optimize(&none, &scenario(), k, DebugOptions::default())
            .unwrap()
            .is_empty());
    }
}

#[test]
fn test_single_group_mode() {
    let best = optimize(&ENTITIES, &scenario(), 1, DebugOptions::default()).unwrap();
    assert_eq!(best, names(&[&["A", "B", "C", "D", "E"]]));
}

#[test]
fn test_single_entity() {
    let best = optimize(&["C"], &scenario(), 3, DebugOptions::default()).unwrap();
    assert_eq!(best, names(&[&["C"]]));
}

#[test]
fn test_determinism() {
    let m = scenario();
    let config = OptimizerConfig::new(3);
    let first = optimize_with_stats(&ENTITIES, &m, &config).unwrap();
    let second = optimize_with_stats(&ENTITIES, &m, &config).unwrap();
    assert_eq!(first, second);
    assert_eq!(format!("{:?}", first.partition), format!("{:?}", second.partition));
}

#[test]
fn test_optimizer_reusable_across_inputs() {
    let optimizer = Optimizer::with_max_groups(3);
    let m = scenario();
    let full = optimizer.run(&ENTITIES, &m).unwrap();
    let subset = optimizer.run(&["A", "B", "C"], &m).unwrap();
    assert_eq!(full.score, 80.0);
    assert_eq!(subset.partition, names(&[&["A", "B"], &["C"]]));
    assert_eq!(subset.score, 30.0);
}

#[test]
fn test_all_negative_affinities_split_everyone() {
    let mut m = AffinityMatrix::new();
    m.set_pair("A", "B", -1.0, -1.0);
    m.set_pair("A", "C", -1.0, -1.0);
    m.set_pair("B", "C", -1.0, -1.0);
    let best = optimize(&["A", "B", "C"], &m, 3, DebugOptions::default()).unwrap();
    assert_eq!(best, names(&[&["A"], &["B"], &["C"]]));

    // With only two groups somebody has to share
    let best = optimize(&["A", "B", "C"], &m, 2, DebugOptions::default()).unwrap();
    assert_eq!(best.len(), 2);
    assert_eq!(partition_score(&m, &best), -2.0);
}

#[test]
fn test_asymmetric_affinity_counts_both_directions() {
    // A loves B, B mildly dislikes A: the pair is still worth grouping
    let mut m = AffinityMatrix::new();
    m.set_pair("A", "B", 10.0, -3.0);
    m.set_pair("A", "C", -1.0, -1.0);
    let best = optimize(&["A", "B", "C"], &m, 3, DebugOptions::default()).unwrap();
    assert_eq!(partition_score(&m, &best), 7.0);
    assert!(best.contains(&vec!["A".to_string(), "B".to_string()]));
}

#[test]
fn test_loaded_table_pipeline() {
    let table = "\
x,Tokyo,Chiba,Saitama,Gunma
Tokyo,-,12,8,-
Chiba,10,-,1,-2
Saitama,7,2,-,3
Gunma,-,-4,6,-
";
    let m = AffinityMatrix::from_csv(table).unwrap();
    let entities = m.entities();
    let report = validate_optimality(&entities, &m, &OptimizerConfig::new(2)).unwrap();
    assert!(report.is_optimal);
    assert_eq!(report.total_score, exhaustive_best(&entities, &m, 2));
}

// ─── validation errors ───────────────────────────────────────────────────────

#[test]
fn test_zero_groups_rejected() {
    assert_eq!(
        optimize(&ENTITIES, &scenario(), 0, DebugOptions::default()),
        Err(PartitionError::InvalidMaxGroups(0))
    );
}

#[test]
fn test_duplicate_entities_rejected() {
    let err = optimize(&["A", "B", "A"], &scenario(), 3, DebugOptions::default()).unwrap_err();
    assert_eq!(err, PartitionError::DuplicateEntities(vec!["A".to_string()]));
    assert!(err.to_string().contains('A'));
}

#[test]
fn test_missing_matrix_row_rejected() {
    let err = optimize(&["A", "Osaka"], &scenario(), 3, DebugOptions::default()).unwrap_err();
    assert_eq!(
        err,
        PartitionError::MissingAffinityRows(vec!["Osaka".to_string()])
    );
}

#[test]
fn test_non_finite_affinity_rejected() {
    let mut m = AffinityMatrix::new();
    m.set_pair("A", "B", f64::NEG_INFINITY, 0.0);
    let err = optimize(&["A", "B"], &m, 1, DebugOptions::default()).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(
        err,
        PartitionError::NonFiniteAffinity {
            from: "A".to_string(),
            to: "B".to_string(),
        }
    );

    let mut m = scenario();
    m.set("E", "C", f64::NAN);
    assert!(matches!(
        validate_optimality(&ENTITIES, &m, &OptimizerConfig::default()),
        Err(PartitionError::NonFiniteAffinity { .. })
    ));
}

#[test]
fn test_debug_logging_does_not_change_result() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
    let m = scenario();
    let quiet = optimize(&ENTITIES, &m, 3, DebugOptions::default()).unwrap();
    let loud = optimize(&ENTITIES, &m, 3, DebugOptions::all()).unwrap();
    assert_eq!(quiet, loud);
}
