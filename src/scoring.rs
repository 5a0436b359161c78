/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Pure scoring functions over an [`AffinityMatrix`].
//!
//! A group's score sums, over every unordered pair inside it, both directed
//! affinities. A partition's score is the sum of its group scores. Member
//! order never matters, which is what lets the search memoise on group
//! content alone.
//!
//! [`remaining_potential`] is the admissible upper bound the search prunes
//! with: it can over-estimate what unplaced entities may still add, never
//! under-estimate it.
//!
//! # Invariants
//! - **Total**: no function here fails; missing affinities are `0.0`
//! - **Order-free**: `group_score` depends on membership only
//! - **Admissible**: `remaining_potential ≥` best achievable gain

use crate::matrix::AffinityMatrix;

/// `affinity(a → b) + affinity(b → a)`.
#[inline]
pub fn pair_score(matrix: &AffinityMatrix, a: &str, b: &str) -> f64 {
    matrix.affinity(a, b) + matrix.affinity(b, a)
}

/// Sum of [`pair_score`] over every unordered pair in `group`.
///
/// Empty and singleton groups score `0.0`.
pub fn group_score<S: AsRef<str>>(matrix: &AffinityMatrix, group: &[S]) -> f64 {
    let mut score = 0.0;
    for (i, a) in group.iter().enumerate() {
        for b in &group[i + 1..] {
            score += pair_score(matrix, a.as_ref(), b.as_ref());
        }
    }
    score
}

/// Sum of [`group_score`] over every group.
pub fn partition_score<S: AsRef<str>>(matrix: &AffinityMatrix, partition: &[Vec<S>]) -> f64 {
    partition
        .iter()
        .map(|group| group_score(matrix, group))
        .sum()
}

/// Score gained by inserting `entity` into `group`.
///
/// `group_score(group ∪ {entity}) = group_score(group) + incremental_score(entity, group)`.
pub fn incremental_score<S: AsRef<str>>(matrix: &AffinityMatrix, entity: &str, group: &[S]) -> f64 {
    group
        .iter()
        .map(|member| pair_score(matrix, entity, member.as_ref()))
        .sum()
}

/// Optimistic bound on the score still obtainable from `remaining`.
///
/// Two non-negative parts:
/// 1. every positive [`pair_score`] among remaining entities, as if each pair
///    could share a group;
/// 2. for each remaining entity, its best positive [`incremental_score`] into
///    any existing group of `partition`.
///
/// Grouping choices are treated as independent, so the bound is loose but
/// never below the true achievable gain.
pub fn remaining_potential<S, T>(matrix: &AffinityMatrix, remaining: &[S], partition: &[Vec<T>]) -> f64
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    let mut potential = 0.0;

    for (i, a) in remaining.iter().enumerate() {
        for b in &remaining[i + 1..] {
            let pair = pair_score(matrix, a.as_ref(), b.as_ref());
            if pair > 0.0 {
                potential += pair;
            }
        }
    }

    for entity in remaining {
        let best_join = partition
            .iter()
            .map(|group| incremental_score(matrix, entity.as_ref(), group))
            .fold(0.0_f64, f64::max);
        potential += best_join;
    }

    potential
}

/// Score divided by the number of unordered pairs among `entity_count` entities.
///
/// Returns `0.0` when fewer than two entities exist.
pub fn normalize_score(score: f64, entity_count: usize) -> f64 {
    if entity_count < 2 {
        return 0.0;
    }
    let pairs = (entity_count * (entity_count - 1) / 2) as f64;
    score / pairs
}

// ─── Tests ────────────────────────────────────────────────────────────────
