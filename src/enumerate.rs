/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Exhaustive enumeration of every partition into at most `k` non-empty groups.
//!
//! This is the ground-truth oracle the optimizer is checked against, not a
//! solver: no pruning, no memoisation. Each call visits every partition
//! exactly once by case-splitting on the next unplaced entity (join each
//! existing group in turn, or open a new group while under the bound) and
//! backtracking after every attempt.
//!
//! The number of partitions grows like the Bell numbers; use
//! [`partition_count`] to size a run before starting it.

use crate::error::PartitionError;
use crate::partition::Partition;
use crate::preconditions::validate_partition_inputs;

/// Call `visitor` once for every partition of `entities` into ≤ `max_groups` groups.
///
/// Returns the number of partitions visited. An empty entity sequence visits
/// nothing. Partitions are handed out in construction order, not canonical order.
///
/// # Errors
///
/// [`PartitionError::InvalidMaxGroups`] or [`PartitionError::DuplicateEntities`].
pub fn visit_partitions<S, F>(
    entities: &[S],
    max_groups: usize,
    mut visitor: F,
) -> Result<u64, PartitionError>
where
    S: AsRef<str>,
    F: FnMut(&[Vec<&str>]),
{
    validate_partition_inputs(entities, max_groups)?;
    if entities.is_empty() {
        return Ok(0);
    }

    let names: Vec<&str> = entities.iter().map(AsRef::as_ref).collect();
    let mut current: Vec<Vec<&str>> = Vec::with_capacity(max_groups.min(names.len()));
    let mut visited = 0u64;
    build(&names, &mut current, max_groups, &mut visitor, &mut visited);
    Ok(visited)
}

/// Collect every partition of `entities` into ≤ `max_groups` groups.
///
/// Intended for small inputs only.
pub fn enumerate<S: AsRef<str>>(
    entities: &[S],
    max_groups: usize,
) -> Result<Vec<Partition>, PartitionError> {
    let expected = partition_count(entities.len(), max_groups);
    let capacity = usize::try_from(expected).unwrap_or(usize::MAX).min(1 << 16);
    let mut partitions: Vec<Partition> = Vec::with_capacity(capacity);
    visit_partitions(entities, max_groups, |partition| {
        partitions.push(
            partition
                .iter()
                .map(|group| group.iter().map(|m| m.to_string()).collect::<Vec<String>>())
                .collect(),
        );
    })?;
    Ok(partitions)
}

/// Number of partitions of `entity_count` entities into ≤ `max_groups` non-empty groups.
///
/// Σ S(n, j) for j in 1..=min(n, k), with S the Stirling numbers of the second
/// kind. Zero entities give 0, matching [`enumerate`]. Saturates at `u128::MAX`.
pub fn partition_count(entity_count: usize, max_groups: usize) -> u128 {
    if entity_count == 0 || max_groups == 0 {
        return 0;
    }
    let k = max_groups.min(entity_count);

    // row[j] = S(i, j) for the current i
    let mut row = vec![0u128; k + 1];
    row[0] = 1;
    for _ in 0..entity_count {
        for j in (1..=k).rev() {
            row[j] = (j as u128).saturating_mul(row[j]).saturating_add(row[j - 1]);
        }
        row[0] = 0;
    }
    row[1..].iter().fold(0u128, |acc, &s| acc.saturating_add(s))
}

fn build<'a, F: FnMut(&[Vec<&'a str>])>(
    remaining: &[&'a str],
    current: &mut Vec<Vec<&'a str>>,
    max_groups: usize,
    visitor: &mut F,
    visited: &mut u64,
) {
    let Some((&next, rest)) = remaining.split_first() else {
        if !current.is_empty() {
            visitor(current.as_slice());
            *visited += 1;
        }
        return;
    };

    for idx in 0..current.len() {
        current[idx].push(next);
        build(rest, current, max_groups, visitor, visited);
        current[idx].pop();
    }

    if current.len() < max_groups {
        current.push(vec![next]);
        build(rest, current, max_groups, visitor, visited);
        current.pop();
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
