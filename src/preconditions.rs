//! Up-front validation pass run before any search or enumeration work.
//!
//! The search and the enumerator assume their input passed these checks and
//! do no defensive checking of their own. Checks run in a fixed order
//! (group bound, duplicates, matrix rows, finite scores). The first three
//! report every offending value of their class; the finite-score check
//! reports the first bad entry in input order.

use hashbrown::HashSet;

use crate::error::PartitionError;
use crate::matrix::AffinityMatrix;

/// Reject `max_groups < 1` and duplicate entity names.
///
/// An empty entity sequence is always accepted.
pub fn validate_partition_inputs<S: AsRef<str>>(
    entities: &[S],
    max_groups: usize,
) -> Result<(), PartitionError> {
    if entities.is_empty() {
        return Ok(());
    }
    if max_groups < 1 {
        return Err(PartitionError::InvalidMaxGroups(max_groups));
    }

    let mut seen: HashSet<&str> = HashSet::with_capacity(entities.len());
    let mut reported: HashSet<&str> = HashSet::new();
    let mut duplicates = Vec::new();
    for name in entities.iter().map(AsRef::as_ref) {
        if !seen.insert(name) && reported.insert(name) {
            duplicates.push(name.to_string());
        }
    }
    if !duplicates.is_empty() {
        return Err(PartitionError::DuplicateEntities(duplicates));
    }
    Ok(())
}

/// Reject entities that have no row in `matrix`, listed in input order.
pub fn validate_affinity_rows<S: AsRef<str>>(
    entities: &[S],
    matrix: &AffinityMatrix,
) -> Result<(), PartitionError> {
    let missing: Vec<String> = entities
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| !matrix.contains_entity(name))
        .map(str::to_string)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(PartitionError::MissingAffinityRows(missing))
    }
}

/// Reject `NaN` and infinite scores in the rows of `entities`.
pub fn validate_affinity_values<S: AsRef<str>>(
    entities: &[S],
    matrix: &AffinityMatrix,
) -> Result<(), PartitionError> {
    for from in entities.iter().map(AsRef::as_ref) {
        if let Some((to, _)) = matrix.non_finite_entry(from) {
            return Err(PartitionError::NonFiniteAffinity {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
    }
    Ok(())
}

/// Full pre-search check: [`validate_partition_inputs`],
/// [`validate_affinity_rows`], then [`validate_affinity_values`].
pub fn validate_search_inputs<S: AsRef<str>>(
    entities: &[S],
    matrix: &AffinityMatrix,
    max_groups: usize,
) -> Result<(), PartitionError> {
    validate_partition_inputs(entities, max_groups)?;
    validate_affinity_rows(entities, matrix)?;
    validate_affinity_values(entities, matrix)
}
