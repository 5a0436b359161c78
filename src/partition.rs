//! Groups and partitions of named entities.
//!
//! A [`Partition`] is an ordered list of non-empty [`Group`]s in which every
//! input entity appears exactly once. Finished partitions are handed out in
//! canonical form: members sorted inside each group, groups sorted by their
//! first member.

/// Maximum group count used when the caller does not choose one.
pub const DEFAULT_MAX_GROUPS: usize = 3;

/// A non-empty set of entity names.
pub type Group = Vec<String>;

/// An assignment of every entity to exactly one group.
pub type Partition = Vec<Group>;

/// Put a partition into canonical order, copying names into owned groups.
///
/// Members are sorted within each group, then groups are ordered by their
/// first (smallest) member using byte-wise `str` ordering.
pub fn canonicalize<S: AsRef<str>>(partition: &[Vec<S>]) -> Partition {
    let mut groups: Partition = partition
        .iter()
        .map(|group| {
            let mut members: Group = group.iter().map(|m| m.as_ref().to_string()).collect();
            members.sort_unstable();
            members
        })
        .collect();
    groups.sort_by(|a, b| a.first().cmp(&b.first()));
    groups
}

/// Whether `partition` places every entity exactly once, has no empty group,
/// and uses at most `max_groups` groups.
pub fn is_valid_partition<S, T>(partition: &[Vec<S>], entities: &[T], max_groups: usize) -> bool
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    if partition.len() > max_groups || partition.iter().any(Vec::is_empty) {
        return false;
    }
    let mut placed: Vec<&str> = partition
        .iter()
        .flat_map(|group| group.iter().map(AsRef::as_ref))
        .collect();
    let mut expected: Vec<&str> = entities.iter().map(AsRef::as_ref).collect();
    placed.sort_unstable();
    expected.sort_unstable();
    placed == expected
}
