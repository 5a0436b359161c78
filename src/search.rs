/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Memoised branch-and-bound search for the best partition into ≤ K groups.
//!
//! # Algorithm
//!
//! Entities are placed one at a time, in input order. Each recursive call
//! owns a state `(remaining, partial, score)` and moves through four steps:
//!
//! 1. **Memo lookup**: a canonical key built from the remaining entities
//!    and the partial partition *as sets* (members sorted, groups sorted).
//!    Two states with the same key share their best completion because
//!    scores depend only on membership.
//! 2. **Terminal**: nothing left to place: compare against the global best
//!    with strict `>`; the first optimum found is kept.
//! 3. **Bound**: if `score + remaining_potential ≤ best` the branch cannot
//!    win; a `(−∞, ∅)` sentinel is cached and the branch is dropped.
//! 4. **Expansion**: try the next entity in every existing group, then in a
//!    new singleton group while under the bound, undoing each move on return.
//!
//! Each call returns its best completion, which is also what the cache stores.
//! The root call's completion is the answer.
//!
//! Because pruning uses `≤`, a branch that would only *tie* the incumbent is
//! discarded: when several optimal partitions exist, the first one reached in
//! exploration order is returned and the others are never visited.
//!
//! # Invariants
//! - **One context per run**: the cache and the incumbent live in a
//!   [`SearchContext`] created and dropped inside one call
//! - **Admissible pruning**: only [`remaining_potential`] bounds are used
//! - **Canonical output**: the winner is returned through [`canonicalize`]
//! - **Instrumentation is passive**: [`DebugOptions`] and [`SearchStats`]
//!   never change the result

use core::fmt;

use hashbrown::HashMap;
use tracing::{debug, info, trace};

use crate::error::PartitionError;
use crate::matrix::AffinityMatrix;
use crate::partition::{canonicalize, Partition, DEFAULT_MAX_GROUPS};
use crate::preconditions::validate_search_inputs;
use crate::scoring::{incremental_score, partition_score, remaining_potential};

// ─── Configuration ──────────────────────────────────────────────────────────

/// Which search events are logged through `tracing`.
///
/// Memo hits and pruned branches are emitted at `TRACE`, best-score
/// improvements at `DEBUG`. Any flag set also produces one `INFO` summary
/// when the search ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DebugOptions {
    /// Log every pruned branch with its bound.
    pub log_pruning: bool,
    /// Log every memo cache hit with its key.
    pub log_memo_hits: bool,
    /// Log every improvement of the global best.
    pub log_best_updates: bool,
}

impl DebugOptions {
    /// Every flag enabled.
    pub fn all() -> Self {
        Self {
            log_pruning: true,
            log_memo_hits: true,
            log_best_updates: true,
        }
    }

    /// Whether any flag is enabled.
    pub fn any(&self) -> bool {
        self.log_pruning || self.log_memo_hits || self.log_best_updates
    }
}

/// Search configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct OptimizerConfig {
    /// Upper bound on the number of groups. Must be ≥ 1.
    /// Default: [`DEFAULT_MAX_GROUPS`] (3).
    pub max_groups: usize,
    /// Diagnostic logging switches. Default: all off.
    pub debug: DebugOptions,
}

impl OptimizerConfig {
    /// Config with the given group bound and no debug logging.
    pub fn new(max_groups: usize) -> Self {
        Self {
            max_groups,
            debug: DebugOptions::default(),
        }
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_GROUPS)
    }
}

// ─── Results ────────────────────────────────────────────────────────────────

/// Counters collected during one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Recursive states entered, memo hits included.
    pub states_explored: u64,
    /// States answered from the memo cache.
    pub memo_hits: u64,
    /// States discarded by the bound check.
    pub pruned_branches: u64,
    /// Times the global best strictly improved.
    pub best_updates: u64,
    /// Entries in the memo cache when the search ended.
    pub cache_entries: u64,
}

/// Canonical best partition, its score and the search counters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOutcome {
    /// Best partition in canonical order.
    pub partition: Partition,
    /// `partition_score` of `partition`.
    pub score: f64,
    /// Counters from the run.
    pub stats: SearchStats,
}

// ─── Entry points ───────────────────────────────────────────────────────────

/// Reusable optimizer. Each [`Optimizer::run`] gets a fresh [`SearchContext`],
/// so one `Optimizer` can serve concurrent callers.
#[derive(Clone, Debug, Default)]
pub struct Optimizer {
    config: OptimizerConfig,
}

impl Optimizer {
    /// Optimizer with the given configuration.
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Optimizer with the given group bound and default debug options.
    pub fn with_max_groups(max_groups: usize) -> Self {
        Self::new(OptimizerConfig::new(max_groups))
    }

    /// The active configuration.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Find the best partition of `entities`.
    ///
    /// An empty entity sequence returns an empty partition immediately,
    /// without validation.
    ///
    /// # Errors
    ///
    /// The validation errors of [`validate_search_inputs`].
    pub fn run<S: AsRef<str>>(
        &self,
        entities: &[S],
        matrix: &AffinityMatrix,
    ) -> Result<SearchOutcome, PartitionError> {
        if entities.is_empty() {
            return Ok(SearchOutcome {
                partition: Vec::new(),
                score: 0.0,
                stats: SearchStats::default(),
            });
        }
        validate_search_inputs(entities, matrix, self.config.max_groups)?;

        let names: Vec<&str> = entities.iter().map(AsRef::as_ref).collect();
        debug!(
            entities = names.len(),
            max_groups = self.config.max_groups,
            "starting partition search"
        );

        let mut ctx = SearchContext::new(matrix, &self.config);
        let mut partial = Vec::with_capacity(self.config.max_groups.min(names.len()));
        let root = ctx.search(&names, &mut partial, 0.0);
        debug_assert_eq!(root.score, ctx.best_score);
        debug_assert_eq!(canonicalize(&root.partition), canonicalize(&ctx.best_partition));

        let stats = ctx.stats();
        if self.config.debug.any() {
            info!(
                states = stats.states_explored,
                memo_hits = stats.memo_hits,
                pruned = stats.pruned_branches,
                best_updates = stats.best_updates,
                best_score = ctx.best_score,
                "partition search summary"
            );
        }

        let partition = canonicalize(&root.partition);
        let score = partition_score(matrix, &partition);
        Ok(SearchOutcome {
            partition,
            score,
            stats,
        })
    }
}

/// Best partition of `entities` into at most `max_groups` groups.
///
/// Shorthand for [`Optimizer::run`] returning the partition only.
pub fn optimize<S: AsRef<str>>(
    entities: &[S],
    matrix: &AffinityMatrix,
    max_groups: usize,
    debug: DebugOptions,
) -> Result<Partition, PartitionError> {
    let config = OptimizerConfig { max_groups, debug };
    Optimizer::new(config)
        .run(entities, matrix)
        .map(|outcome| outcome.partition)
}

/// [`Optimizer::run`] with an explicit configuration.
pub fn optimize_with_stats<S: AsRef<str>>(
    entities: &[S],
    matrix: &AffinityMatrix,
    config: &OptimizerConfig,
) -> Result<SearchOutcome, PartitionError> {
    Optimizer::new(config.clone()).run(entities, matrix)
}

// ─── Search state ───────────────────────────────────────────────────────────

/// Canonical description of a search state.
///
/// Both parts are sorted, so neither insertion order nor group order leaks
/// into the key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct MemoKey<'a> {
    remaining: Vec<&'a str>,
    groups: Vec<Vec<&'a str>>,
}

impl<'a> MemoKey<'a> {
    fn new(remaining: &[&'a str], partial: &[Vec<&'a str>]) -> Self {
        let mut remaining = remaining.to_vec();
        remaining.sort_unstable();
        let mut groups: Vec<Vec<&'a str>> = partial
            .iter()
            .map(|group| {
                let mut group = group.clone();
                group.sort_unstable();
                group
            })
            .collect();
        groups.sort_unstable();
        Self { remaining, groups }
    }
}

impl fmt::Display for MemoKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::", self.remaining.join(","))?;
        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            f.write_str(&group.join(","))?;
        }
        Ok(())
    }
}

/// Best completion reachable from a state, as full partition and its score.
#[derive(Clone, Debug)]
struct MemoEntry<'a> {
    score: f64,
    partition: Vec<Vec<&'a str>>,
}

impl MemoEntry<'_> {
    /// Result for a pruned or empty branch.
    fn pruned() -> Self {
        Self {
            score: f64::NEG_INFINITY,
            partition: Vec::new(),
        }
    }
}

/// Everything one search run owns: incumbent, memo cache and counters.
struct SearchContext<'a> {
    matrix: &'a AffinityMatrix,
    max_groups: usize,
    debug: DebugOptions,
    best_score: f64,
    best_partition: Vec<Vec<&'a str>>,
    cache: HashMap<MemoKey<'a>, MemoEntry<'a>>,
    stats: SearchStats,
}

impl<'a> SearchContext<'a> {
    fn new(matrix: &'a AffinityMatrix, config: &OptimizerConfig) -> Self {
        Self {
            matrix,
            max_groups: config.max_groups,
            debug: config.debug,
            best_score: f64::NEG_INFINITY,
            best_partition: Vec::new(),
            cache: HashMap::new(),
            stats: SearchStats::default(),
        }
    }

    fn stats(&self) -> SearchStats {
        SearchStats {
            cache_entries: self.cache.len() as u64,
            ..self.stats
        }
    }

    fn search(
        &mut self,
        remaining: &[&'a str],
        partial: &mut Vec<Vec<&'a str>>,
        score: f64,
    ) -> MemoEntry<'a> {
        self.stats.states_explored += 1;

        let key = MemoKey::new(remaining, partial);
        if let Some(hit) = self.cache.get(&key) {
            self.stats.memo_hits += 1;
            if self.debug.log_memo_hits {
                trace!(key = %key, score = hit.score, "memo hit");
            }
            return hit.clone();
        }

        let Some((&next, rest)) = remaining.split_first() else {
            let entry = self.settle(partial, score);
            self.cache.insert(key, entry.clone());
            return entry;
        };

        let bound = score + remaining_potential(self.matrix, remaining, partial);
        if bound <= self.best_score {
            self.stats.pruned_branches += 1;
            if self.debug.log_pruning {
                trace!(key = %key, bound, best = self.best_score, "pruned branch");
            }
            let entry = MemoEntry::pruned();
            self.cache.insert(key, entry.clone());
            return entry;
        }

        let mut best_local = MemoEntry::pruned();

        for idx in 0..partial.len() {
            let gain = incremental_score(self.matrix, next, &partial[idx]);
            partial[idx].push(next);
            let result = self.search(rest, partial, score + gain);
            partial[idx].pop();
            if result.score > best_local.score {
                best_local = result;
            }
        }

        if partial.len() < self.max_groups {
            partial.push(vec![next]);
            let result = self.search(rest, partial, score);
            partial.pop();
            if result.score > best_local.score {
                best_local = result;
            }
        }

        self.cache.insert(key, best_local.clone());
        best_local
    }

    /// Terminal state: every entity is placed.
    fn settle(&mut self, partial: &[Vec<&'a str>], score: f64) -> MemoEntry<'a> {
        if partial.is_empty() {
            return MemoEntry::pruned();
        }
        if score > self.best_score {
            self.best_score = score;
            self.best_partition = partial.to_vec();
            self.stats.best_updates += 1;
            if self.debug.log_best_updates {
                debug!(score, partition = ?partial, "new best partition");
            }
        }
        MemoEntry {
            score,
            partition: partial.to_vec(),
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
