//! # affinity-partition
//!
//! Bounded set-partition optimizer: split a set of named entities into at most
//! `K` non-empty groups so that the total intra-group affinity is maximal, and
//! prove it by checking the answer against exhaustive enumeration.
//!
//! ---
//!
//! ## The problem
//!
//! Every entity holds a directed score towards some of the others
//! (`affinity(a → b)`, missing = 0). A group is worth the sum of both
//! directions over every pair it contains; a partition is worth the sum of
//! its groups. Find the partition into ≤ `K` groups with the highest worth.
//!
//! The number of candidate partitions grows like the Bell numbers, so the
//! optimizer is a **memoised branch-and-bound** search:
//!
//! - **Admissible bound**: an optimistic estimate of what the unplaced
//!   entities can still add. A branch whose estimate cannot beat the best
//!   partition found so far is dropped.
//! - **Canonical memo keys**: states reached through different insertion
//!   orders but holding the same groups are solved once.
//! - **Exhaustive oracle**: an independent enumerator visits every
//!   partition, and the orchestrator reports whether the search matched it.
//!
//! ## The pipeline
//!
//! ```text
//! entities + AffinityMatrix ──► Optimizer ──► Partition ──► color_rank
//!                     │                          │
//!                     └──► visit_partitions ──► validate_optimality
//!                                 (oracle)        (is_optimal)
//! ```
//!
//! ## Module overview
//!
//! | Module | Key items | What it does |
//! |--------|-----------|--------------|
//! | [`matrix`] | [`AffinityMatrix`] | Sparse directed scores; delimited-table loader |
//! | [`scoring`] | [`partition_score`], [`remaining_potential`] | Pair, group, partition and incremental scores; admissible bound |
//! | [`partition`] | [`Partition`], [`canonicalize`] | Group/partition types and canonical ordering |
//! | [`enumerate`](mod@enumerate) | [`enumerate()`], [`partition_count`] | Exhaustive ground-truth enumeration |
//! | [`search`] | [`Optimizer`], [`optimize`] | Memoised branch-and-bound search |
//! | [`validation`] | [`validate_optimality`], [`OptimizationReport`] | Search vs. oracle cross-check |
//! | [`ranking`] | [`color_rank`], [`ColorRank`] | Gold/silver/bronze ranking by group score |
//! | [`preconditions`] | [`validate_search_inputs`] | Up-front input validation |
//! | [`error`] | [`PartitionError`] | Error taxonomy |
//!
//! ## Example
//!
//! ```rust
//! use affinity_partition::{optimize, partition_score, AffinityMatrix, DebugOptions};
//!
//! let mut matrix = AffinityMatrix::new();
//! matrix.set_pair("A", "B", 6.0, 4.0);
//! matrix.set_pair("B", "C", -3.0, -3.0);
//! matrix.set_pair("C", "D", 5.0, 1.0);
//!
//! let best = optimize(&["A", "B", "C", "D"], &matrix, 2, DebugOptions::default()).unwrap();
//! assert_eq!(best, vec![vec!["A", "B"], vec!["C", "D"]]);
//! assert_eq!(partition_score(&matrix, &best), 16.0);
//! ```
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` on the matrix, configuration, and
//!   every result type, for shipping results to presentation layers.
//! - `python-ffi`: PyO3 bindings (see `ffi`).
//!
//! ## License
//!
//! Business Source License 1.1.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod enumerate;
pub mod error;
pub mod matrix;
pub mod partition;
pub mod preconditions;
pub mod ranking;
pub mod scoring;
pub mod search;
pub mod validation;

#[cfg(feature = "python-ffi")]
pub mod ffi;

pub use enumerate::{enumerate, partition_count, visit_partitions};
pub use error::PartitionError;
pub use matrix::AffinityMatrix;
pub use partition::{canonicalize, Group, Partition, DEFAULT_MAX_GROUPS};
pub use preconditions::validate_search_inputs;
pub use ranking::{color_rank, ColorRank, ColorRanking};
pub use scoring::{
    group_score, incremental_score, pair_score, partition_score, remaining_potential,
};
pub use search::{
    optimize, optimize_with_stats, DebugOptions, Optimizer, OptimizerConfig, SearchOutcome,
    SearchStats,
};
pub use validation::{validate_optimality, OptimizationReport, ValidationDetails};
