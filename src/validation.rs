//! Validation orchestrator: run the search, run the exhaustive oracle, compare.
//!
//! No optimisation happens here. The report is only as trustworthy as
//! [`crate::search`] and [`crate::enumerate`] are independently; its job is
//! to put their answers side by side and say whether they agree.

use tracing::{debug, error, info};

use crate::enumerate::visit_partitions;
use crate::error::PartitionError;
use crate::matrix::AffinityMatrix;
use crate::partition::Partition;
use crate::ranking::{color_rank, ColorRanking};
use crate::scoring::partition_score;
use crate::search::{Optimizer, OptimizerConfig, SearchStats};

/// Relative tolerance used when comparing the search score with the
/// exhaustive maximum.
pub const SCORE_TOLERANCE: f64 = 1e-9;

/// Scores behind the optimality verdict.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationDetails {
    /// Score of the partition returned by the search.
    pub algorithm_score: f64,
    /// Best score over every enumerated partition (`0.0` for empty input).
    pub exhaustive_best_score: f64,
    /// Number of partitions the oracle enumerated.
    pub total_partitions: u64,
}

/// Search result together with its exhaustive cross-check.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizationReport {
    /// Canonical partition found by the search.
    pub partition: Partition,
    /// Its score.
    pub total_score: f64,
    /// Whether the search score equals the exhaustive maximum.
    pub is_optimal: bool,
    /// Scores and scale of the cross-check.
    pub validation: ValidationDetails,
    /// Search counters.
    pub stats: SearchStats,
    /// Groups ranked by score.
    pub color_rankings: Vec<ColorRanking>,
}

/// `true` when `a` and `b` agree within [`SCORE_TOLERANCE`], relative to their size.
pub fn scores_match(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= SCORE_TOLERANCE * scale
}

/// Optimise `entities`, then verify the result against every partition.
///
/// Exponential in the entity count; meant for inputs small enough to
/// enumerate.
///
/// # Errors
///
/// The validation errors of [`Optimizer::run`].
pub fn validate_optimality<S: AsRef<str>>(
    entities: &[S],
    matrix: &AffinityMatrix,
    config: &OptimizerConfig,
) -> Result<OptimizationReport, PartitionError> {
    let outcome = Optimizer::new(config.clone()).run(entities, matrix)?;

    let mut exhaustive_best = f64::NEG_INFINITY;
    let total_partitions = visit_partitions(entities, config.max_groups, |partition| {
        let score = partition_score(matrix, partition);
        if score > exhaustive_best {
            exhaustive_best = score;
        }
    })?;
    if total_partitions == 0 {
        exhaustive_best = 0.0;
    }

    let is_optimal = scores_match(outcome.score, exhaustive_best);
    if is_optimal {
        info!(
            score = outcome.score,
            partitions = total_partitions,
            "search result verified optimal"
        );
    } else {
        error!(
            expected = exhaustive_best,
            actual = outcome.score,
            "search missed the exhaustive optimum"
        );
    }

    let color_rankings = color_rank(&outcome.partition, matrix);
    for (number, group) in outcome.partition.iter().enumerate() {
        debug!(group = number + 1, members = ?group, "best partition group");
    }

    Ok(OptimizationReport {
        validation: ValidationDetails {
            algorithm_score: outcome.score,
            exhaustive_best_score: exhaustive_best,
            total_partitions,
        },
        partition: outcome.partition,
        total_score: outcome.score,
        is_optimal,
        stats: outcome.stats,
        color_rankings,
    })
}
