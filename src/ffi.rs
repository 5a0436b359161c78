//! Python FFI bindings via PyO3.
//!
//! Exposes the optimizer, the exhaustive oracle and the ranking step with
//! plain Python containers: entity names are `str`, the affinity matrix is a
//! `dict[str, dict[str, float]]`, partitions are `list[list[str]]`.
//!
//! # Building the Python extension
//!
//! ```bash
//! pip install maturin
//! maturin develop --features python-ffi
//! ```
//!
//! # Usage
//!
//! ```python
//! import affinity_partition as ap
//!
//! matrix = {
//!     "Tokyo":    {"Chiba": 12.0, "Saitama": 8.0},
//!     "Chiba":    {"Tokyo": 10.0},
//!     "Saitama":  {"Tokyo": 7.0},
//! }
//! entities = list(matrix)
//! best = ap.optimize(entities, matrix, max_groups=2)
//! print(best, ap.partition_score(best, matrix))
//!
//! report = ap.validate_optimality(entities, matrix, max_groups=2)
//! assert report.is_optimal
//! for r in report.color_rankings:
//!     print(r.rank, r.hex_color, r.members, r.group_score)
//! ```

use hashbrown::HashMap;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::enumerate::enumerate as enumerate_partitions;
use crate::error::PartitionError;
use crate::matrix::AffinityMatrix;
use crate::partition::{Partition, DEFAULT_MAX_GROUPS};
use crate::preconditions::validate_affinity_values;
use crate::ranking::{color_rank as rank_groups, ColorRanking};
use crate::scoring::partition_score as score_partition;
use crate::search::{optimize as optimize_partition, DebugOptions, OptimizerConfig};
use crate::validation::{validate_optimality as validate_partition, OptimizationReport};

/// Python-side matrix shape: `{from: {to: score}}`.
type PyMatrix = HashMap<String, HashMap<String, f64>>;

/// Convert, rejecting NaN and infinite scores.
fn to_matrix(rows: PyMatrix) -> PyResult<AffinityMatrix> {
    let matrix = AffinityMatrix::from_rows(rows);
    validate_affinity_values(&matrix.entities(), &matrix).map_err(to_py_err)?;
    Ok(matrix)
}

fn to_py_err(err: PartitionError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn debug_options(debug: bool) -> DebugOptions {
    if debug {
        DebugOptions::all()
    } else {
        DebugOptions::default()
    }
}

// ── ColorRanking ──────────────────────────────────────────────────────────────

/// One group of a partition with its score, rank label and colour.
#[pyclass(name = "ColorRanking")]
#[derive(Clone)]
pub struct PyColorRanking {
    inner: ColorRanking,
}

#[pymethods]
impl PyColorRanking {
    /// Index of the group in the ranked partition.
    #[getter]
    pub fn group_index(&self) -> usize {
        self.inner.group_index
    }
    /// Group members.
    #[getter]
    pub fn members(&self) -> Vec<String> {
        self.inner.members.clone()
    }
    /// Group score.
    #[getter]
    pub fn group_score(&self) -> f64 {
        self.inner.group_score
    }
    /// "gold", "silver", "bronze", or None past the third group.
    #[getter]
    pub fn rank(&self) -> Option<&'static str> {
        self.inner.rank.map(|r| r.label())
    }
    /// "#rrggbb" colour of the rank, or None.
    #[getter]
    pub fn hex_color(&self) -> Option<String> {
        self.inner.hex_color.clone()
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!(
            "ColorRanking(group_index={}, rank={:?}, group_score={}, members={:?})",
            self.inner.group_index,
            self.inner.rank.map(|r| r.label()),
            self.inner.group_score,
            self.inner.members,
        )
    }
}

// ── OptimizationReport ───────────────────────────────────────────────────────

/// Search result with its exhaustive cross-check.
#[pyclass(name = "OptimizationReport")]
pub struct PyOptimizationReport {
    inner: OptimizationReport,
}

#[pymethods]
impl PyOptimizationReport {
    /// Canonical best partition.
    #[getter]
    pub fn partition(&self) -> Partition {
        self.inner.partition.clone()
    }
    /// Score of the best partition.
    #[getter]
    pub fn total_score(&self) -> f64 {
        self.inner.total_score
    }
    /// Whether the search matched the exhaustive maximum.
    #[getter]
    pub fn is_optimal(&self) -> bool {
        self.inner.is_optimal
    }
    /// Best score over every enumerated partition.
    #[getter]
    pub fn exhaustive_best_score(&self) -> f64 {
        self.inner.validation.exhaustive_best_score
    }
    /// Number of partitions enumerated.
    #[getter]
    pub fn total_partitions(&self) -> u64 {
        self.inner.validation.total_partitions
    }
    /// Memo cache hits during the search.
    #[getter]
    pub fn memo_hits(&self) -> u64 {
        self.inner.stats.memo_hits
    }
    /// Branches pruned during the search.
    #[getter]
    pub fn pruned_branches(&self) -> u64 {
        self.inner.stats.pruned_branches
    }
    /// Groups ranked by score.
    #[getter]
    pub fn color_rankings(&self) -> Vec<PyColorRanking> {
        self.inner
            .color_rankings
            .iter()
            .cloned()
            .map(|inner| PyColorRanking { inner })
            .collect()
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!(
            "OptimizationReport(total_score={}, is_optimal={}, total_partitions={})",
            self.inner.total_score,
            if self.inner.is_optimal { "True" } else { "False" },
            self.inner.validation.total_partitions,
        )
    }
}

// ── Functions ────────────────────────────────────────────────────────────────

/// Best partition of `entities` into at most `max_groups` groups.
///
/// Raises ValueError on max_groups < 1, duplicate names, or names missing
/// from `matrix`.
#[pyfunction]
#[pyo3(name = "optimize", signature = (entities, matrix, max_groups=DEFAULT_MAX_GROUPS, debug=false))]
pub fn py_optimize(
    entities: Vec<String>,
    matrix: PyMatrix,
    max_groups: usize,
    debug: bool,
) -> PyResult<Partition> {
    optimize_partition(&entities, &to_matrix(matrix)?, max_groups, debug_options(debug))
        .map_err(to_py_err)
}

/// Every partition of `entities` into at most `max_groups` groups.
#[pyfunction]
#[pyo3(name = "enumerate", signature = (entities, max_groups=DEFAULT_MAX_GROUPS))]
pub fn py_enumerate(entities: Vec<String>, max_groups: usize) -> PyResult<Vec<Partition>> {
    enumerate_partitions(&entities, max_groups).map_err(to_py_err)
}

/// Total intra-group affinity of `partition`.
///
/// Raises ValueError when `matrix` holds NaN or infinite scores.
#[pyfunction]
#[pyo3(name = "partition_score")]
pub fn py_partition_score(partition: Partition, matrix: PyMatrix) -> PyResult<f64> {
    Ok(score_partition(&to_matrix(matrix)?, &partition))
}

/// Groups of `partition` ranked by score, best first.
#[pyfunction]
#[pyo3(name = "color_rank")]
pub fn py_color_rank(partition: Partition, matrix: PyMatrix) -> PyResult<Vec<PyColorRanking>> {
    Ok(rank_groups(&partition, &to_matrix(matrix)?)
        .into_iter()
        .map(|inner| PyColorRanking { inner })
        .collect())
}

/// Optimise, then cross-check against exhaustive enumeration.
#[pyfunction]
#[pyo3(name = "validate_optimality", signature = (entities, matrix, max_groups=DEFAULT_MAX_GROUPS, debug=false))]
pub fn py_validate_optimality(
    entities: Vec<String>,
    matrix: PyMatrix,
    max_groups: usize,
    debug: bool,
) -> PyResult<PyOptimizationReport> {
    let config = OptimizerConfig {
        max_groups,
        debug: debug_options(debug),
    };
    validate_partition(&entities, &to_matrix(matrix)?, &config)
        .map(|inner| PyOptimizationReport { inner })
        .map_err(to_py_err)
}

// ── Module entry point ────────────────────────────────────────────────────────

/// Python bindings for the bounded set-partition optimizer.
#[pymodule]
pub fn affinity_partition(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyColorRanking>()?;
    m.add_class::<PyOptimizationReport>()?;
    m.add_function(wrap_pyfunction!(py_optimize, m)?)?;
    m.add_function(wrap_pyfunction!(py_enumerate, m)?)?;
    m.add_function(wrap_pyfunction!(py_partition_score, m)?)?;
    m.add_function(wrap_pyfunction!(py_color_rank, m)?)?;
    m.add_function(wrap_pyfunction!(py_validate_optimality, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add("DEFAULT_MAX_GROUPS", DEFAULT_MAX_GROUPS)?;
    Ok(())
}
