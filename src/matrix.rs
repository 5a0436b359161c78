/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Directed, sparse affinity matrix between named entities.
//!
//! `affinity(a → b)` need not equal `affinity(b → a)`. A missing entry reads
//! as `0.0`, so callers only store the pairs they have data for. Every entity
//! handed to the optimizer must still own a row (possibly empty); that is
//! checked by [`crate::preconditions`].
//!
//! # Loading a delimited table
//!
//! ```text
//! x,Tokyo,Chiba,Saitama
//! Tokyo,-,12,8
//! Chiba,10,-,
//! Saitama,7,3,-
//! ```
//!
//! The first header cell names the label column (its text is ignored). Each
//! data row starts with its source entity. `-` and empty cells mean "no data".
//! Fields are read with the `csv` crate, so quoted names such as
//! `"Tokyo, Japan"` keep their embedded delimiter.
//!
//! # Invariants
//! - **Sparse**: absent pairs score `0.0`, never an error
//! - **Finite**: the loader rejects `NaN` and infinities
//! - **No I/O**: the caller reads the file; this module only parses text

use hashbrown::HashMap;

use crate::error::PartitionError;

/// Cell values meaning "no data" in a delimited affinity table.
pub const NO_DATA_SENTINELS: [&str; 2] = ["-", ""];

/// Directed affinity scores keyed by source entity, then target entity.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct AffinityMatrix {
    /// `rows[from][to]` = affinity(from → to).
    rows: HashMap<String, HashMap<String, f64>>,
}

impl AffinityMatrix {
    /// Create an empty matrix.
    pub fn new() -> Self {
        Self {
            rows: HashMap::new(),
        }
    }

    /// Wrap prebuilt `from → to → score` rows.
    pub fn from_rows(rows: HashMap<String, HashMap<String, f64>>) -> Self {
        Self { rows }
    }

    /// Ensure `name` has a row, even if it scores nothing towards anyone.
    pub fn add_entity(&mut self, name: impl Into<String>) -> &mut Self {
        self.rows.entry(name.into()).or_default();
        self
    }

    /// Set affinity(from → to). Creates the `from` row if needed.
    ///
    /// The `to` entity does not get a row of its own. Scores must be finite;
    /// the search rejects a matrix holding `NaN` or infinities with
    /// [`PartitionError::NonFiniteAffinity`].
    pub fn set(&mut self, from: impl Into<String>, to: impl Into<String>, score: f64) -> &mut Self {
        self.rows.entry(from.into()).or_default().insert(to.into(), score);
        self
    }

    /// Set both directions of a pair at once and give both entities a row.
    pub fn set_pair(
        &mut self,
        a: impl Into<String>,
        b: impl Into<String>,
        a_to_b: f64,
        b_to_a: f64,
    ) -> &mut Self {
        let a = a.into();
        let b = b.into();
        self.set(a.clone(), b.clone(), a_to_b);
        self.set(b, a, b_to_a)
    }

    /// Builder form of [`AffinityMatrix::set`].
    pub fn with(mut self, from: impl Into<String>, to: impl Into<String>, score: f64) -> Self {
        self.set(from, to, score);
        self
    }

    /// Stored affinity(from → to), if any.
    pub fn get(&self, from: &str, to: &str) -> Option<f64> {
        self.rows.get(from).and_then(|row| row.get(to)).copied()
    }

    /// affinity(from → to), `0.0` when either side is unknown.
    pub fn affinity(&self, from: &str, to: &str) -> f64 {
        self.get(from, to).unwrap_or(0.0)
    }

    /// Whether `name` owns a row.
    pub fn contains_entity(&self, name: &str) -> bool {
        self.rows.contains_key(name)
    }

    /// Number of entities that own a row.
    pub fn entity_count(&self) -> usize {
        self.rows.len()
    }

    /// `true` when no entity owns a row.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row owners, sorted for deterministic iteration.
    pub fn entities(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rows.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Iterate the stored (to, score) entries of one row.
    pub fn row(&self, from: &str) -> impl Iterator<Item = (&str, f64)> {
        self.rows
            .get(from)
            .into_iter()
            .flat_map(|row| row.iter().map(|(to, &score)| (to.as_str(), score)))
    }

    // ── Loader ────────────────────────────────────────────────────────────

    /// Parse a comma-separated table. See [`AffinityMatrix::from_delimited`].
    pub fn from_csv(input: &str) -> Result<Self, PartitionError> {
        Self::from_delimited(input, ',')
    }

    /// Parse a delimited row/column table into a matrix.
    ///
    /// Fields follow CSV quoting rules, so a quoted label may contain the
    /// delimiter. Cells are trimmed, blank lines are skipped and rows may be
    /// shorter than the header. Blank header cells are ignored along with
    /// their column. A later row with the same label replaces the earlier one.
    ///
    /// # Errors
    ///
    /// - [`PartitionError::InvalidDelimiter`] for a non-ASCII delimiter.
    /// - [`PartitionError::MalformedTable`] when the text is not valid
    ///   delimited data.
    /// - [`PartitionError::EmptyTable`] when there is no header or no data row.
    /// - [`PartitionError::MissingRowLabel`] when a row's first cell is empty.
    /// - [`PartitionError::InvalidCell`] for anything that is not a finite
    ///   number or one of [`NO_DATA_SENTINELS`].
    pub fn from_delimited(input: &str, delimiter: char) -> Result<Self, PartitionError> {
        let delimiter = u8::try_from(delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or(PartitionError::InvalidDelimiter(delimiter))?;

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(input.as_bytes());

        let header = reader.headers().map_err(malformed)?.clone();
        // (cell index, target entity); column 0 is the label column.
        let columns: Vec<(usize, &str)> = header
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, name)| !name.is_empty())
            .collect();

        let mut matrix = Self::new();
        let mut data_rows = 0usize;

        for record in reader.records() {
            let record = record.map_err(malformed)?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            let label = record.get(0).unwrap_or("");
            if label.is_empty() {
                return Err(PartitionError::MissingRowLabel { row: data_rows });
            }

            let mut row = HashMap::new();
            for &(cell_idx, to) in &columns {
                let raw = record.get(cell_idx).unwrap_or("");
                if let Some(score) = parse_cell(raw, data_rows, to)? {
                    row.insert(to.to_string(), score);
                }
            }
            matrix.rows.insert(label.to_string(), row);
            data_rows += 1;
        }

        if data_rows == 0 {
            return Err(PartitionError::EmptyTable);
        }
        Ok(matrix)
    }

    /// First non-finite entry of `from`'s row, smallest target first.
    pub fn non_finite_entry(&self, from: &str) -> Option<(&str, f64)> {
        self.row(from)
            .filter(|(_, score)| !score.is_finite())
            .min_by(|a, b| a.0.cmp(b.0))
    }
}

impl<F, T> FromIterator<(F, T, f64)> for AffinityMatrix
where
    F: Into<String>,
    T: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (F, T, f64)>>(iter: I) -> Self {
        let mut matrix = Self::new();
        for (from, to, score) in iter {
            matrix.set(from, to, score);
        }
        matrix
    }
}

fn malformed(err: csv::Error) -> PartitionError {
    PartitionError::MalformedTable(err.to_string())
}

/// `Ok(None)` for a "no data" sentinel.
fn parse_cell(raw: &str, row: usize, column: &str) -> Result<Option<f64>, PartitionError> {
    if NO_DATA_SENTINELS.contains(&raw) {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(score) if score.is_finite() => Ok(Some(score)),
        _ => Err(PartitionError::invalid_cell(row, column, raw)),
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
