//! Error taxonomy for the partition optimizer.
//!
//! Every failure is fail-fast: the search and the enumerator never start on
//! input that has not passed [`crate::preconditions`], and there is no
//! partial result. The loader variants belong to
//! [`AffinityMatrix::from_delimited`](crate::matrix::AffinityMatrix::from_delimited).

use thiserror::Error;

/// Errors surfaced by validation and by the affinity-table loader.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PartitionError {
    /// Configuration error: at least one group must be allowed.
    #[error("max_groups must be at least 1, got {0}")]
    InvalidMaxGroups(usize),

    /// Input integrity error: the entity sequence names the same entity twice.
    #[error("duplicate entity names: {}", .0.join(", "))]
    DuplicateEntities(Vec<String>),

    /// Data integrity error: entities with no row in the affinity matrix.
    #[error("entities not found in affinity matrix: {}", .0.join(", "))]
    MissingAffinityRows(Vec<String>),

    /// Data integrity error: an entity's row holds a `NaN` or infinite score.
    #[error("non-finite affinity from {from:?} to {to:?}")]
    NonFiniteAffinity {
        /// Source entity of the offending entry.
        from: String,
        /// Target entity of the offending entry.
        to: String,
    },

    /// The loader only splits on single-byte ASCII delimiters.
    #[error("delimiter {0:?} is not a single ASCII character")]
    InvalidDelimiter(char),

    /// The delimited source could not be read as a table.
    #[error("malformed affinity table: {0}")]
    MalformedTable(String),

    /// The delimited source had no header or no data rows.
    #[error("affinity table is empty or has no data rows")]
    EmptyTable,

    /// A data row did not start with an entity label.
    #[error("missing entity label at row {row}")]
    MissingRowLabel {
        /// Zero-based data row index (header excluded).
        row: usize,
    },

    /// A cell was neither a finite number nor a "no data" sentinel.
    #[error("invalid affinity value {value:?} at row {row}, column {column:?}")]
    InvalidCell {
        /// Zero-based data row index (header excluded).
        row: usize,
        /// Header name of the offending column.
        column: String,
        /// Raw cell text.
        value: String,
    },
}

impl PartitionError {
    /// Create an InvalidCell error.
    pub fn invalid_cell(row: usize, column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidCell {
            row,
            column: column.into(),
            value: value.into(),
        }
    }

    /// `true` for the pre-search validation classes.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidMaxGroups(_)
                | Self::DuplicateEntities(_)
                | Self::MissingAffinityRows(_)
                | Self::NonFiniteAffinity { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_offending_values() {
        let dup = PartitionError::DuplicateEntities(vec!["Tokyo".into(), "Chiba".into()]);
        assert_eq!(dup.to_string(), "duplicate entity names: Tokyo, Chiba");

        let missing = PartitionError::MissingAffinityRows(vec!["Gunma".into()]);
        assert!(missing.to_string().contains("Gunma"));

        let cfg = PartitionError::InvalidMaxGroups(0);
        assert_eq!(cfg.to_string(), "max_groups must be at least 1, got 0");

        let cell = PartitionError::invalid_cell(2, "Saitama", "abc");
        assert_eq!(
            cell.to_string(),
            "invalid affinity value \"abc\" at row 2, column \"Saitama\""
        );
    }

    #[test]
    fn test_validation_classification() {
        assert!(PartitionError::InvalidMaxGroups(0).is_validation());
        assert!(PartitionError::DuplicateEntities(vec![]).is_validation());
        assert!(PartitionError::MissingAffinityRows(vec![]).is_validation());
        assert!(PartitionError::NonFiniteAffinity {
            from: "A".into(),
            to: "B".into()
        }
        .is_validation());
        assert!(!PartitionError::EmptyTable.is_validation());
        assert!(!PartitionError::InvalidDelimiter('→').is_validation());
        assert!(!PartitionError::MissingRowLabel { row: 0 }.is_validation());
    }
}
