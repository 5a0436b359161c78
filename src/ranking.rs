//! Rank and colour the groups of a finished partition by score.
//!
//! Groups are ordered by [`group_score`] descending with a stable sort, so
//! equal scores keep their relative input order. The first three get
//! `gold`, `silver` and `bronze`; any further groups stay unranked. The
//! input partition is never touched.

use core::fmt;

use crate::matrix::AffinityMatrix;
use crate::partition::Group;
use crate::scoring::group_score;

/// Number of groups that receive a rank.
pub const RANKED_GROUPS: usize = 3;

/// Rank label for the three best-scoring groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ColorRank {
    /// Highest-scoring group.
    Gold,
    /// Second-highest group.
    Silver,
    /// Third-highest group.
    Bronze,
}

impl ColorRank {
    /// Ranks in award order.
    pub const ALL: [ColorRank; RANKED_GROUPS] = [Self::Gold, Self::Silver, Self::Bronze];

    /// Rank for a zero-based position in the sorted list, if ranked.
    pub fn for_position(position: usize) -> Option<Self> {
        Self::ALL.get(position).copied()
    }

    /// Lowercase label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Gold => "gold",
            Self::Silver => "silver",
            Self::Bronze => "bronze",
        }
    }

    /// Display colour as a `#rrggbb` hex string.
    pub fn hex(self) -> &'static str {
        match self {
            Self::Gold => "#2196f3",
            Self::Silver => "#43a047",
            Self::Bronze => "#ff9800",
        }
    }
}

impl fmt::Display for ColorRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Hex colour for a zero-based rank position; positions past the third fall
/// back to bronze.
pub fn color_for_position(position: usize) -> &'static str {
    ColorRank::for_position(position)
        .unwrap_or(ColorRank::Bronze)
        .hex()
}

/// One group of a partition with its score and (optional) rank.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorRanking {
    /// Index of the group in the input partition.
    pub group_index: usize,
    /// Members, as given in the input partition.
    pub members: Group,
    /// [`group_score`] of the members.
    pub group_score: f64,
    /// Rank label; `None` past the third group.
    pub rank: Option<ColorRank>,
    /// `rank`'s hex colour; `None` when unranked.
    pub hex_color: Option<String>,
}

impl ColorRanking {
    /// Whether this group received a rank.
    pub fn is_ranked(&self) -> bool {
        self.rank.is_some()
    }
}

/// Rank every group of `partition` by score, best first.
///
/// Returns one entry per group. Ties keep input order.
pub fn color_rank<S: AsRef<str>>(partition: &[Vec<S>], matrix: &AffinityMatrix) -> Vec<ColorRanking> {
    let mut scored: Vec<(usize, f64)> = partition
        .iter()
        .enumerate()
        .map(|(idx, group)| (idx, group_score(matrix, group)))
        .collect();
    // sort_by is stable
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    scored
        .into_iter()
        .enumerate()
        .map(|(position, (group_index, score))| {
            let rank = ColorRank::for_position(position);
            ColorRanking {
                group_index,
                members: partition[group_index]
                    .iter()
                    .map(|m| m.as_ref().to_string())
                    .collect(),
                group_score: score,
                rank,
                hex_color: rank.map(|r| r.hex().to_string()),
            }
        })
        .collect()
}
