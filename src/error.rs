//! Error types for fitmon fusion.
//!
//! All failures are input-validation or arithmetic-range failures; there is
//! nothing transient, so callers get the error directly with no partial result.

use std::fmt;

use thiserror::Error;

/// Which affinity of a record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffinitySide {
    Left,
    Right,
}

impl fmt::Display for AffinitySide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AffinitySide::Left => f.write_str("left"),
            AffinitySide::Right => f.write_str("right"),
        }
    }
}

/// Failure modes of [`compute_max_fusion_score`](crate::compute_max_fusion_score)
/// and the [`FitmonFusion`](crate::problems::fitmon::FitmonFusion) problem.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FusionError {
    /// The input sequence contains no records, so there is nothing to fuse.
    #[error("invalid input: cannot fuse an empty sequence of fitmons")]
    EmptyInput,

    /// An input affinity is NaN or infinite.
    #[error("invalid input: fitmon {index} has a non-finite {side} affinity ({value})")]
    NonFiniteAffinity {
        index: usize,
        side: AffinitySide,
        value: f64,
    },

    /// An input record carries a negative cuteness score.
    #[error("invalid input: fitmon {index} has negative cuteness score {score}")]
    NegativeScore { index: usize, score: i64 },

    /// A fusion produced a real-valued score that cannot be truncated into an `i64`.
    #[error("fused cuteness score {value} does not fit in a 64-bit integer")]
    ScoreOverflow { value: f64 },
}

impl FusionError {
    /// True for the variants caused by malformed caller input.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, FusionError::ScoreOverflow { .. })
    }
}
