//! Core trait definitions for interval dynamic programs.
//!
//! To run a recurrence on [`IntervalEngine`](crate::engine::IntervalEngine),
//! implement [`IntervalProblem`] for a struct that owns the instance data
//! (e.g. the input records).
//!
//! The trait encodes the shape of an interval DP:
//! - Base cells: every single-item range `[i, i]` has a known value.
//! - Combination: the value of `[i, j]` for a split point `k` is derived from
//!   the optimal values of `[i, k]` and `[k + 1, j]` only.
//! - Scoring: candidates for one range are ranked by a totally ordered score.
//!
//! The engine fills ranges in increasing order of length, so `combine` is only
//! ever called on cells that are already final.

use std::num::NonZeroUsize;

/// Trait for an interval DP instance over a fixed, non-empty sequence.
///
/// Semantics:
/// - There are `n = num_items()` items, indexed `0..n`.
/// - `base_cell(i)` is the value of the range `[i, i]`.
/// - For `i < j`, the value of `[i, j]` is the highest-scoring
///   `combine(value[i, k], value[k + 1, j])` over `k` in `i..j`. Among equal
///   scores the lowest `k` wins.
pub trait IntervalProblem {
    /// Value stored in each table cell.
    type Cell: Clone;

    /// Objective used to rank candidates; higher is better.
    type Score: Copy + Ord;

    /// Failure raised while combining two cells.
    type Error;

    /// Number of items in the sequence.
    ///
    /// Non-zero by construction: an empty instance has no `[0, n - 1]` range,
    /// so problems reject it before reaching the engine.
    fn num_items(&self) -> NonZeroUsize;

    /// Value of the single-item range `[index, index]`.
    fn base_cell(&self, index: usize) -> Self::Cell;

    /// Combine the optimal values of two adjacent ranges into a candidate for
    /// their union. `left` covers `[i, k]` and `right` covers `[k + 1, j]`.
    fn combine(&self, left: &Self::Cell, right: &Self::Cell) -> Result<Self::Cell, Self::Error>;

    /// Score of a cell; the engine keeps the candidate with the greatest score.
    fn score(&self, cell: &Self::Cell) -> Self::Score;
}
